// Dashboard page served at `/`. The script mirrors the page view from `/api/dashboard`.

pub fn index_html(poll_interval_ms: u64) -> String {
    INDEX_HTML.replace("__POLL_MS__", &poll_interval_ms.to_string())
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Water Quality Monitor</title>
    <script src="https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js"></script>
    <style>
        :root {
            --bg: #f8fafc;
            --surface: #ffffff;
            --border: #e2e8f0;
            --text: #1e293b;
            --muted: #64748b;
        }
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body { font-family: system-ui, -apple-system, sans-serif; background: var(--bg); color: var(--text); }
        .container { max-width: 1200px; margin: 0 auto; padding: 1.5rem; }
        header { display: flex; justify-content: space-between; align-items: center; flex-wrap: wrap; gap: 1rem; margin-bottom: 1.5rem; }
        h1 { font-size: 1.25rem; font-weight: 600; }
        #last-updated { color: var(--muted); font-size: 0.875rem; }
        #alertBtn {
            padding: 0.5rem 1rem;
            border: none;
            border-radius: 0.375rem;
            background: #dc2626;
            color: #fff;
            font-weight: 600;
            cursor: pointer;
        }
        .cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 1rem; margin-bottom: 1.5rem; }
        .card { background: var(--surface); border: 1px solid var(--border); border-radius: 0.5rem; padding: 1rem; }
        .card h3 { font-size: 0.875rem; letter-spacing: 0.05em; color: var(--muted); margin-bottom: 0.5rem; }
        .card p { margin-top: 0.25rem; }
        .safe { color: #16a34a; font-weight: 600; }
        .unsafe { color: #dc2626; font-weight: 600; }
        .unknown { color: var(--muted); font-weight: 600; }
        .charts { display: grid; grid-template-columns: repeat(auto-fit, minmax(480px, 1fr)); gap: 1rem; }
        .chart { background: var(--surface); border: 1px solid var(--border); border-radius: 0.5rem; padding: 1rem; }
    </style>
</head>
<body>
    <div class="container">
        <header>
            <div>
                <h1>Water Quality Monitor</h1>
                <p id="last-updated">Last Updated: waiting for data</p>
            </div>
            <button id="alertBtn" style="display: none">Send Alert</button>
        </header>

        <section class="cards">
            <div class="card" id="ph-card"></div>
            <div class="card" id="tds-card"></div>
            <div class="card" id="turbidity-card"></div>
            <div class="card" id="temp-card"></div>
        </section>

        <section class="charts">
            <div class="chart"><canvas id="phChart"></canvas></div>
            <div class="chart"><canvas id="tdsChart"></canvas></div>
            <div class="chart"><canvas id="turbidityChart"></canvas></div>
            <div class="chart"><canvas id="tempChart"></canvas></div>
        </section>
    </div>

    <script>
        const POLL_MS = __POLL_MS__;
        const charts = {};

        document.getElementById("alertBtn").addEventListener("click", (e) => {
            const href = e.currentTarget.dataset.href;
            if (href) window.location.href = href;
        });

        function applySlots(slots) {
            for (const [id, slot] of Object.entries(slots)) {
                const el = document.getElementById(id);
                if (!el) continue;
                if (slot.html !== null) el.innerHTML = slot.html;
                if (slot.text !== null) el.textContent = slot.text;
                if (slot.href !== null) el.dataset.href = slot.href;
                el.style.display = slot.visible ? "" : "none";
            }
        }

        function chartJsConfig(config) {
            const s = config.series;
            return {
                type: config.kind,
                data: {
                    labels: config.labels,
                    datasets: [{
                        label: s.name,
                        data: s.values,
                        borderColor: s.color,
                        backgroundColor: s.fillColor,
                        fill: s.fill,
                        tension: s.tension,
                        pointRadius: s.pointRadius,
                        spanGaps: false
                    }]
                },
                options: {
                    responsive: true,
                    animation: false,
                    plugins: {
                        title: { display: true, text: config.title },
                        subtitle: { display: true, text: config.subtitle },
                        tooltip: { mode: "index", intersect: false }
                    },
                    scales: {
                        x: { title: { display: true, text: config.xAxisTitle }, ticks: { maxRotation: 0 } },
                        y: { title: { display: true, text: config.yAxisTitle } }
                    }
                }
            };
        }

        // A new handle means the server replaced the chart: destroy ours and build a fresh one
        function applyCharts(views) {
            for (const [canvasId, instance] of Object.entries(views)) {
                const current = charts[canvasId];
                if (current && instance && current.handle === instance.handle) continue;
                if (current) {
                    current.chart.destroy();
                    delete charts[canvasId];
                }
                if (!instance) continue;
                const canvas = document.getElementById(canvasId);
                if (!canvas) continue;
                try {
                    const chart = new Chart(canvas.getContext("2d"), chartJsConfig(instance.config));
                    charts[canvasId] = { handle: instance.handle, chart };
                } catch (err) {
                    console.warn("chart " + canvasId + " failed", err);
                }
            }
        }

        async function refresh() {
            try {
                const res = await fetch("/api/dashboard", { cache: "no-store" });
                if (res.ok) {
                    const view = await res.json();
                    applySlots(view.slots);
                    applyCharts(view.charts);
                }
            } catch (err) {
                console.warn("refresh failed", err);
            } finally {
                setTimeout(refresh, POLL_MS);
            }
        }

        refresh();
    </script>
</body>
</html>
"##;
