// Pre-filled alert message behind the dashboard's alert button

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl AlertMessage {
    pub fn new(recipient: String, subject: String, body: String) -> Self {
        Self {
            recipient,
            subject,
            body,
        }
    }

    /// `mailto:` link with percent-encoded subject and body
    pub fn mailto_href(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.recipient,
            urlencoding::encode(&self.subject),
            urlencoding::encode(&self.body)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mailto_href() {
        let alert = AlertMessage::new(
            "ops@example.org".to_string(),
            "Water Quality Alert".to_string(),
            "pH & TDS out of range".to_string(),
        );
        assert_eq!(
            alert.mailto_href(),
            "mailto:ops@example.org?subject=Water%20Quality%20Alert&body=pH%20%26%20TDS%20out%20of%20range"
        );
    }
}
