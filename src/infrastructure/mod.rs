// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod page_view;
pub mod sheet_repository;
