//! Configuration management for the roster board

mod app;

pub use app::AppConfig;
