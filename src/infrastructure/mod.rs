//! Infrastructure layer with external service adapters.

/// Image server HTTP client.
pub mod api;
/// Application configuration.
pub mod config;
/// In-memory HTML document.
pub mod document;
/// Headless viewport.
pub mod viewport;

pub use api::HttpImageApi;
pub use config::{AppConfig, CliArgs, Command, ConfigStore, LogLevel};
pub use document::HtmlDocument;
pub use viewport::{ScrollViewport, ViewportGeometry};
