//! Application services.

pub mod gallery_layout;
pub mod retry;
pub mod viewport_watcher;

pub use gallery_layout::{build_card, build_view};
pub use retry::RetryPolicy;
pub use viewport_watcher::{Resolution, ViewportWatcher};
