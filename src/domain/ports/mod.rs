mod display_port;
mod image_api_port;
mod viewport_port;

pub use display_port::DisplayPort;
pub use image_api_port::ImageApiPort;
pub use viewport_port::ViewportPort;

#[cfg(test)]
pub use display_port::MockDisplayPort;
#[cfg(test)]
pub use viewport_port::MockViewportPort;

#[cfg(test)]
pub mod mocks {
    pub use super::display_port::mock::{RecordingDisplay, Shown};
    pub use super::image_api_port::mock::MockImageApi;
    pub use super::viewport_port::mock::RecordingViewport;
}
