//! Domain layer with core gallery entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Serde utilities.
pub mod serde_utils;

pub use entities::{GalleryView, ImageRecord, Rating, RecordId};
pub use errors::GalleryError;
pub use ports::{DisplayPort, ImageApiPort, ViewportPort};
