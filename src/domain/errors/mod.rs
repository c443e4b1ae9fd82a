//! Domain error types.

mod gallery_error;

pub use gallery_error::GalleryError;
