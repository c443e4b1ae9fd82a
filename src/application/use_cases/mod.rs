//! Use case implementations.

mod load_gallery_use_case;
mod submit_rating_use_case;

pub use load_gallery_use_case::GalleryLoader;
pub use submit_rating_use_case::RatingSubmitter;
