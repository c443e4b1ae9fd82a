//! Image API port definition.

use async_trait::async_trait;

use crate::domain::entities::{ImageRecord, RatingSelection};
use crate::domain::errors::GalleryError;

/// Port for the image record server.
#[async_trait]
pub trait ImageApiPort: Send + Sync {
    /// Fetches the full list of image records.
    async fn fetch_images(&self) -> Result<Vec<ImageRecord>, GalleryError>;

    /// Submits a new rating for one record.
    async fn update_rating(&self, selection: &RatingSelection) -> Result<(), GalleryError>;
}
