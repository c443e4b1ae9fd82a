//! Application layer with use cases and DTOs.

/// Data transfer objects.
pub mod dto;
/// Pure view construction, viewport watching and retry.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{LoadOutcome, SubmitOutcome};
pub use services::RetryPolicy;
pub use use_cases::{GalleryLoader, RatingSubmitter};
