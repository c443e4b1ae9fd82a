//! HTTP adapter for the image record server.

mod client;
mod dto;

pub use client::HttpImageApi;
pub use dto::{ImageRecordResponse, RatingUpdateRequest};
