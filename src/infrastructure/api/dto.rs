use serde::{Deserialize, Serialize};

use crate::domain::entities::{ImageRecord, Rating};
use crate::domain::errors::GalleryError;
use crate::domain::serde_utils::{lenient_rating, string_or_number};

/// Image record as served by `GET /api/images`.
#[derive(Debug, Deserialize)]
pub struct ImageRecordResponse {
    /// Document-store identifier. Wins over `id` when both are sent.
    #[serde(
        rename = "_id",
        default,
        deserialize_with = "string_or_number::option::deserialize"
    )]
    pub document_id: Option<String>,
    /// Plain record identifier.
    #[serde(default, deserialize_with = "string_or_number::option::deserialize")]
    pub id: Option<String>,
    /// Asset URI.
    pub image: String,
    /// Description text.
    #[serde(default)]
    pub description: String,
    /// Rating, clamped into range on conversion.
    #[serde(default, deserialize_with = "lenient_rating::deserialize")]
    pub rating: i64,
}

impl TryFrom<ImageRecordResponse> for ImageRecord {
    type Error = GalleryError;

    fn try_from(response: ImageRecordResponse) -> Result<Self, Self::Error> {
        let Some(id) = response.document_id.or(response.id) else {
            return Err(GalleryError::parse(format!(
                "record '{}' has no id",
                response.image
            )));
        };

        Ok(Self::new(
            id,
            response.image,
            response.description,
            Rating::clamped(response.rating),
        ))
    }
}

/// Body of `PUT /api/images/{id}`.
#[derive(Debug, Serialize)]
pub struct RatingUpdateRequest {
    /// Selected star value, sent as a string.
    pub rating: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Vec<ImageRecord>, GalleryError> {
        serde_json::from_str::<Vec<ImageRecordResponse>>(json)
            .unwrap()
            .into_iter()
            .map(ImageRecord::try_from)
            .collect()
    }

    #[test]
    fn test_parses_document_store_ids() {
        let json = r#"[
            {"_id": "5f1", "image": "x.jpg", "description": "cat", "rating": 3},
            {"id": 7, "image": "y.jpg", "description": "dog", "rating": 9},
            {"id": "z", "image": "z.jpg"}
        ]"#;

        let records = parse(json).unwrap();

        assert_eq!(records[0].id.as_str(), "5f1");
        assert_eq!(records[0].rating.value(), 3);
        assert_eq!(records[1].id.as_str(), "7");
        assert_eq!(records[1].rating.value(), 5);
        assert_eq!(records[2].description, "");
        assert_eq!(records[2].rating.value(), 0);
    }

    #[test]
    fn test_document_store_id_wins_over_virtual_id() {
        let json = r#"[
            {"_id": "5f1", "id": "5f1", "image": "x.jpg", "description": "cat", "rating": 3},
            {"_id": 8, "id": "other", "image": "y.jpg"},
            {"_id": null, "id": "z", "image": "z.jpg"}
        ]"#;

        let records = parse(json).unwrap();

        assert_eq!(records[0].id.as_str(), "5f1");
        assert_eq!(records[0].caption(), "cat (3)");
        assert_eq!(records[1].id.as_str(), "8");
        assert_eq!(records[2].id.as_str(), "z");
    }

    #[test]
    fn test_record_without_id_is_rejected() {
        let result = parse(r#"[{"image": "x.jpg", "description": "cat"}]"#);
        assert!(matches!(result, Err(GalleryError::Parse { .. })));
    }

    #[test]
    fn test_update_body_sends_string_rating() {
        let body = serde_json::to_string(&RatingUpdateRequest {
            rating: "5".to_string(),
        })
        .unwrap();
        assert_eq!(body, r#"{"rating":"5"}"#);
    }
}
