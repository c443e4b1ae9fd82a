//! Image record entity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Highest star value a record can carry.
pub const MAX_RATING: u8 = 5;

/// Server-side identifier of an image record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Creates a new identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Star rating in `0..=5`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    /// Creates a rating, clamping values above the maximum.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        if value > MAX_RATING {
            Self(MAX_RATING)
        } else {
            Self(value)
        }
    }

    /// Creates a rating from an arbitrary integer, clamping into range.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn clamped(value: i64) -> Self {
        if value < 0 {
            Self(0)
        } else if value > MAX_RATING as i64 {
            Self(MAX_RATING)
        } else {
            Self(value as u8)
        }
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns true if a star with the given value renders filled.
    #[must_use]
    pub const fn fills(self, star: u8) -> bool {
        self.0 >= star
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One image's server-held metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// Record identifier.
    pub id: RecordId,
    /// URI of the full-resolution asset.
    pub image: String,
    /// Human readable description, also used as alt text.
    pub description: String,
    /// Current rating.
    pub rating: Rating,
}

impl ImageRecord {
    /// Creates a new record.
    #[must_use]
    pub fn new(
        id: impl Into<RecordId>,
        image: impl Into<String>,
        description: impl Into<String>,
        rating: Rating,
    ) -> Self {
        Self {
            id: id.into(),
            image: image.into(),
            description: description.into(),
            rating,
        }
    }

    /// Caption shown under the card.
    #[must_use]
    pub fn caption(&self) -> String {
        format!("{} ({})", self.description, self.rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_clamps() {
        assert_eq!(Rating::new(9).value(), 5);
        assert_eq!(Rating::clamped(-3).value(), 0);
        assert_eq!(Rating::clamped(4).value(), 4);
        assert_eq!(Rating::clamped(42).value(), 5);
    }

    #[test]
    fn test_rating_fills() {
        let rating = Rating::new(3);
        assert!(rating.fills(1));
        assert!(rating.fills(3));
        assert!(!rating.fills(4));
        assert!(!Rating::default().fills(1));
    }

    #[test]
    fn test_caption_format() {
        let record = ImageRecord::new("a", "x.jpg", "cat", Rating::new(3));
        assert_eq!(record.caption(), "cat (3)");
    }
}
