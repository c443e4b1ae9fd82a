//! Rating selections made on a card's rating control.

use std::fmt;

use super::record::{MAX_RATING, RecordId};
use crate::domain::errors::GalleryError;

const STAR_SEPARATOR: &str = "-star-";

/// Builds the identifying attribute of one star option.
#[must_use]
pub fn control_id(record_id: &RecordId, star: u8) -> String {
    format!("{record_id}{STAR_SEPARATOR}{star}")
}

/// A user's choice of star value for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingSelection {
    /// Record the control belongs to.
    pub record_id: RecordId,
    /// Selected star value, `1..=5`.
    pub star: u8,
}

impl RatingSelection {
    /// Creates a selection, validating the star value.
    ///
    /// # Errors
    /// Returns `InvalidSelection` if the star is outside `1..=5`.
    pub fn new(record_id: impl Into<RecordId>, star: u8) -> Result<Self, GalleryError> {
        if !(1..=MAX_RATING).contains(&star) {
            return Err(GalleryError::invalid_selection(format!(
                "star value {star} outside 1..={MAX_RATING}"
            )));
        }
        Ok(Self {
            record_id: record_id.into(),
            star,
        })
    }

    /// Parses the identifying attribute `"{record_id}-star-{n}"`.
    ///
    /// The split happens at the last separator so identifiers that
    /// themselves contain hyphens are preserved.
    ///
    /// # Errors
    /// Returns `InvalidSelection` if the attribute is malformed.
    pub fn from_control_id(control_id: &str) -> Result<Self, GalleryError> {
        let (record_id, star) = control_id.rsplit_once(STAR_SEPARATOR).ok_or_else(|| {
            GalleryError::invalid_selection(format!("malformed control id '{control_id}'"))
        })?;

        if record_id.is_empty() {
            return Err(GalleryError::invalid_selection(format!(
                "missing record id in '{control_id}'"
            )));
        }

        let star = star.parse::<u8>().map_err(|e| {
            GalleryError::invalid_selection(format!("bad star value in '{control_id}': {e}"))
        })?;

        Self::new(record_id, star)
    }

    /// Rating value as sent on the wire.
    ///
    /// The value travels as a string, the way it is read back from the
    /// control's attribute.
    #[must_use]
    pub fn wire_value(&self) -> String {
        self.star.to_string()
    }
}

impl fmt::Display for RatingSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&control_id(&self.record_id, self.star))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_parse_simple_control_id() {
        let selection = RatingSelection::from_control_id("a-star-5").unwrap();
        assert_eq!(selection.record_id.as_str(), "a");
        assert_eq!(selection.star, 5);
        assert_eq!(selection.wire_value(), "5");
    }

    #[test]
    fn test_parse_hyphenated_record_id() {
        let selection = RatingSelection::from_control_id("64b-7f-star-2").unwrap();
        assert_eq!(selection.record_id.as_str(), "64b-7f");
        assert_eq!(selection.star, 2);
    }

    #[test]
    fn test_display_matches_control_id() {
        let selection = RatingSelection::new("abc", 4).unwrap();
        assert_eq!(selection.to_string(), control_id(&RecordId::new("abc"), 4));
    }

    #[test_case("a-star-0" ; "zero_star")]
    #[test_case("a-star-6" ; "six_stars")]
    #[test_case("a-star-x" ; "not_a_number")]
    #[test_case("-star-3" ; "empty_id")]
    #[test_case("a-3" ; "no_separator")]
    #[test_case("" ; "empty")]
    fn test_rejects_malformed(control_id: &str) {
        assert!(matches!(
            RatingSelection::from_control_id(control_id),
            Err(GalleryError::InvalidSelection { .. })
        ));
    }
}
