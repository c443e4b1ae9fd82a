//! Viewport intersection notifications.

use super::view::PlaceholderId;

/// One entry of an intersection notification batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectionEntry {
    /// Observed placeholder.
    pub target: PlaceholderId,
    /// Whether the placeholder currently overlaps the viewport.
    pub is_intersecting: bool,
}

impl IntersectionEntry {
    /// Entry for a placeholder entering the viewport.
    #[must_use]
    pub const fn entering(target: PlaceholderId) -> Self {
        Self {
            target,
            is_intersecting: true,
        }
    }

    /// Entry for a placeholder outside the viewport.
    #[must_use]
    pub const fn leaving(target: PlaceholderId) -> Self {
        Self {
            target,
            is_intersecting: false,
        }
    }
}

/// A batch of entries delivered together.
pub type IntersectionBatch = Vec<IntersectionEntry>;
