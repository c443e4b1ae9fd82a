//! Viewport port: the intersection layer placeholders are registered with.

use crate::domain::entities::PlaceholderId;

/// Port for viewport intersection tracking.
///
/// Notifications travel separately, as
/// [`IntersectionBatch`](crate::domain::entities::IntersectionBatch) values
/// over a channel owned by the implementation.
#[cfg_attr(test, mockall::automock)]
pub trait ViewportPort: Send + Sync {
    /// Starts watching a placeholder.
    fn observe(&self, target: PlaceholderId);

    /// Stops watching a placeholder.
    fn unobserve(&self, target: PlaceholderId);
}
