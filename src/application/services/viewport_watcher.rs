//! Deferred image loading driven by viewport intersections.
//!
//! One [`ViewportWatcher`] exists per load cycle. It registers the cycle's
//! placeholders with the viewport port and resolves each one at most once,
//! the first time it is reported intersecting.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::domain::entities::{CycleId, IntersectionEntry, Placeholder, PlaceholderId};
use crate::domain::ports::ViewportPort;

/// A placeholder that just switched to its real source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Resolved placeholder.
    pub id: PlaceholderId,
    /// Source to apply, equal to the deferred source.
    pub src: String,
}

/// Watches one cycle's placeholders.
pub struct ViewportWatcher {
    cycle: CycleId,
    viewport: Arc<dyn ViewportPort>,
    pending: HashMap<PlaceholderId, String>,
    disposed: bool,
}

impl std::fmt::Debug for ViewportWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportWatcher")
            .field("cycle", &self.cycle)
            .field("pending", &self.pending.len())
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

impl ViewportWatcher {
    /// Creates a watcher for the given cycle.
    #[must_use]
    pub fn new(cycle: CycleId, viewport: Arc<dyn ViewportPort>) -> Self {
        Self {
            cycle,
            viewport,
            pending: HashMap::new(),
            disposed: false,
        }
    }

    /// Cycle this watcher belongs to.
    #[must_use]
    pub const fn cycle(&self) -> CycleId {
        self.cycle
    }

    /// Number of placeholders still waiting to be resolved.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if the placeholder is still registered.
    #[must_use]
    pub fn is_pending(&self, id: PlaceholderId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Registers every pending placeholder of this cycle.
    pub fn observe_placeholders<'a>(
        &mut self,
        placeholders: impl IntoIterator<Item = &'a Placeholder>,
    ) {
        if self.disposed {
            return;
        }

        for placeholder in placeholders {
            if placeholder.id.cycle != self.cycle || placeholder.is_resolved() {
                continue;
            }
            if self
                .pending
                .insert(placeholder.id, placeholder.deferred_src.clone())
                .is_none()
            {
                self.viewport.observe(placeholder.id);
            }
        }

        debug!(cycle = %self.cycle, count = self.pending.len(), "Observing placeholders");
    }

    /// Handles one notification batch.
    ///
    /// Each intersecting placeholder still pending here is deregistered and
    /// resolved. Everything else is left untouched.
    pub fn on_intersection(&mut self, batch: &[IntersectionEntry]) -> Vec<Resolution> {
        if self.disposed {
            return Vec::new();
        }

        let mut resolved = Vec::new();
        for entry in batch.iter().filter(|e| e.is_intersecting) {
            let Some(src) = self.pending.remove(&entry.target) else {
                trace!(target_id = %entry.target, "Ignoring entry for unknown placeholder");
                continue;
            };
            self.viewport.unobserve(entry.target);
            resolved.push(Resolution {
                id: entry.target,
                src,
            });
        }

        if !resolved.is_empty() {
            debug!(
                cycle = %self.cycle,
                resolved = resolved.len(),
                remaining = self.pending.len(),
                "Resolved placeholders"
            );
        }
        resolved
    }

    /// Drops every remaining registration. Later batches are ignored.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        for id in self.pending.keys() {
            self.viewport.unobserve(*id);
        }
        debug!(cycle = %self.cycle, dropped = self.pending.len(), "Disposed viewport watcher");
        self.pending.clear();
        self.disposed = true;
    }
}

impl Drop for ViewportWatcher {
    fn drop(&mut self) {
        self.dispose();
    }
}
