//! Display adapter backing the terminal screen.

use parking_lot::RwLock;
use tokio::sync::Notify;
use tracing::trace;

use crate::domain::entities::{GalleryView, Placeholder, PlaceholderId, RecordId};
use crate::domain::errors::GalleryError;
use crate::domain::ports::DisplayPort;

/// What the terminal currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DisplaySnapshot {
    /// Nothing committed yet.
    #[default]
    Loading,
    /// A committed gallery.
    Gallery(GalleryView),
    /// An error message in place of the gallery.
    Error(String),
}

impl DisplaySnapshot {
    /// Committed view, if any.
    #[must_use]
    pub const fn view(&self) -> Option<&GalleryView> {
        match self {
            Self::Gallery(view) => Some(view),
            _ => None,
        }
    }
}

/// Keeps the latest committed state and wakes the UI on every change.
#[derive(Debug, Default)]
pub struct TerminalDisplay {
    snapshot: RwLock<DisplaySnapshot>,
    changed: Notify,
}

impl TerminalDisplay {
    /// Creates a display in the loading state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current contents.
    #[must_use]
    pub fn snapshot(&self) -> DisplaySnapshot {
        self.snapshot.read().clone()
    }

    /// Resolves once the contents changed. A change made while nobody waits
    /// is remembered for the next waiter.
    pub async fn changed(&self) {
        self.changed.notified().await;
    }

    fn update(&self, f: impl FnOnce(&mut DisplaySnapshot)) {
        f(&mut self.snapshot.write());
        self.changed.notify_one();
    }
}

impl DisplayPort for TerminalDisplay {
    fn commit(&self, view: &GalleryView) -> Result<(), GalleryError> {
        self.update(|snapshot| *snapshot = DisplaySnapshot::Gallery(view.clone()));
        Ok(())
    }

    fn show_error(&self, message: &str) {
        self.update(|snapshot| *snapshot = DisplaySnapshot::Error(message.to_string()));
    }

    fn resolve_placeholder(&self, id: PlaceholderId, _src: &str) {
        self.update(|snapshot| {
            let resolved = match snapshot {
                DisplaySnapshot::Gallery(view) => view
                    .placeholder_mut(id)
                    .is_some_and(Placeholder::resolve),
                _ => false,
            };
            if !resolved {
                trace!(placeholder = %id, "Placeholder not on screen");
            }
        });
    }

    fn set_rating_enabled(&self, record_id: &RecordId, enabled: bool) {
        self.update(|snapshot| {
            if let DisplaySnapshot::Gallery(view) = snapshot {
                view.set_rating_enabled(record_id, enabled);
            }
        });
    }
}
