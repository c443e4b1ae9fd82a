//! Display port: the document layer a gallery view is committed to.

use crate::domain::entities::{GalleryView, PlaceholderId, RecordId};
use crate::domain::errors::GalleryError;

/// Port for the document layer.
///
/// Implementations replace their whole visible contents on `commit`.
#[cfg_attr(test, mockall::automock)]
pub trait DisplayPort: Send + Sync {
    /// Replaces the visible gallery with `view`.
    ///
    /// # Errors
    /// Returns error if the document cannot be updated.
    fn commit(&self, view: &GalleryView) -> Result<(), GalleryError>;

    /// Replaces the visible gallery with an error state.
    fn show_error(&self, message: &str);

    /// Swaps a placeholder's source for its real asset.
    fn resolve_placeholder(&self, id: PlaceholderId, src: &str);

    /// Enables or disables a record's rating control.
    fn set_rating_enabled(&self, record_id: &RecordId, enabled: bool);
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use parking_lot::Mutex;

    /// What a [`RecordingDisplay`] currently shows.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub enum Shown {
        /// Nothing committed yet.
        #[default]
        Blank,
        /// A committed gallery.
        Gallery(GalleryView),
        /// An error message.
        Error(String),
    }

    /// Display that records every call.
    #[derive(Default)]
    pub struct RecordingDisplay {
        shown: Mutex<Shown>,
        commits: Mutex<Vec<GalleryView>>,
        resolved: Mutex<Vec<(PlaceholderId, String)>>,
        toggles: Mutex<Vec<(RecordId, bool)>>,
    }

    impl RecordingDisplay {
        /// Creates a blank display.
        pub fn new() -> Self {
            Self::default()
        }

        /// Current contents.
        pub fn shown(&self) -> Shown {
            self.shown.lock().clone()
        }

        /// Every committed view, oldest first.
        pub fn commits(&self) -> Vec<GalleryView> {
            self.commits.lock().clone()
        }

        /// Every placeholder resolution, oldest first.
        pub fn resolved(&self) -> Vec<(PlaceholderId, String)> {
            self.resolved.lock().clone()
        }

        /// Every rating control toggle, oldest first.
        pub fn toggles(&self) -> Vec<(RecordId, bool)> {
            self.toggles.lock().clone()
        }
    }

    impl DisplayPort for RecordingDisplay {
        fn commit(&self, view: &GalleryView) -> Result<(), GalleryError> {
            self.commits.lock().push(view.clone());
            *self.shown.lock() = Shown::Gallery(view.clone());
            Ok(())
        }

        fn show_error(&self, message: &str) {
            *self.shown.lock() = Shown::Error(message.to_string());
        }

        fn resolve_placeholder(&self, id: PlaceholderId, src: &str) {
            self.resolved.lock().push((id, src.to_string()));
        }

        fn set_rating_enabled(&self, record_id: &RecordId, enabled: bool) {
            self.toggles.lock().push((record_id.clone(), enabled));
        }
    }
}
