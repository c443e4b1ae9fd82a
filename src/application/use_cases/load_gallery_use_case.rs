//! Gallery load cycle: fetch, render, observe.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, mpsc};
use tracing::{debug, error, info, warn};

use crate::application::dto::LoadOutcome;
use crate::application::services::gallery_layout::build_view;
use crate::application::services::retry::RetryPolicy;
use crate::application::services::viewport_watcher::ViewportWatcher;
use crate::domain::entities::{CycleId, GalleryView, IntersectionBatch, IntersectionEntry, RecordId};
use crate::domain::errors::GalleryError;
use crate::domain::ports::{DisplayPort, ImageApiPort, ViewportPort};

#[derive(Default)]
struct LoaderState {
    current: Option<GalleryView>,
    watcher: Option<ViewportWatcher>,
    disabled: HashSet<RecordId>,
}

impl LoaderState {
    fn clear(&mut self) {
        if let Some(mut previous) = self.watcher.take() {
            previous.dispose();
        }
        self.current = None;
    }
}

/// Owns the current gallery view and runs load cycles.
pub struct GalleryLoader {
    api: Arc<dyn ImageApiPort>,
    display: Arc<dyn DisplayPort>,
    viewport: Arc<dyn ViewportPort>,
    retry: RetryPolicy,
    latest_cycle: AtomicU64,
    state: Mutex<LoaderState>,
}

impl std::fmt::Debug for GalleryLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GalleryLoader")
            .field("retry", &self.retry)
            .field("latest_cycle", &self.latest_cycle)
            .finish_non_exhaustive()
    }
}

impl GalleryLoader {
    /// Creates a loader that has not rendered anything yet.
    #[must_use]
    pub fn new(
        api: Arc<dyn ImageApiPort>,
        display: Arc<dyn DisplayPort>,
        viewport: Arc<dyn ViewportPort>,
    ) -> Self {
        Self {
            api,
            display,
            viewport,
            retry: RetryPolicy::default(),
            latest_cycle: AtomicU64::new(0),
            state: Mutex::new(LoaderState::default()),
        }
    }

    /// Sets the retry policy used for fetches.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Newest cycle started so far.
    #[must_use]
    pub fn latest_cycle(&self) -> CycleId {
        CycleId(self.latest_cycle.load(Ordering::SeqCst))
    }

    /// Runs one load cycle.
    ///
    /// Fetches every record, builds the grid, replaces the displayed view
    /// and installs a fresh viewport watcher. A cycle overtaken by a newer
    /// one while fetching is discarded without touching the display.
    ///
    /// # Errors
    /// Returns the fetch error once retries are exhausted, or a display
    /// error if the view cannot be committed. Either way the display is
    /// left in the error state with nothing observed.
    pub async fn load(&self) -> Result<LoadOutcome, GalleryError> {
        let cycle = CycleId(self.latest_cycle.fetch_add(1, Ordering::SeqCst) + 1);
        debug!(cycle = %cycle, "Starting load cycle");

        let records = match self
            .retry
            .run("fetch_images", || self.api.fetch_images())
            .await
        {
            Ok(records) => records,
            Err(e) => {
                self.fail_cycle(cycle, &e).await;
                return Err(e);
            }
        };

        let mut view = build_view(cycle, &records);

        let mut state = self.state.lock().await;
        let latest = self.latest_cycle();
        if latest != cycle {
            warn!(cycle = %cycle, latest = %latest, "Discarding superseded load cycle");
            return Ok(LoadOutcome::Superseded { cycle, latest });
        }

        for record_id in &state.disabled {
            view.set_rating_enabled(record_id, false);
        }

        if let Err(e) = self.display.commit(&view) {
            error!(cycle = %cycle, error = %e, "Failed to commit gallery");
            state.clear();
            self.display.show_error(&format!("Could not render images: {e}"));
            return Err(e);
        }
        state.clear();

        let mut watcher = ViewportWatcher::new(cycle, self.viewport.clone());
        watcher.observe_placeholders(view.placeholders());

        let outcome = LoadOutcome::Rendered {
            cycle,
            rows: view.rows.len(),
            cards: view.card_count(),
        };
        info!(
            cycle = %cycle,
            rows = view.rows.len(),
            cards = view.card_count(),
            "Gallery rendered"
        );

        state.watcher = Some(watcher);
        state.current = Some(view);

        Ok(outcome)
    }

    async fn fail_cycle(&self, cycle: CycleId, e: &GalleryError) {
        error!(cycle = %cycle, error = %e, "Failed to load gallery");

        let mut state = self.state.lock().await;
        if self.latest_cycle() != cycle {
            return;
        }
        state.clear();
        self.display.show_error(&format!("Could not load images: {e}"));
    }

    /// Applies one intersection batch to the current cycle.
    /// Returns the number of placeholders resolved.
    pub async fn handle_intersections(&self, batch: &[IntersectionEntry]) -> usize {
        let mut state = self.state.lock().await;
        let LoaderState {
            current, watcher, ..
        } = &mut *state;

        let Some(watcher) = watcher.as_mut() else {
            return 0;
        };

        let resolutions = watcher.on_intersection(batch);
        for resolution in &resolutions {
            if let Some(placeholder) = current
                .as_mut()
                .and_then(|view| view.placeholder_mut(resolution.id))
            {
                placeholder.resolve();
            }
            self.display.resolve_placeholder(resolution.id, &resolution.src);
        }
        resolutions.len()
    }

    /// Consumes intersection batches until the sender side closes.
    pub async fn process_intersections(
        &self,
        mut batches: mpsc::UnboundedReceiver<IntersectionBatch>,
    ) {
        while let Some(batch) = batches.recv().await {
            self.handle_intersections(&batch).await;
        }
        debug!("Intersection channel closed");
    }

    /// Enables or disables a record's rating control in the current view
    /// and on the display. Disabled records stay disabled across reloads.
    pub async fn set_rating_enabled(&self, record_id: &RecordId, enabled: bool) {
        let mut state = self.state.lock().await;
        if enabled {
            state.disabled.remove(record_id);
        } else {
            state.disabled.insert(record_id.clone());
        }
        if let Some(view) = state.current.as_mut() {
            view.set_rating_enabled(record_id, enabled);
        }
        self.display.set_rating_enabled(record_id, enabled);
    }

    /// Forgets a disabled record without touching the display, so the next
    /// cycle renders its control enabled.
    pub async fn release_rating(&self, record_id: &RecordId) {
        self.state.lock().await.disabled.remove(record_id);
    }

    /// Snapshot of the current view.
    pub async fn current_view(&self) -> Option<GalleryView> {
        self.state.lock().await.current.clone()
    }

    /// Placeholders of the current cycle still waiting for the viewport.
    pub async fn pending_placeholders(&self) -> usize {
        self.state
            .lock()
            .await
            .watcher
            .as_ref()
            .map_or(0, ViewportWatcher::pending_count)
    }
}
