//! Rating submission use case.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::application::dto::SubmitOutcome;
use crate::application::services::retry::RetryPolicy;
use crate::application::use_cases::GalleryLoader;
use crate::domain::entities::{RatingSelection, RecordId};
use crate::domain::errors::GalleryError;
use crate::domain::ports::ImageApiPort;

/// Sends rating updates and reloads the gallery once they land.
pub struct RatingSubmitter {
    api: Arc<dyn ImageApiPort>,
    loader: Arc<GalleryLoader>,
    retry: RetryPolicy,
    in_flight: Mutex<HashSet<RecordId>>,
}

impl RatingSubmitter {
    /// Creates a new submitter.
    #[must_use]
    pub fn new(api: Arc<dyn ImageApiPort>, loader: Arc<GalleryLoader>) -> Self {
        Self {
            api,
            loader,
            retry: RetryPolicy::default(),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Sets the retry policy used for updates.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Returns true while an update for the record is in flight.
    #[must_use]
    pub fn is_in_flight(&self, record_id: &RecordId) -> bool {
        self.in_flight.lock().contains(record_id)
    }

    /// Submits the selection identified by a star option's control id,
    /// `"{record_id}-star-{n}"`.
    ///
    /// # Errors
    /// Returns `InvalidSelection` for malformed ids, otherwise see
    /// [`Self::submit_selection`].
    pub async fn submit(&self, control_id: &str) -> Result<SubmitOutcome, GalleryError> {
        let selection = RatingSelection::from_control_id(control_id)?;
        self.submit_selection(selection).await
    }

    /// Sends the update, then runs a full reload.
    ///
    /// The record's control is disabled while the request is in flight; a
    /// second selection for the same record during that time is ignored.
    ///
    /// # Errors
    /// Returns the update error (after re-enabling the control), or the
    /// reload error if the update succeeded but the reload failed.
    pub async fn submit_selection(
        &self,
        selection: RatingSelection,
    ) -> Result<SubmitOutcome, GalleryError> {
        if !self.in_flight.lock().insert(selection.record_id.clone()) {
            debug!(selection = %selection, "Update already in flight, ignoring selection");
            return Ok(SubmitOutcome::Ignored { selection });
        }

        let record_id = selection.record_id.clone();
        self.loader.set_rating_enabled(&record_id, false).await;

        info!(record_id = %record_id, rating = selection.star, "Submitting rating");
        let result = self
            .retry
            .run("update_rating", || self.api.update_rating(&selection))
            .await;

        self.in_flight.lock().remove(&record_id);

        if let Err(e) = result {
            warn!(record_id = %record_id, error = %e, "Rating update failed");
            self.loader.set_rating_enabled(&record_id, true).await;
            return Err(e);
        }

        self.loader.release_rating(&record_id).await;
        let reload = self.loader.load().await?;

        Ok(SubmitOutcome::Submitted { selection, reload })
    }
}
