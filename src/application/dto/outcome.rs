//! Results reported by the gallery use cases.

use crate::domain::entities::{CycleId, RatingSelection};

/// Result of one load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The cycle's view was committed and its placeholders observed.
    Rendered {
        /// Cycle that rendered.
        cycle: CycleId,
        /// Number of rows committed.
        rows: usize,
        /// Number of cards committed.
        cards: usize,
    },
    /// A newer cycle started before this one finished; nothing was committed.
    Superseded {
        /// Cycle that was discarded.
        cycle: CycleId,
        /// Newest cycle at the time of discarding.
        latest: CycleId,
    },
}

impl LoadOutcome {
    /// Returns true if the cycle committed a view.
    #[must_use]
    pub const fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }

    /// Cycle the outcome belongs to.
    #[must_use]
    pub const fn cycle(&self) -> CycleId {
        match self {
            Self::Rendered { cycle, .. } | Self::Superseded { cycle, .. } => *cycle,
        }
    }
}

/// Result of a rating submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The update was accepted and a reload ran.
    Submitted {
        /// Submitted selection.
        selection: RatingSelection,
        /// Outcome of the reload that followed.
        reload: LoadOutcome,
    },
    /// An update for the same record was already in flight.
    Ignored {
        /// Selection that was dropped.
        selection: RatingSelection,
    },
}
