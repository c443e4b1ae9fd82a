//! Headless viewport with fixed row geometry.
//!
//! Placeholders sit on grid rows of equal height. The viewport reports an
//! initial entry for every newly observed placeholder, then an entry
//! whenever a scroll changes a placeholder's intersecting state. Entries
//! queue up until [`ScrollViewport::flush`] delivers them as one batch.

use std::collections::BTreeMap;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::domain::entities::{IntersectionBatch, IntersectionEntry, PlaceholderId};
use crate::domain::ports::ViewportPort;

/// Size of the viewport and of one grid row, in abstract units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportGeometry {
    /// Height of one grid row.
    pub row_height: u32,
    /// Visible height.
    pub height: u32,
}

impl ViewportGeometry {
    /// Creates geometry, treating a zero row height as one.
    #[must_use]
    pub const fn new(row_height: u32, height: u32) -> Self {
        Self {
            row_height: if row_height == 0 { 1 } else { row_height },
            height,
        }
    }

    /// Returns true if `row` overlaps the viewport scrolled to `offset`.
    #[must_use]
    pub fn row_visible(&self, row: usize, offset: u32) -> bool {
        let top = u64::try_from(row)
            .unwrap_or(u64::MAX)
            .saturating_mul(u64::from(self.row_height));
        let bottom = top.saturating_add(u64::from(self.row_height));
        let view_top = u64::from(offset);
        let view_bottom = view_top.saturating_add(u64::from(self.height));
        top < view_bottom && bottom > view_top
    }

    /// Number of whole rows that fit on screen, at least one.
    #[must_use]
    pub fn rows_per_screen(&self) -> usize {
        usize::try_from((self.height / self.row_height).max(1)).unwrap_or(1)
    }

    /// Largest useful scroll offset for a grid of `rows`.
    #[must_use]
    pub fn max_offset(&self, rows: usize) -> u32 {
        let content = u32::try_from(rows)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.row_height);
        content.saturating_sub(self.height)
    }
}

impl Default for ViewportGeometry {
    fn default() -> Self {
        Self::new(12, 24)
    }
}

#[derive(Debug, Default)]
struct ViewportState {
    offset: u32,
    observed: BTreeMap<PlaceholderId, bool>,
    queued: Vec<IntersectionEntry>,
}

/// Intersection source driven by explicit scroll calls.
#[derive(Debug)]
pub struct ScrollViewport {
    geometry: ViewportGeometry,
    state: Mutex<ViewportState>,
    tx: mpsc::UnboundedSender<IntersectionBatch>,
}

impl ScrollViewport {
    /// Creates a viewport at offset zero and the receiver its batches go to.
    #[must_use]
    pub fn new(geometry: ViewportGeometry) -> (Self, mpsc::UnboundedReceiver<IntersectionBatch>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                geometry,
                state: Mutex::new(ViewportState::default()),
                tx,
            },
            rx,
        )
    }

    /// Viewport geometry.
    #[must_use]
    pub const fn geometry(&self) -> ViewportGeometry {
        self.geometry
    }

    /// Current scroll offset.
    #[must_use]
    pub fn offset(&self) -> u32 {
        self.state.lock().offset
    }

    /// Number of placeholders currently observed.
    #[must_use]
    pub fn observed_count(&self) -> usize {
        self.state.lock().observed.len()
    }

    /// Scrolls to an absolute offset, queueing entries for every observed
    /// placeholder whose intersecting state changed.
    pub fn scroll_to(&self, offset: u32) {
        let mut state = self.state.lock();
        state.offset = offset;

        let ViewportState {
            observed, queued, ..
        } = &mut *state;
        for (id, intersecting) in observed.iter_mut() {
            let now = self.geometry.row_visible(id.row(), offset);
            if now != *intersecting {
                *intersecting = now;
                queued.push(IntersectionEntry {
                    target: *id,
                    is_intersecting: now,
                });
            }
        }
        trace!(offset, queued = queued.len(), "Scrolled viewport");
    }

    /// Scrolls by a signed delta, clamped at zero and at `max_offset`.
    pub fn scroll_by(&self, delta: i64, max_offset: u32) {
        let current = i64::from(self.offset());
        let target = (current + delta).clamp(0, i64::from(max_offset));
        self.scroll_to(u32::try_from(target).unwrap_or(0));
    }

    /// Delivers queued entries as one batch. Returns false if nothing was
    /// queued or the receiver is gone.
    pub fn flush(&self) -> bool {
        let batch = std::mem::take(&mut self.state.lock().queued);
        if batch.is_empty() {
            return false;
        }
        let size = batch.len();
        if self.tx.send(batch).is_err() {
            debug!("Intersection receiver dropped");
            return false;
        }
        trace!(size, "Delivered intersection batch");
        true
    }
}

impl ViewportPort for ScrollViewport {
    fn observe(&self, target: PlaceholderId) {
        let mut state = self.state.lock();
        let intersecting = self.geometry.row_visible(target.row(), state.offset);
        if state.observed.insert(target, intersecting).is_none() {
            state.queued.push(IntersectionEntry {
                target,
                is_intersecting: intersecting,
            });
        }
    }

    fn unobserve(&self, target: PlaceholderId) {
        let mut state = self.state.lock();
        state.observed.remove(&target);
        state.queued.retain(|entry| entry.target != target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::CycleId;
    use test_case::test_case;

    fn id(index: usize) -> PlaceholderId {
        PlaceholderId::new(CycleId(1), index)
    }

    #[test_case(0, 0, true ; "first_row_at_top")]
    #[test_case(1, 0, true ; "second_row_at_top")]
    #[test_case(2, 0, false ; "third_row_below_fold")]
    #[test_case(0, 12, false ; "first_row_scrolled_past")]
    #[test_case(2, 13, true ; "third_row_partially_visible")]
    fn test_row_visible(row: usize, offset: u32, expected: bool) {
        assert_eq!(ViewportGeometry::new(12, 24).row_visible(row, offset), expected);
    }

    #[test]
    fn test_max_offset() {
        let geometry = ViewportGeometry::new(10, 25);
        assert_eq!(geometry.max_offset(1), 0);
        assert_eq!(geometry.max_offset(5), 25);
        assert_eq!(geometry.rows_per_screen(), 2);
    }

    #[test]
    fn test_observe_queues_initial_entries() {
        let (viewport, mut rx) = ScrollViewport::new(ViewportGeometry::new(12, 24));
        for index in 0..9 {
            viewport.observe(id(index));
        }

        assert!(viewport.flush());
        let batch = rx.try_recv().unwrap();
        assert_eq!(batch.len(), 9);
        let visible: Vec<usize> = batch
            .iter()
            .filter(|e| e.is_intersecting)
            .map(|e| e.target.index)
            .collect();
        assert_eq!(visible, vec![0, 1, 2, 3, 4, 5]);
        assert!(!viewport.flush());
    }

    #[test]
    fn test_scroll_reports_changes_only() {
        let (viewport, mut rx) = ScrollViewport::new(ViewportGeometry::new(12, 12));
        viewport.observe(id(0));
        viewport.observe(id(3));
        viewport.flush();
        let _initial = rx.try_recv().unwrap();

        viewport.scroll_to(12);
        viewport.flush();
        let batch = rx.try_recv().unwrap();
        assert_eq!(
            batch,
            vec![IntersectionEntry::leaving(id(0)), IntersectionEntry::entering(id(3))]
        );

        viewport.scroll_to(12);
        assert!(!viewport.flush());
    }

    #[test]
    fn test_unobserve_drops_queued_entries() {
        let (viewport, mut rx) = ScrollViewport::new(ViewportGeometry::default());
        viewport.observe(id(0));
        viewport.observe(id(1));
        viewport.unobserve(id(0));

        viewport.flush();
        let batch = rx.try_recv().unwrap();
        assert_eq!(batch, vec![IntersectionEntry::entering(id(1))]);
        assert_eq!(viewport.observed_count(), 1);
    }

    #[test]
    fn test_scroll_by_clamps() {
        let (viewport, _rx) = ScrollViewport::new(ViewportGeometry::default());
        viewport.scroll_by(-5, 100);
        assert_eq!(viewport.offset(), 0);
        viewport.scroll_by(500, 100);
        assert_eq!(viewport.offset(), 100);
    }

    #[test]
    fn test_flush_without_receiver() {
        let (viewport, rx) = ScrollViewport::new(ViewportGeometry::default());
        drop(rx);
        viewport.observe(id(0));
        assert!(!viewport.flush());
    }
}
