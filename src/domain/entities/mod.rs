//! Domain entity definitions.

mod intersection;
mod record;
mod selection;
mod view;
mod view_node;

pub use intersection::{IntersectionBatch, IntersectionEntry};
pub use record::{ImageRecord, MAX_RATING, Rating, RecordId};
pub use selection::{RatingSelection, control_id};
pub use view::{
    CARDS_PER_ROW, Card, CycleId, GalleryView, PIXEL_PLACEHOLDER, Placeholder, PlaceholderId,
    PlaceholderState, RatingControl, Row, StarOption,
};
pub use view_node::ViewNode;
