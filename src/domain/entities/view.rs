//! Typed description of the rendered gallery.
//!
//! A [`GalleryView`] is a plain value built from records; it carries no
//! handle to any display. [`GalleryView::to_node`] lowers it into the
//! generic element tree a document layer understands.

use std::fmt;

use super::record::{MAX_RATING, Rating, RecordId};
use super::selection::control_id;
use super::view_node::ViewNode;

/// Fixed 1x1 transparent PNG every placeholder starts with.
pub const PIXEL_PLACEHOLDER: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mOMrgcAATsA3BT31OAAAAAASUVORK5CYII=";

/// Number of cards per grid row.
pub const CARDS_PER_ROW: usize = 3;

const STAR_LABELS: [&str; MAX_RATING as usize] =
    ["One Star", "Two Stars", "Three Stars", "Four Stars", "Five Stars"];

/// Identifier of one load cycle. Strictly increasing per loader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CycleId(pub u64);

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an image placeholder, unique across cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlaceholderId {
    /// Cycle that rendered the placeholder.
    pub cycle: CycleId,
    /// Zero-based index of the card in the grid.
    pub index: usize,
}

impl PlaceholderId {
    /// Creates a new placeholder identifier.
    #[must_use]
    pub const fn new(cycle: CycleId, index: usize) -> Self {
        Self { cycle, index }
    }

    /// Grid row the placeholder sits in.
    #[must_use]
    pub const fn row(&self) -> usize {
        self.index / CARDS_PER_ROW
    }
}

impl fmt::Display for PlaceholderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gallery-{}-img-{}", self.cycle, self.index)
    }
}

/// Loading state of a placeholder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaceholderState {
    /// Still showing the inert pixel.
    #[default]
    Pending,
    /// Showing the real asset.
    Resolved,
}

/// Image stand-in that swaps to its deferred source once visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Element identifier.
    pub id: PlaceholderId,
    /// Real asset URI, applied on resolution.
    pub deferred_src: String,
    /// Accessible alt text.
    pub alt: String,
    /// Current state.
    pub state: PlaceholderState,
}

impl Placeholder {
    /// Creates a pending placeholder.
    #[must_use]
    pub fn new(id: PlaceholderId, deferred_src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            id,
            deferred_src: deferred_src.into(),
            alt: alt.into(),
            state: PlaceholderState::Pending,
        }
    }

    /// Effective image source.
    #[must_use]
    pub fn src(&self) -> &str {
        match self.state {
            PlaceholderState::Pending => PIXEL_PLACEHOLDER,
            PlaceholderState::Resolved => &self.deferred_src,
        }
    }

    /// Returns true once resolved.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self.state, PlaceholderState::Resolved)
    }

    /// Resolves the placeholder. Returns false if it was already resolved.
    pub fn resolve(&mut self) -> bool {
        if self.is_resolved() {
            return false;
        }
        self.state = PlaceholderState::Resolved;
        true
    }
}

/// One selectable star of a rating control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarOption {
    /// Star value, `1..=5`.
    pub value: u8,
    /// Identifying attribute, `"{record_id}-star-{value}"`.
    pub control_id: String,
    /// Accessible label.
    pub label: &'static str,
    /// Whether the star renders filled.
    pub filled: bool,
}

/// Five ordered star options bound to one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingControl {
    /// Record the control rates.
    pub record_id: RecordId,
    /// Rating the control was seeded with.
    pub rating: Rating,
    /// Star options in ascending order.
    pub options: Vec<StarOption>,
    /// False while an update for this record is in flight.
    pub enabled: bool,
}

impl RatingControl {
    /// Builds the control for a record's current rating.
    #[must_use]
    pub fn new(record_id: RecordId, rating: Rating) -> Self {
        let options = (1..=MAX_RATING)
            .zip(STAR_LABELS)
            .map(|(value, label)| StarOption {
                value,
                control_id: control_id(&record_id, value),
                label,
                filled: rating.fills(value),
            })
            .collect();

        Self {
            record_id,
            rating,
            options,
            enabled: true,
        }
    }

    /// Number of filled stars.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.options.iter().filter(|o| o.filled).count()
    }
}

/// One card of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Image stand-in.
    pub placeholder: Placeholder,
    /// Star rating control.
    pub rating: RatingControl,
    /// Caption text, `"{description} ({rating})"`.
    pub caption: String,
}

impl Card {
    /// Record the card was built from.
    #[must_use]
    pub const fn record_id(&self) -> &RecordId {
        &self.rating.record_id
    }
}

/// One grid row holding up to three cards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    /// Cards in input order.
    pub cards: Vec<Card>,
}

/// The whole rendered gallery for one load cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryView {
    /// Cycle that produced this view.
    pub cycle: CycleId,
    /// Rows in display order.
    pub rows: Vec<Row>,
}

impl GalleryView {
    /// Returns an empty view for the cycle.
    #[must_use]
    pub const fn empty(cycle: CycleId) -> Self {
        Self {
            cycle,
            rows: Vec::new(),
        }
    }

    /// Iterates over every card in display order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.rows.iter().flat_map(|row| row.cards.iter())
    }

    /// Total card count.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.rows.iter().map(|row| row.cards.len()).sum()
    }

    /// Returns true if the view has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.card_count() == 0
    }

    /// Iterates over every placeholder in display order.
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.cards().map(|card| &card.placeholder)
    }

    /// Looks up a placeholder by identifier.
    #[must_use]
    pub fn placeholder(&self, id: PlaceholderId) -> Option<&Placeholder> {
        self.placeholders().find(|p| p.id == id)
    }

    /// Mutable placeholder lookup.
    pub fn placeholder_mut(&mut self, id: PlaceholderId) -> Option<&mut Placeholder> {
        self.rows
            .iter_mut()
            .flat_map(|row| row.cards.iter_mut())
            .map(|card| &mut card.placeholder)
            .find(|p| p.id == id)
    }

    /// Looks up the card for a record.
    #[must_use]
    pub fn card(&self, record_id: &RecordId) -> Option<&Card> {
        self.cards().find(|card| card.record_id() == record_id)
    }

    /// Enables or disables the rating control of a record.
    /// Returns false if no card matches.
    pub fn set_rating_enabled(&mut self, record_id: &RecordId, enabled: bool) -> bool {
        let mut found = false;
        for card in self.rows.iter_mut().flat_map(|row| row.cards.iter_mut()) {
            if card.record_id() == record_id {
                card.rating.enabled = enabled;
                found = true;
            }
        }
        found
    }

    /// Lowers the view into an element tree.
    #[must_use]
    pub fn to_node(&self) -> ViewNode {
        let mut container = ViewNode::new("div").class("container");
        for row in &self.rows {
            let mut row_node = ViewNode::new("div").class("row");
            for card in &row.cards {
                row_node.append(ViewNode::new("div").class("col-md-4 mt-4").child(card.to_node()));
            }
            container.append(row_node);
        }
        container
    }
}

impl Card {
    /// Lowers the card into an element tree.
    #[must_use]
    pub fn to_node(&self) -> ViewNode {
        let placeholder = &self.placeholder;
        let mut img = ViewNode::new("img")
            .class("card-img-top card__image--cover lazy-image")
            .attr("id", placeholder.id.to_string())
            .attr("src", placeholder.src())
            .attr("data-src", placeholder.deferred_src.clone())
            .attr("alt", placeholder.alt.clone());
        if placeholder.is_resolved() {
            img.set_attribute("data-state", "resolved");
        }

        let rating_container = ViewNode::new("div")
            .class("rating d-flex justify-content-start")
            .attr("data-id", self.rating.record_id.as_str())
            .attr("data-rating", self.rating.rating.to_string())
            .child(self.rating.to_node());

        ViewNode::new("div")
            .class("card")
            .child(ViewNode::new("div").class("card__image-container").child(img))
            .child(
                ViewNode::new("div")
                    .class("card-body")
                    .child(rating_container)
                    .child(
                        ViewNode::new("p")
                            .class("card-text font-weight-bold mt-2")
                            .text(self.caption.clone()),
                    ),
            )
    }
}

impl RatingControl {
    /// Lowers the control into a form of radio inputs and star labels.
    #[must_use]
    pub fn to_node(&self) -> ViewNode {
        let mut form = ViewNode::new("form").attr("action", "post");
        for option in &self.options {
            let mut input = ViewNode::new("input")
                .class("visuallyhidden")
                .attr("type", "radio")
                .attr("name", "rating")
                .attr("id", option.control_id.clone())
                .attr("value", option.value.to_string());
            if !self.enabled {
                input.set_attribute("disabled", "disabled");
            }

            let icon = if option.filled { "fa-star fas" } else { "fa-star far" };
            let label = ViewNode::new("label")
                .attr("for", option.control_id.clone())
                .child(ViewNode::new("span").class("visuallyhidden").text(option.label))
                .child(ViewNode::new("i").class(icon));

            form.append(input);
            form.append(label);
        }
        form
    }
}
