//! In-memory HTML document.

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::domain::entities::{GalleryView, PlaceholderId, RecordId, ViewNode};
use crate::domain::errors::GalleryError;
use crate::domain::ports::DisplayPort;

/// Document holding the gallery container as an element tree.
///
/// Every commit replaces the whole container.
#[derive(Debug)]
pub struct HtmlDocument {
    root: RwLock<ViewNode>,
}

impl Default for HtmlDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlDocument {
    /// Creates a document with an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: RwLock::new(ViewNode::new("div").class("container")),
        }
    }

    /// Serializes the container.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.root.read().to_html()
    }

    /// Wraps the container in a minimal standalone page.
    #[must_use]
    pub fn to_page(&self, title: &str) -> String {
        let title = ViewNode::new("title").text(title).to_html();
        format!(
            "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">{title}</head>\
             <body>{}</body></html>\n",
            self.to_html()
        )
    }

    /// Effective source of a placeholder element.
    #[must_use]
    pub fn placeholder_src(&self, id: PlaceholderId) -> Option<String> {
        self.root
            .read()
            .find_by_attribute("id", &id.to_string())
            .and_then(|node| node.attribute("src"))
            .map(String::from)
    }
}

impl DisplayPort for HtmlDocument {
    fn commit(&self, view: &GalleryView) -> Result<(), GalleryError> {
        let node = view.to_node();
        *self.root.write() = node;
        debug!(cycle = %view.cycle, cards = view.card_count(), "Committed gallery document");
        Ok(())
    }

    fn show_error(&self, message: &str) {
        *self.root.write() = ViewNode::new("div").class("container").child(
            ViewNode::new("div")
                .class("alert alert-danger mt-4")
                .attr("role", "alert")
                .text(message),
        );
    }

    fn resolve_placeholder(&self, id: PlaceholderId, src: &str) {
        let mut root = self.root.write();
        match root.find_by_attribute_mut("id", &id.to_string()) {
            Some(img) => {
                img.set_attribute("src", src);
                img.set_attribute("data-state", "resolved");
            }
            None => trace!(placeholder = %id, "Placeholder no longer in document"),
        }
    }

    fn set_rating_enabled(&self, record_id: &RecordId, enabled: bool) {
        let mut root = self.root.write();
        let Some(container) = root.find_by_attribute_mut("data-id", record_id.as_str()) else {
            trace!(record_id = %record_id, "Rating control not in document");
            return;
        };
        container.visit_mut(&mut |node| {
            if node.tag() == "input" {
                if enabled {
                    node.remove_attribute("disabled");
                } else {
                    node.set_attribute("disabled", "disabled");
                }
            }
        });
    }
}
