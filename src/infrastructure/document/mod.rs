//! Document adapters for committed gallery views.

mod html_document;

pub use html_document::HtmlDocument;
