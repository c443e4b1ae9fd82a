//! UI screens.

mod app;
mod gallery_screen;
mod terminal_display;

pub use app::App;
pub use gallery_screen::{GalleryAction, GalleryScreen, GalleryScreenState};
pub use terminal_display::{DisplaySnapshot, TerminalDisplay};
