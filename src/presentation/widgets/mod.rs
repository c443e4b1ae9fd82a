mod gallery_grid;
mod status_bar;

pub use gallery_grid::{GalleryGrid, GalleryGridStyle, truncate_to_width};
pub use status_bar::{StatusBar, StatusLevel};
