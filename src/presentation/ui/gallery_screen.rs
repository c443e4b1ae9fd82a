//! Gallery screen: header, card grid and status bar.

use crossterm::event::KeyEvent;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, StatefulWidget, Widget, Wrap},
};

use crate::domain::entities::{CARDS_PER_ROW, GalleryView, control_id};
use crate::infrastructure::viewport::ViewportGeometry;
use crate::presentation::events::{EventHandler, GalleryKey};
use crate::presentation::ui::terminal_display::DisplaySnapshot;
use crate::presentation::widgets::{GalleryGrid, StatusBar};

const KEY_HINTS: &str = "←↑↓→ move  1-5 rate  r reload  q quit";

/// What the app should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryAction {
    /// Nothing to do beyond a redraw.
    None,
    /// Leave the application.
    Quit,
    /// Start a new load cycle.
    Reload,
    /// Submit the star option with this control id.
    Submit(String),
    /// The selection moved; the viewport should follow it.
    SelectionMoved,
}

/// Selection, scroll position and status of the gallery screen.
#[derive(Debug)]
pub struct GalleryScreenState {
    selected: usize,
    geometry: ViewportGeometry,
    status: StatusBar,
}

impl GalleryScreenState {
    /// Creates state for a viewport of the given geometry.
    #[must_use]
    pub fn new(geometry: ViewportGeometry) -> Self {
        Self {
            selected: 0,
            geometry,
            status: StatusBar::info("Loading images…"),
        }
    }

    /// Index of the selected card.
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Replaces the status bar.
    pub fn set_status(&mut self, status: StatusBar) {
        self.status = status;
    }

    /// Current status bar.
    #[must_use]
    pub const fn status(&self) -> &StatusBar {
        &self.status
    }

    /// Keeps the selection inside a grid of `cards`.
    pub fn clamp_selection(&mut self, cards: usize) {
        self.selected = self.selected.min(cards.saturating_sub(1));
    }

    /// Scroll offset that keeps the selected row on screen, starting from
    /// `current`.
    #[must_use]
    pub fn follow_selection(&self, current: u32, rows: usize) -> u32 {
        let row = u32::try_from(self.selected / CARDS_PER_ROW).unwrap_or(u32::MAX);
        let top = row.saturating_mul(self.geometry.row_height);
        let bottom = top.saturating_add(self.geometry.row_height);

        let offset = if top < current {
            top
        } else if bottom > current.saturating_add(self.geometry.height) {
            bottom.saturating_sub(self.geometry.height)
        } else {
            current
        };
        offset.min(self.geometry.max_offset(rows))
    }

    /// Handles a key press against the current display contents.
    pub fn handle_key(&mut self, key: KeyEvent, snapshot: &DisplaySnapshot) -> GalleryAction {
        let Some(gallery_key) = EventHandler::gallery_key(&key) else {
            return GalleryAction::None;
        };

        match gallery_key {
            GalleryKey::Quit => GalleryAction::Quit,
            GalleryKey::Reload => {
                self.status = StatusBar::info("Reloading…");
                GalleryAction::Reload
            }
            GalleryKey::Rate(star) => self.rate(star, snapshot.view()),
            GalleryKey::Move(delta) => self.move_by(delta, snapshot.view()),
            GalleryKey::MoveRows(rows) => self.move_by(rows * row_stride(), snapshot.view()),
            GalleryKey::Page(pages) => {
                let rows = isize::try_from(self.geometry.rows_per_screen()).unwrap_or(1);
                self.move_by(pages * rows * row_stride(), snapshot.view())
            }
        }
    }

    fn move_by(&mut self, delta: isize, view: Option<&GalleryView>) -> GalleryAction {
        let Some(count) = view.map(GalleryView::card_count).filter(|c| *c > 0) else {
            return GalleryAction::None;
        };
        let target = self
            .selected
            .saturating_add_signed(delta)
            .min(count - 1);
        if target == self.selected {
            return GalleryAction::None;
        }
        self.selected = target;
        GalleryAction::SelectionMoved
    }

    fn rate(&mut self, star: u8, view: Option<&GalleryView>) -> GalleryAction {
        let Some(card) = view.and_then(|v| v.cards().nth(self.selected)) else {
            self.status = StatusBar::warning("Nothing to rate");
            return GalleryAction::None;
        };
        if !card.rating.enabled {
            self.status = StatusBar::warning("Rating update already in progress");
            return GalleryAction::None;
        }
        self.status = StatusBar::info(format!("Rating {} with {star} stars…", card.record_id()));
        GalleryAction::Submit(control_id(card.record_id(), star))
    }
}

#[allow(clippy::cast_possible_wrap)]
const fn row_stride() -> isize {
    CARDS_PER_ROW as isize
}

/// Renders a display snapshot scrolled to `offset`.
pub struct GalleryScreen<'a> {
    snapshot: &'a DisplaySnapshot,
    offset: u32,
}

impl<'a> GalleryScreen<'a> {
    /// Creates the screen for one frame.
    #[must_use]
    pub const fn new(snapshot: &'a DisplaySnapshot, offset: u32) -> Self {
        Self { snapshot, offset }
    }
}

impl StatefulWidget for GalleryScreen<'_> {
    type State = GalleryScreenState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ]);
        let [header_area, content_area, status_area] = layout.areas(area);

        let title_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let header = match self.snapshot {
            DisplaySnapshot::Gallery(view) => Line::from(vec![
                Span::styled(" Gallery ", title_style),
                Span::styled(
                    format!("cycle {} · {} images", view.cycle, view.card_count()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            _ => Line::from(Span::styled(" Gallery ", title_style)),
        };
        Paragraph::new(header).render(header_area, buf);

        match self.snapshot {
            DisplaySnapshot::Loading => {
                Paragraph::new("Loading images…")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray))
                    .render(content_area, buf);
            }
            DisplaySnapshot::Error(message) => {
                Paragraph::new(vec![
                    Line::from(Span::styled(
                        message.as_str(),
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                    Line::from("Press r to retry."),
                ])
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(content_area, buf);
            }
            DisplaySnapshot::Gallery(view) if view.is_empty() => {
                Paragraph::new("No images yet.")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray))
                    .render(content_area, buf);
            }
            DisplaySnapshot::Gallery(view) => {
                let row_height = state.geometry.row_height;
                let first_row = usize::try_from(self.offset / row_height).unwrap_or(0);
                GalleryGrid::new(view)
                    .selected(Some(state.selected))
                    .first_row(first_row)
                    .row_height(u16::try_from(row_height).unwrap_or(u16::MAX))
                    .render(content_area, buf);
            }
        }

        let status = state.status.clone().hints(KEY_HINTS);
        (&status).render(status_area, buf);
    }
}
