//! Card grid widget for a committed gallery view.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::domain::entities::{CARDS_PER_ROW, Card, GalleryView};

const FILLED_STAR: &str = "★";
const EMPTY_STAR: &str = "☆";
const ELLIPSIS: char = '…';

/// Colors of the card grid.
pub struct GalleryGridStyle {
    /// Card border.
    pub border: Style,
    /// Border of the selected card.
    pub selected_border: Style,
    /// Image line while the placeholder is pending.
    pub pending_image: Style,
    /// Image line once resolved.
    pub resolved_image: Style,
    /// Filled star.
    pub filled_star: Style,
    /// Empty star.
    pub empty_star: Style,
    /// Stars of a control with an update in flight.
    pub disabled_star: Style,
    /// Caption line.
    pub caption: Style,
}

impl Default for GalleryGridStyle {
    fn default() -> Self {
        Self {
            border: Style::default().fg(Color::DarkGray),
            selected_border: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            pending_image: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            resolved_image: Style::default().fg(Color::Cyan),
            filled_star: Style::default().fg(Color::Yellow),
            empty_star: Style::default().fg(Color::Gray),
            disabled_star: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
            caption: Style::default().fg(Color::White),
        }
    }
}

/// Truncates `text` to at most `width` columns, marking the cut with an
/// ellipsis.
#[must_use]
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push(ELLIPSIS);
    out
}

/// Rows of three cards, scrolled to `first_row`.
pub struct GalleryGrid<'a> {
    view: &'a GalleryView,
    selected: Option<usize>,
    first_row: usize,
    row_height: u16,
    style: GalleryGridStyle,
}

impl<'a> GalleryGrid<'a> {
    /// Creates a grid over `view` with nothing selected.
    #[must_use]
    pub fn new(view: &'a GalleryView) -> Self {
        Self {
            view,
            selected: None,
            first_row: 0,
            row_height: 6,
            style: GalleryGridStyle::default(),
        }
    }

    /// Highlights the card at `index`.
    #[must_use]
    pub const fn selected(mut self, index: Option<usize>) -> Self {
        self.selected = index;
        self
    }

    /// First row drawn at the top.
    #[must_use]
    pub const fn first_row(mut self, row: usize) -> Self {
        self.first_row = row;
        self
    }

    /// Height of one row; at least three lines.
    #[must_use]
    pub const fn row_height(mut self, height: u16) -> Self {
        self.row_height = if height < 3 { 3 } else { height };
        self
    }

    /// Sets the grid colors.
    #[must_use]
    pub const fn style(mut self, style: GalleryGridStyle) -> Self {
        self.style = style;
        self
    }

    fn card_lines(&self, card: &Card, width: usize) -> Vec<Line<'static>> {
        let placeholder = &card.placeholder;
        let image = if placeholder.is_resolved() {
            Line::from(Span::styled(
                truncate_to_width(placeholder.src(), width),
                self.style.resolved_image,
            ))
        } else {
            Line::from(Span::styled("loading…", self.style.pending_image))
        };

        let stars: Vec<Span<'static>> = card
            .rating
            .options
            .iter()
            .map(|option| {
                let glyph = if option.filled { FILLED_STAR } else { EMPTY_STAR };
                let style = match (card.rating.enabled, option.filled) {
                    (false, _) => self.style.disabled_star,
                    (true, true) => self.style.filled_star,
                    (true, false) => self.style.empty_star,
                };
                Span::styled(glyph, style)
            })
            .collect();

        vec![
            image,
            Line::from(stars),
            Line::from(Span::styled(
                truncate_to_width(&card.caption, width),
                self.style.caption,
            )),
        ]
    }
}

impl Widget for GalleryGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let visible_rows = usize::from((area.height / self.row_height).max(1));
        let columns = Layout::horizontal([Constraint::Ratio(1, 3); CARDS_PER_ROW]);

        for (offset, row) in self
            .view
            .rows
            .iter()
            .enumerate()
            .skip(self.first_row)
            .take(visible_rows)
            .map(|(i, row)| (i - self.first_row, row))
        {
            let y = area.y + u16::try_from(offset).unwrap_or(u16::MAX) * self.row_height;
            let height = self.row_height.min(area.bottom().saturating_sub(y));
            if height == 0 {
                break;
            }
            let row_area = Rect::new(area.x, y, area.width, height);
            let cells: [Rect; CARDS_PER_ROW] = columns.areas(row_area);

            for (column, (card, cell)) in row.cards.iter().zip(cells).enumerate() {
                let index = (self.first_row + offset) * CARDS_PER_ROW + column;
                let border_style = if self.selected == Some(index) {
                    self.style.selected_border
                } else {
                    self.style.border
                };
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(border_style)
                    .title(format!(" {} ", index + 1));
                let inner = block.inner(cell);
                block.render(cell, buf);

                let lines = self.card_lines(card, usize::from(inner.width));
                Paragraph::new(lines).render(inner, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::build_view;
    use crate::domain::entities::{CycleId, ImageRecord, PlaceholderId, Rating};

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("cat", 5), "cat");
        assert_eq!(truncate_to_width("gallery", 4), "gal…");
        assert_eq!(truncate_to_width("猫猫猫", 4), "猫…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn test_renders_cards_with_stars_and_caption() {
        let mut view = build_view(
            CycleId(1),
            &[
                ImageRecord::new("a", "x.jpg", "cat", Rating::new(3)),
                ImageRecord::new("b", "y.jpg", "dog", Rating::new(0)),
            ],
        );
        view.placeholder_mut(PlaceholderId::new(CycleId(1), 0))
            .unwrap()
            .resolve();

        let area = Rect::new(0, 0, 60, 6);
        let mut buf = Buffer::empty(area);
        GalleryGrid::new(&view).row_height(6).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("cat (3)"));
        assert!(text.contains("dog (0)"));
        assert!(text.contains("★★★☆☆"));
        assert!(text.contains("☆☆☆☆☆"));
        assert!(text.contains("x.jpg"));
        assert!(text.contains("loading…"));
    }

    #[test]
    fn test_first_row_skips_rows() {
        let records: Vec<ImageRecord> = (0..6)
            .map(|i| ImageRecord::new(format!("r{i}"), "x.jpg", format!("pic{i}"), Rating::new(1)))
            .collect();
        let view = build_view(CycleId(1), &records);

        let area = Rect::new(0, 0, 60, 6);
        let mut buf = Buffer::empty(area);
        GalleryGrid::new(&view)
            .row_height(6)
            .first_row(1)
            .render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("pic3"));
        assert!(!text.contains("pic0"));
    }
}
