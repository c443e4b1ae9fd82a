//! Status bar widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use super::gallery_grid::truncate_to_width;

/// Status bar severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    /// Informational.
    Info,
    /// Success.
    Success,
    /// Warning.
    Warning,
    /// Error.
    Error,
}

impl StatusLevel {
    /// Returns color for level.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Info => Color::Cyan,
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }
}

/// One-line status bar: a message on the left, key hints on the right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBar {
    message: String,
    hints: String,
    level: StatusLevel,
}

impl StatusBar {
    /// Creates empty status bar.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            message: String::new(),
            hints: String::new(),
            level: StatusLevel::Info,
        }
    }

    /// Sets the message.
    #[must_use]
    pub fn message(mut self, content: impl Into<String>) -> Self {
        self.message = content.into();
        self
    }

    /// Sets the key hints.
    #[must_use]
    pub fn hints(mut self, content: impl Into<String>) -> Self {
        self.hints = content.into();
        self
    }

    /// Sets status level.
    #[must_use]
    pub const fn level(mut self, level: StatusLevel) -> Self {
        self.level = level;
        self
    }

    /// Creates info status bar.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new().message(message).level(StatusLevel::Info)
    }

    /// Creates success status bar.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new().message(message).level(StatusLevel::Success)
    }

    /// Creates warning status bar.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new().message(message).level(StatusLevel::Warning)
    }

    /// Creates error status bar.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new().message(message).level(StatusLevel::Error)
    }

    /// Current message.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.message
    }

    /// Current level.
    #[must_use]
    pub const fn current_level(&self) -> StatusLevel {
        self.level
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = usize::from(area.width);
        let hints_width = self.hints.width();
        let message_room = width.saturating_sub(hints_width + 1);

        let message = truncate_to_width(&self.message, message_room);
        let padding = width.saturating_sub(message.width() + hints_width);

        let line = Line::from(vec![
            Span::styled(
                message,
                Style::default()
                    .fg(self.level.color())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" ".repeat(padding)),
            Span::styled(self.hints.as_str(), Style::default().fg(Color::DarkGray)),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_line(bar: &StatusBar, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf);
        (0..width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn test_hints_right_aligned() {
        let bar = StatusBar::info("Loaded 3 images").hints("q quit");
        let line = render_line(&bar, 30);
        assert!(line.starts_with("Loaded 3 images"));
        assert!(line.ends_with("q quit"));
    }

    #[test]
    fn test_long_message_is_truncated_before_hints() {
        let bar = StatusBar::error("Could not load images: connection refused").hints("r retry");
        let line = render_line(&bar, 24);
        assert!(line.ends_with("r retry"));
        assert!(line.contains('…'));
    }

    #[test]
    fn test_level_constructors() {
        assert_eq!(StatusBar::warning("x").current_level(), StatusLevel::Warning);
        assert_eq!(StatusBar::success("x").current_level(), StatusLevel::Success);
        assert_eq!(StatusBar::error("boom").text(), "boom");
    }
}
