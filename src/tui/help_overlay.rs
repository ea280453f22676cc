//! Help overlay listing every keyboard shortcut, opened with '?'.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::{centered_rect, Theme};
use crate::shortcuts::HELP_ENTRIES;

/// Scroll state for the help overlay.
#[derive(Debug, Clone, Default)]
pub struct HelpOverlayState {
    /// Current scroll offset (line number)
    pub scroll_offset: usize,
}

impl HelpOverlayState {
    /// Scroll up by one line.
    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Scroll down by one line.
    pub fn scroll_down(&mut self) {
        if self.scroll_offset + 1 < content_len() {
            self.scroll_offset += 1;
        }
    }

    /// Render the overlay centered over `area`.
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let area = centered_rect(60, 80, area);
        f.render_widget(Clear, area);

        let help = Paragraph::new(help_lines(theme))
            .scroll((u16::try_from(self.scroll_offset).unwrap_or(u16::MAX), 0))
            .style(Style::default().fg(theme.text).bg(theme.background))
            .block(
                Block::default()
                    .title(" Help (Esc to close) ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.primary)),
            );
        f.render_widget(help, area);
    }
}

fn content_len() -> usize {
    HELP_ENTRIES.len() + 6
}

fn help_lines(theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            "Schema Builder",
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Modules overwrite whatever they cover. Click a cell to apply the tool.",
            Style::default().fg(theme.text_muted),
        )),
        Line::from(""),
    ];

    for (keys, action) in HELP_ENTRIES {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {keys:<16}"),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(action.description()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Exports go to the configured export directory as panel-schema-<date>.png",
        Style::default().fg(theme.text_muted),
    )));
    lines.push(Line::from(""));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_len_matches_lines() {
        assert_eq!(help_lines(&Theme::dark()).len(), content_len());
    }

    #[test]
    fn test_scroll_is_bounded() {
        let mut state = HelpOverlayState::default();
        state.scroll_up();
        assert_eq!(state.scroll_offset, 0);
        for _ in 0..content_len() * 2 {
            state.scroll_down();
        }
        assert_eq!(state.scroll_offset, content_len() - 1);
    }
}
