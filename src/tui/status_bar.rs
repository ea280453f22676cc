//! Status bar widget for status messages, the cursor cell and key hints.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::grid_view::CellView;
use super::{AppState, Theme};
use crate::models::{cell_label, PhaseLabel};
use crate::shortcuts::STATUS_HINTS;

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let first = if let Some(error) = &state.error_message {
            Line::from(vec![
                Span::styled("ERROR: ", Style::default().fg(theme.error)),
                Span::raw(error.clone()),
            ])
        } else if !state.status_message.is_empty() {
            Line::from(Span::styled(
                state.status_message.clone(),
                Style::default().fg(theme.success),
            ))
        } else {
            Self::hints_line(theme)
        };

        let status = Paragraph::new(vec![first, Self::cursor_line(state, theme)])
            .style(Style::default().fg(theme.text).bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Status ")
                    .style(Style::default().bg(theme.background)),
            );

        f.render_widget(status, area);
    }

    fn hints_line(theme: &Theme) -> Line<'static> {
        let mut spans: Vec<Span<'static>> = Vec::new();
        for (i, (key, action)) in STATUS_HINTS.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(
                *key,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                action.description(),
                Style::default().fg(theme.text_muted),
            ));
        }
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "?",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(" Help", Style::default().fg(theme.text_muted)));
        Line::from(spans)
    }

    /// Describes the cell under the cursor.
    fn cursor_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let (row, col) = state.cursor;
        let Some(cell) = state.grid_view.cell(row, col) else {
            return Line::from("");
        };

        let label = Span::styled(
            format!("{}: ", cell_label(row, col)),
            Style::default().fg(theme.primary),
        );
        let detail = match cell {
            CellView::Empty { .. } => "empty".to_string(),
            CellView::Anchor {
                width, phase, text, ..
            } => describe(*width, *phase, text),
            CellView::Continuation { anchor } => match state.grid_view.cell(row, *anchor) {
                Some(CellView::Anchor {
                    width, phase, text, ..
                }) => format!(
                    "{} (from {})",
                    describe(*width, *phase, text),
                    cell_label(row, *anchor)
                ),
                _ => String::new(),
            },
        };
        Line::from(vec![label, Span::raw(detail)])
    }
}

fn describe(width: usize, phase: PhaseLabel, text: &str) -> String {
    format!("{width} wide, {phase}, {}", text.replace('\n', " / "))
}
