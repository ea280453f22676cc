//! Toolbar showing the live selection: tool, color, phase and text.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{AppState, Theme};
use crate::models::{RgbColor, Selection, Tool, PRESET_COLORS};

/// Toolbar widget
pub struct Toolbar;

impl Toolbar {
    /// Render the toolbar
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let line = Line::from(Self::spans(&state.selection, theme));

        let toolbar = Paragraph::new(line)
            .style(Style::default().fg(theme.text).bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Selection ")
                    .border_style(Style::default().fg(theme.text_muted)),
            );
        f.render_widget(toolbar, area);
    }

    fn spans(selection: &Selection, theme: &Theme) -> Vec<Span<'static>> {
        let label = Style::default().fg(theme.text_secondary);
        let separator = || Span::styled("  │  ", Style::default().fg(theme.text_muted));

        let mut spans = vec![Span::styled("Tool ", label)];
        for tool in Tool::ALL {
            let style = if tool == selection.tool {
                Style::default()
                    .fg(theme.background)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            spans.push(Span::styled(format!(" {} ", tool.label()), style));
        }

        spans.push(separator());
        spans.push(Span::styled("Color ", label));
        let (color, name) = effective_color(selection);
        spans.push(Span::styled(
            "   ",
            Style::default().bg(color.to_ratatui_color()),
        ));
        spans.push(Span::raw(format!(" {name}")));

        spans.push(separator());
        spans.push(Span::styled("Phase ", label));
        spans.push(Span::styled(
            selection.phase.as_str(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ));

        spans.push(separator());
        spans.push(Span::styled("Text ", label));
        if selection.text.is_empty() {
            spans.push(Span::styled(
                "(default)",
                Style::default().fg(theme.text_muted),
            ));
        } else {
            spans.push(Span::raw(selection.text.replace('\n', " / ")));
        }
        spans
    }
}

/// Color the next module will get, with a display name.
fn effective_color(selection: &Selection) -> (RgbColor, String) {
    if let Tool::Place(kind) = selection.tool {
        if let Some(forced) = kind.forced_color() {
            return (forced, format!("{forced} (fixed)"));
        }
    }
    let name = PRESET_COLORS
        .iter()
        .find(|(_, c)| *c == selection.color)
        .map_or_else(|| selection.color.to_hex(), |(name, _)| (*name).to_string());
    (selection.color, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ModuleKind, RCD_COLOR};

    #[test]
    fn test_effective_color_names_presets() {
        let selection = Selection::default();
        assert_eq!(
            effective_color(&selection),
            (RgbColor::WHITE, "White".to_string())
        );

        let selection = selection.color(RgbColor::new(0x12, 0x34, 0x56));
        assert_eq!(effective_color(&selection).1, "#123456");
    }

    #[test]
    fn test_effective_color_rcd_is_fixed() {
        let selection = Selection::with_kind(ModuleKind::Rcd).color(RgbColor::BLACK);
        let (color, name) = effective_color(&selection);
        assert_eq!(color, RCD_COLOR);
        assert!(name.ends_with("(fixed)"));
    }

    #[test]
    fn test_spans_mark_text() {
        let theme = Theme::dark();
        let spans = Toolbar::spans(&Selection::default().text("Oven\nKitchen"), &theme);
        assert!(spans.iter().any(|s| s.content == "Oven / Kitchen"));
    }
}
