//! Input dialogs: single-line text (annotation, custom color) and the
//! new-schema dimensions form.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout as RatatuiLayout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::models::{GridDimensions, RgbColor, MAX_COLS, MAX_ROWS};
use crate::tui::{centered_rect, Component, Theme};

/// Events emitted by [`TextInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextInputEvent {
    /// User confirmed a valid value
    Confirmed(String),
    /// User cancelled
    Cancelled,
}

/// What a [`TextInput`] edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPurpose {
    /// Module annotation; `\n` stands for a line break
    Annotation,
    /// Custom background color as hex
    CustomColor,
}

impl InputPurpose {
    const fn title(self) -> &'static str {
        match self {
            Self::Annotation => "Module Text",
            Self::CustomColor => "Custom Color",
        }
    }

    const fn hint(self) -> &'static str {
        match self {
            Self::Annotation => "Empty uses the default label. Type \\n for a line break",
            Self::CustomColor => "Hex color such as #FF9800 or #F90",
        }
    }

    fn validate(self, value: &str) -> Result<(), String> {
        match self {
            Self::Annotation => Ok(()),
            Self::CustomColor => RgbColor::from_hex(value)
                .map(|_| ())
                .map_err(|e| e.to_string()),
        }
    }
}

/// Single-line text input dialog.
#[derive(Debug, Clone)]
pub struct TextInput {
    purpose: InputPurpose,
    input: String,
    error: Option<String>,
}

impl TextInput {
    /// Dialog for `purpose`, pre-filled with `initial`.
    #[must_use]
    pub fn new(purpose: InputPurpose, initial: impl Into<String>) -> Self {
        Self {
            purpose,
            input: initial.into(),
            error: None,
        }
    }

    /// What the dialog edits.
    #[must_use]
    pub const fn purpose(&self) -> InputPurpose {
        self.purpose
    }

    /// Current buffer.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.input
    }
}

/// Whether a key should be inserted as text.
fn is_text_key(key: &KeyEvent) -> bool {
    !key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

impl Component for TextInput {
    type Event = TextInputEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match key.code {
            KeyCode::Char(c) if is_text_key(&key) => {
                self.input.push(c);
                self.error = None;
            }
            KeyCode::Backspace => {
                self.input.pop();
                self.error = None;
            }
            KeyCode::Enter => match self.purpose.validate(&self.input) {
                Ok(()) => return Some(TextInputEvent::Confirmed(self.input.clone())),
                Err(e) => self.error = Some(e),
            },
            KeyCode::Esc => return Some(TextInputEvent::Cancelled),
            _ => {}
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let dialog_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, dialog_area);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme.background)),
            dialog_area,
        );

        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Input field
                Constraint::Length(3), // Hint
                Constraint::Min(0),    // Error message (if any)
                Constraint::Length(1), // Help text
            ])
            .split(dialog_area);

        render_title(frame, chunks[0], self.purpose.title(), theme);
        render_field(frame, chunks[1], " Value ", &self.input, true, theme);

        let hint = Paragraph::new(self.purpose.hint())
            .style(Style::default().fg(theme.text_muted))
            .block(bordered(theme));
        frame.render_widget(hint, chunks[2]);

        render_error(frame, chunks[3], self.error.as_deref(), theme);
        render_help(frame, chunks[4], &[("Enter", "Confirm"), ("Esc", "Cancel")], theme);
    }
}

/// Events emitted by [`DimensionsDialog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionsEvent {
    /// Requested size; zero means "use the default"
    Confirmed {
        /// Row count as typed
        rows: usize,
        /// Column count as typed
        cols: usize,
    },
    /// User cancelled
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DimensionField {
    Rows,
    Cols,
}

/// New-schema form with row and column fields.
#[derive(Debug, Clone)]
pub struct DimensionsDialog {
    rows: String,
    cols: String,
    focus: DimensionField,
}

impl DimensionsDialog {
    /// Form pre-filled with `defaults`.
    #[must_use]
    pub fn new(defaults: GridDimensions) -> Self {
        Self {
            rows: defaults.rows.to_string(),
            cols: defaults.cols.to_string(),
            focus: DimensionField::Rows,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            DimensionField::Rows => &mut self.rows,
            DimensionField::Cols => &mut self.cols,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            DimensionField::Rows => DimensionField::Cols,
            DimensionField::Cols => DimensionField::Rows,
        };
    }
}

/// Unparsable or empty input becomes 0, which the grid maps to its default.
fn parse_count(value: &str) -> usize {
    value.trim().parse().unwrap_or(0)
}

impl Component for DimensionsDialog {
    type Event = DimensionsEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() && is_text_key(&key) => {
                let field = self.focused_mut();
                if field.len() < 3 {
                    field.push(c);
                }
            }
            KeyCode::Backspace => {
                self.focused_mut().pop();
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => self.toggle_focus(),
            KeyCode::Enter => {
                return Some(DimensionsEvent::Confirmed {
                    rows: parse_count(&self.rows),
                    cols: parse_count(&self.cols),
                })
            }
            KeyCode::Esc => return Some(DimensionsEvent::Cancelled),
            _ => {}
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let dialog_area = centered_rect(50, 50, area);
        frame.render_widget(Clear, dialog_area);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme.background)),
            dialog_area,
        );

        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Rows
                Constraint::Length(3), // Cols
                Constraint::Min(0),    // Notes
                Constraint::Length(1), // Help text
            ])
            .split(dialog_area);

        render_title(frame, chunks[0], "New Schema", theme);
        render_field(
            frame,
            chunks[1],
            &format!(" Rows (1-{MAX_ROWS}) "),
            &self.rows,
            self.focus == DimensionField::Rows,
            theme,
        );
        render_field(
            frame,
            chunks[2],
            &format!(" Columns (1-{MAX_COLS}) "),
            &self.cols,
            self.focus == DimensionField::Cols,
            theme,
        );

        let note = Paragraph::new("Replaces the current schema. Values outside the range are clamped")
            .style(Style::default().fg(theme.warning))
            .wrap(Wrap { trim: true });
        frame.render_widget(note, chunks[3]);

        render_help(
            frame,
            chunks[4],
            &[("Tab", "Switch"), ("Enter", "Create"), ("Esc", "Cancel")],
            theme,
        );
    }
}

fn bordered(theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(theme.background))
}

fn render_title(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) {
    let title = Paragraph::new(title.to_string())
        .style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .block(bordered(theme));
    frame.render_widget(title, area);
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool, theme: &Theme) {
    let (text, color) = if focused {
        (format!("{value}█"), theme.accent)
    } else {
        (value.to_string(), theme.text_muted)
    };
    let field = Paragraph::new(text)
        .style(Style::default().fg(theme.text))
        .block(
            bordered(theme)
                .title(label.to_string())
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(field, area);
}

fn render_error(frame: &mut Frame, area: Rect, error: Option<&str>, theme: &Theme) {
    if let Some(error) = error {
        let widget = Paragraph::new(error.to_string())
            .style(Style::default().fg(theme.error))
            .block(bordered(theme).title(" Error "))
            .wrap(Wrap { trim: true });
        frame.render_widget(widget, area);
    }
}

fn render_help(frame: &mut Frame, area: Rect, keys: &[(&str, &str)], theme: &Theme) {
    let mut spans = Vec::new();
    for (key, action) in keys {
        spans.push(Span::styled(
            (*key).to_string(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {action}  ")));
    }
    let help = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(theme.text).bg(theme.background));
    frame.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(input: &mut impl Component, text: &str) {
        for c in text.chars() {
            input.handle_input(press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_annotation_accepts_anything() {
        let mut input = TextInput::new(InputPurpose::Annotation, "Ov");
        type_str(&mut input, "en");
        input.handle_input(KeyEvent::new(KeyCode::Char('E'), KeyModifiers::SHIFT));
        assert_eq!(input.value(), "OvenE");
        input.handle_input(press(KeyCode::Backspace));
        assert_eq!(
            input.handle_input(press(KeyCode::Enter)),
            Some(TextInputEvent::Confirmed("Oven".to_string()))
        );
    }

    #[test]
    fn test_control_keys_are_not_text() {
        let mut input = TextInput::new(InputPurpose::Annotation, "");
        input.handle_input(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_custom_color_validation() {
        let mut input = TextInput::new(InputPurpose::CustomColor, "#12");
        assert_eq!(input.handle_input(press(KeyCode::Enter)), None);
        assert!(input.error.is_some());

        type_str(&mut input, "3456");
        assert!(input.error.is_none());
        assert_eq!(
            input.handle_input(press(KeyCode::Enter)),
            Some(TextInputEvent::Confirmed("#123456".to_string()))
        );
    }

    #[test]
    fn test_escape_cancels() {
        let mut input = TextInput::new(InputPurpose::CustomColor, "");
        assert_eq!(
            input.handle_input(press(KeyCode::Esc)),
            Some(TextInputEvent::Cancelled)
        );
    }

    #[test]
    fn test_dimensions_dialog() {
        let mut dialog = DimensionsDialog::new(GridDimensions::default());
        dialog.handle_input(press(KeyCode::Backspace));
        type_str(&mut dialog, "5x");
        dialog.handle_input(press(KeyCode::Tab));
        dialog.handle_input(press(KeyCode::Backspace));
        dialog.handle_input(press(KeyCode::Backspace));
        type_str(&mut dialog, "12");

        assert_eq!(
            dialog.handle_input(press(KeyCode::Enter)),
            Some(DimensionsEvent::Confirmed { rows: 5, cols: 12 })
        );
    }

    #[test]
    fn test_dimensions_empty_field_is_zero() {
        let mut dialog = DimensionsDialog::new(GridDimensions::default());
        dialog.handle_input(press(KeyCode::Backspace));
        assert_eq!(
            dialog.handle_input(press(KeyCode::Enter)),
            Some(DimensionsEvent::Confirmed { rows: 0, cols: 10 })
        );
    }
}
