//! Terminal user interface: application state, event loop and rendering.
//!
//! The grid is edited through [`SchemaEditor`]; this module only turns key,
//! mouse and resize events into editor calls and keeps the [`GridView`] in
//! step with the results.

// Input handlers use Result<bool> for consistency even when they never fail
#![allow(clippy::unnecessary_wraps)]
// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]

pub mod component;
pub mod debounce;
pub mod grid_view;
pub mod grid_widget;
pub mod handlers;
pub mod help_overlay;
pub mod status_bar;
pub mod text_input;
pub mod theme;
pub mod toolbar;

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout as RatatuiLayout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::{error, info};

use crate::branding;
use crate::cli::GlobalOptions;
use crate::config::Config;
use crate::export::export_filename;
use crate::logging;
use crate::models::{cell_label, GridState, Selection};
use crate::services::{
    EditorError, FileStore, KeyValueStore, Placement, SchemaEditor, Span as CellSpan,
};

pub use component::Component;
pub use theme::Theme;

use debounce::Debouncer;
use grid_view::GridView;
use grid_widget::{GridGeometry, GridWidget};
use help_overlay::HelpOverlayState;
use status_bar::StatusBar;
use text_input::{DimensionsDialog, TextInput};
use toolbar::Toolbar;

/// Store type used by the interactive editor.
pub type DynStore = Box<dyn KeyValueStore>;

/// Popup types that can be displayed over the main UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupType {
    /// Keyboard shortcut reference
    HelpOverlay,
    /// Annotation or custom color input
    TextInput,
    /// New-schema dimensions form
    NewSchema,
    /// "Clear the schema?" confirmation
    ConfirmClear,
}

/// Dialog currently receiving input.
#[derive(Debug, Clone)]
pub enum ActiveComponent {
    /// Text input dialog
    TextInput(TextInput),
    /// New-schema form
    Dimensions(DimensionsDialog),
}

/// Application state for the TUI.
pub struct AppState {
    // Core data
    /// Schema and its persistent store
    pub editor: SchemaEditor<DynStore>,
    /// Tool, color, phase and text applied by the next activation
    pub selection: Selection,
    /// Cell under the keyboard cursor, `(row, col)`
    pub cursor: (usize, usize),
    /// What the grid widget draws
    pub grid_view: GridView,
    /// Application configuration
    pub config: Config,

    // UI state
    /// Current UI theme
    pub theme: Theme,
    /// Narrow cells
    pub compact: bool,
    /// Terminal area of the last drawn frame
    pub screen: Rect,
    /// Pending terminal width after a resize
    pub resize: Debouncer<u16>,
    /// Currently active popup (if any)
    pub active_popup: Option<PopupType>,
    /// Dialog behind `active_popup`, if it takes input
    pub active_component: Option<ActiveComponent>,
    /// Help overlay scroll position
    pub help_overlay_state: HelpOverlayState,
    /// Status bar message
    pub status_message: String,
    /// Current error message (if any)
    pub error_message: Option<String>,

    // Control flags
    /// Whether application should exit
    pub should_quit: bool,
}

impl AppState {
    /// Builds the state around an opened editor for a terminal `width` columns wide.
    #[must_use]
    pub fn new(editor: SchemaEditor<DynStore>, config: Config, width: u16) -> Self {
        let grid_view = GridView::build(editor.grid());
        let theme = Theme::from_mode(config.ui.theme_mode);
        let compact = config.ui.compact_cells.is_compact(width);
        let status_message = if grid_view.is_empty() {
            "No schema yet. Press n to create one".to_string()
        } else {
            String::new()
        };

        Self {
            editor,
            selection: Selection::default(),
            cursor: (0, 0),
            grid_view,
            config,
            theme,
            compact,
            screen: Rect::default(),
            resize: Debouncer::default(),
            active_popup: None,
            active_component: None,
            help_overlay_state: HelpOverlayState::default(),
            status_message,
            error_message: None,
            should_quit: false,
        }
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error_message = Some(error.into());
    }

    /// Clear error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Reports an editor failure in the error overlay.
    pub fn report(&mut self, err: &EditorError) {
        if err.is_user_error() {
            info!(%err, "operation rejected");
        } else {
            error!(%err, "operation failed");
        }
        self.set_error(err.to_string());
    }

    /// Rebuilds the whole view after a structural change.
    pub fn rebuild_view(&mut self) {
        self.grid_view.rebuild(self.editor.grid());
        self.clamp_cursor();
    }

    /// Patches the view after a placement or clear.
    pub fn refresh_span(&mut self, span: &CellSpan) {
        if let Some(grid) = self.editor.grid() {
            self.grid_view.apply(grid, span);
        }
    }

    /// Keeps the cursor inside the grid.
    pub fn clamp_cursor(&mut self) {
        let (rows, cols) = self.grid_view.dimensions();
        self.cursor = (
            self.cursor.0.min(rows.saturating_sub(1)),
            self.cursor.1.min(cols.saturating_sub(1)),
        );
    }

    /// Recomputes the cell size for a terminal `width` columns wide.
    pub fn apply_width(&mut self, width: u16) {
        let compact = self.config.ui.compact_cells.is_compact(width);
        if compact != self.compact {
            info!(width, compact, "cell size changed");
            self.compact = compact;
        }
    }

    /// Grid geometry of the last drawn frame.
    #[must_use]
    pub fn geometry(&self) -> GridGeometry {
        let main = screen_layout(self.screen)[2];
        GridGeometry::new(main, self.grid_view.dimensions(), self.compact)
    }

    /// Applies the active tool at `(row, col)`.
    pub fn activate(&mut self, row: usize, col: usize) {
        self.cursor = (row, col);
        match self.editor.activate(row, col, &self.selection) {
            Ok(Placement::Placed { module, span }) => {
                self.refresh_span(&span);
                self.set_status(format!(
                    "Placed {} at {}",
                    module.kind,
                    span_label(row, &module.columns())
                ));
            }
            Ok(Placement::Cleared(span)) => {
                self.refresh_span(&span);
                self.set_status(format!("Erased {}", span_label(row, &span.columns)));
            }
            Ok(Placement::Unchanged) => {
                self.set_status(format!("Cell {} is already empty", cell_label(row, col)));
            }
            Err(err) => self.report(&err),
        }
    }

    /// Removes the module at `(row, col)` whatever the tool.
    pub fn erase(&mut self, row: usize, col: usize) {
        match self.editor.clear_cell(row, col) {
            Ok(Some(span)) => {
                self.refresh_span(&span);
                self.set_status(format!("Erased {}", span_label(row, &span.columns)));
            }
            Ok(None) => self.set_status(format!("Cell {} is already empty", cell_label(row, col))),
            Err(err) => self.report(&err),
        }
    }

    /// Replaces the schema with an empty grid.
    pub fn create_schema(&mut self, rows: usize, cols: usize) {
        match self.editor.create(rows, cols) {
            Ok(dims) => {
                self.rebuild_view();
                self.cursor = (0, 0);
                self.set_status(format!("Created {}x{} schema", dims.rows, dims.cols));
            }
            Err(err) => self.report(&err.into()),
        }
    }

    /// Drops the schema and its snapshot.
    pub fn clear_schema(&mut self) {
        match self.editor.clear_schema() {
            Ok(()) => {
                self.rebuild_view();
                self.set_status("Schema cleared");
            }
            Err(err) => self.report(&err.into()),
        }
    }

    /// Writes the PNG into the export directory.
    pub fn export(&mut self) {
        let filename = export_filename(chrono::Local::now().date_naive());
        let path = self.config.export_dir().join(filename);
        match self.editor.export_png(&path) {
            Ok(()) => self.set_status(format!("Exported schema to: {}", path.display())),
            Err(err) => self.report(&err.into()),
        }
    }

    /// Open a dialog component
    pub fn open_component(&mut self, popup: PopupType, component: ActiveComponent) {
        self.active_popup = Some(popup);
        self.active_component = Some(component);
    }

    /// Close the active popup and its component
    pub fn close_component(&mut self) {
        self.active_popup = None;
        self.active_component = None;
    }
}

/// Starts the interactive editor.
///
/// Loads the configuration (honouring the `--storage-dir` override), logs to
/// the log file, and restores the terminal even when the loop fails.
pub fn run(global: &GlobalOptions, verbose: bool) -> Result<()> {
    let config = global.config()?;
    logging::init_file(&logging::log_file_path()?, verbose)?;

    let storage_dir = config.storage_dir()?;
    info!(dir = %storage_dir.display(), "starting editor");
    let store: DynStore = Box::new(FileStore::new(storage_dir));
    let editor = SchemaEditor::open(store).context("Failed to open schema storage")?;

    let mut terminal = setup_terminal()?;
    let width = terminal.size().map(|size| size.width).unwrap_or(u16::MAX);
    let mut state = AppState::new(editor, config, width);

    let result = run_tui(&mut state, &mut terminal);
    restore_terminal(terminal)?;
    result
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        let frame = terminal.draw(|f| render(f, state))?;
        state.screen = frame.area;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(state, key)? {
                        break;
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(state, mouse),
                Event::Resize(width, _) => state.resize.push(width),
                _ => {}
            }
        }

        if let Some(width) = state.resize.poll() {
            state.apply_width(width);
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// `A1` for one cell, `A1-A3` for a run.
fn span_label(row: usize, columns: &std::ops::Range<usize>) -> String {
    let first = cell_label(row, columns.start);
    if columns.len() <= 1 {
        first
    } else {
        format!("{first}-{}", cell_label(row, columns.end - 1))
    }
}

/// Title bar, toolbar, grid and status bar areas.
fn screen_layout(area: Rect) -> [Rect; 4] {
    let chunks = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Toolbar
            Constraint::Min(10),   // Grid
            Constraint::Length(4), // Status bar
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2], chunks[3]]
}

/// Render the UI from current state
fn render(f: &mut Frame, state: &AppState) {
    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let [title, toolbar, main, status] = screen_layout(f.area());

    render_title_bar(f, title, state);
    Toolbar::render(f, toolbar, state);
    GridWidget::render(f, main, state);
    StatusBar::render(f, status, state, &state.theme);

    if let Some(popup_type) = state.active_popup {
        render_popup(f, popup_type, state);
    }

    // Render error overlay on top of everything if error is present
    if let Some(ref error) = state.error_message {
        render_error_overlay(f, error, &state.theme);
    }
}

fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let modules = state
        .editor
        .grid()
        .map_or(0, GridState::module_count);
    let title = format!(" {} - {modules} modules", branding::title_line());

    let title_widget = Paragraph::new(title)
        .style(
            Style::default()
                .fg(state.theme.primary)
                .bg(state.theme.background),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().bg(state.theme.background)),
        );

    f.render_widget(title_widget, area);
}

fn render_popup(f: &mut Frame, popup_type: PopupType, state: &AppState) {
    match (popup_type, &state.active_component) {
        (PopupType::HelpOverlay, _) => {
            state
                .help_overlay_state
                .render(f, f.area(), &state.theme);
        }
        (PopupType::TextInput, Some(ActiveComponent::TextInput(input))) => {
            input.render(f, f.area(), &state.theme);
        }
        (PopupType::NewSchema, Some(ActiveComponent::Dimensions(dialog))) => {
            dialog.render(f, f.area(), &state.theme);
        }
        (PopupType::ConfirmClear, _) => render_confirm_clear(f, &state.theme),
        _ => {}
    }
}

fn render_confirm_clear(f: &mut Frame, theme: &Theme) {
    let area = centered_rect(50, 30, f.area());
    f.render_widget(Clear, area);

    let text = vec![
        Line::from(""),
        Line::from("Delete the schema and its saved copy?"),
        Line::from(""),
        Line::from("  [Y] Clear schema"),
        Line::from("  [N/Esc] Keep it"),
    ];

    let prompt = Paragraph::new(text).block(
        Block::default()
            .title(" Clear Schema ")
            .borders(Borders::ALL)
            .style(Style::default().fg(theme.warning).bg(theme.background)),
    );

    f.render_widget(prompt, area);
}

/// Render error overlay on top of all other UI elements
fn render_error_overlay(f: &mut Frame, error: &str, theme: &Theme) {
    let area = centered_rect(70, 40, f.area());

    f.render_widget(Clear, area);
    let background = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(background, area);

    let chunks = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(3),    // Error message
            Constraint::Length(3), // Help text
        ])
        .split(area);

    let title = Paragraph::new("ERROR")
        .style(
            Style::default()
                .fg(theme.error)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().fg(theme.error).bg(theme.background)),
        );
    f.render_widget(title, chunks[0]);

    let error_text = Paragraph::new(error)
        .style(Style::default().fg(theme.text))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Details ")
                .style(Style::default().bg(theme.background)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(error_text, chunks[1]);

    let help = Paragraph::new(vec![Line::from(vec![
        Span::styled(
            "Enter/Esc",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Dismiss"),
    ])])
    .style(Style::default().fg(theme.text).bg(theme.background))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(help, chunks[2]);
}

/// Rectangle of `percent_x` by `percent_y` centered in `r`.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Handle keyboard input events
fn handle_key_event(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    use crossterm::event::KeyCode;

    // If error overlay is shown, allow dismissing with Enter or Esc
    if state.error_message.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            state.clear_error();
        }
        // Block all other input while error is shown
        return Ok(false);
    }

    if state.active_popup.is_some() {
        return handlers::handle_popup_input(state, key);
    }

    handlers::handle_main_input(state, key)
}

/// Left click activates the clicked cell.
fn handle_mouse_event(state: &mut AppState, mouse: MouseEvent) {
    if state.error_message.is_some() || state.active_popup.is_some() {
        return;
    }
    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
        if let Some((row, col)) = state.geometry().hit_test(mouse.column, mouse.row) {
            state.activate(row, col);
        }
    }
}
