//! PNG export of the panel schema.
//!
//! The grid is drawn onto a fixed A4-landscape page (1123x794 px) as an SVG
//! document, then rasterised with resvg/tiny-skia.

use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info};

use crate::export::text_wrap::{estimate_width, wrap_text};
use crate::models::{GridState, Module};

/// Page width in pixels.
pub const PAGE_WIDTH: f32 = 1123.0;
/// Page height in pixels.
pub const PAGE_HEIGHT: f32 = 794.0;
/// Blank border around the page content.
pub const MARGIN: f32 = 50.0;
/// Vertical space reserved for the title.
pub const TITLE_BAND: f32 = 60.0;
/// Page title.
pub const TITLE: &str = "Electrical Panel Schema";

const TITLE_FONT_SIZE: f32 = 28.0;
const PHASE_FONT_SIZE: f32 = 12.0;
const TEXT_FONT_SIZE: f32 = 11.0;
const LINE_HEIGHT: f32 = 14.0;
const TEXT_INSET: f32 = 10.0;
const FONT_FAMILY: &str = "Roboto, sans-serif";

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum RasterError {
    /// No schema exists, so there is nothing to draw.
    #[error("There is no schema to export. Create one first")]
    Empty,

    /// The SVG scene could not be parsed or a pixmap allocated.
    #[error("Rendering failed: {0}")]
    Render(String),

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Encode(String),

    /// Writing the PNG file failed.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        /// Destination file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// File name of an export made on `date`, e.g. `panel-schema-2024-03-15.png`.
#[must_use]
pub fn export_filename(date: NaiveDate) -> String {
    format!("panel-schema-{}.png", date.format("%Y-%m-%d"))
}

/// Page geometry for a grid of `rows` x `cols`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Layout {
    cell: f32,
    start_x: f32,
    start_y: f32,
}

impl Layout {
    #[allow(clippy::cast_precision_loss)]
    fn new(rows: usize, cols: usize) -> Self {
        let available_w = MARGIN.mul_add(-2.0, PAGE_WIDTH);
        let available_h = MARGIN.mul_add(-2.0, PAGE_HEIGHT) - TITLE_BAND;
        let (rows, cols) = (rows.max(1) as f32, cols.max(1) as f32);
        let cell = (available_w / cols).min(available_h / rows);
        Self {
            cell,
            start_x: MARGIN + (available_w - cols * cell) / 2.0,
            start_y: MARGIN + TITLE_BAND + (available_h - rows * cell) / 2.0,
        }
    }
}

/// Builds the SVG page for `grid`.
///
/// # Errors
///
/// Returns [`RasterError::Empty`] when `grid` is `None`.
#[allow(clippy::cast_precision_loss)]
pub fn render_svg(grid: Option<&GridState>) -> Result<String, RasterError> {
    let grid = grid.ok_or(RasterError::Empty)?;
    let (rows, cols) = grid.dimensions();
    let layout = Layout::new(rows, cols);

    let mut svg = String::with_capacity(4096);
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{PAGE_WIDTH}\" height=\"{PAGE_HEIGHT}\" viewBox=\"0 0 {PAGE_WIDTH} {PAGE_HEIGHT}\">",
    );
    svg.push_str("<rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>");
    let _ = write!(
        svg,
        "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{TITLE_FONT_SIZE}\" font-weight=\"bold\" font-family=\"{FONT_FAMILY}\" fill=\"#333333\" text-anchor=\"middle\">{TITLE}</text>",
        PAGE_WIDTH / 2.0,
        MARGIN + 30.0,
    );

    for module in grid.modules() {
        let x = (module.anchor_column as f32).mul_add(layout.cell, layout.start_x);
        let y = (module.row as f32).mul_add(layout.cell, layout.start_y);
        render_module(&mut svg, x, y, layout.cell, module);
    }

    svg.push_str("</svg>");
    Ok(svg)
}

#[allow(clippy::cast_precision_loss)]
fn render_module(svg: &mut String, x: f32, y: f32, cell: f32, module: &Module) {
    let width = cell * module.width as f32;
    let fill = module.color.to_hex();
    let ink = module.color.text_contrast().to_hex();

    let _ = write!(
        svg,
        "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" height=\"{cell:.2}\" fill=\"{fill}\" stroke=\"#000000\" stroke-width=\"1\"/>",
    );

    for i in 1..module.width {
        let dx = (i as f32).mul_add(cell, x);
        let _ = write!(
            svg,
            "<line x1=\"{dx:.2}\" y1=\"{:.2}\" x2=\"{dx:.2}\" y2=\"{:.2}\" stroke=\"#000000\" stroke-opacity=\"0.3\" stroke-width=\"1\"/>",
            y + 2.0,
            y + cell - 2.0,
        );
    }

    let _ = write!(
        svg,
        "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{PHASE_FONT_SIZE}\" font-weight=\"bold\" font-family=\"{FONT_FAMILY}\" fill=\"{ink}\" text-anchor=\"end\" dominant-baseline=\"hanging\">{}</text>",
        x + width - 5.0,
        y + 5.0,
        module.phase_label,
    );

    let lines = wrap_text(&module.display_text(), width - 2.0 * TEXT_INSET, |s| {
        estimate_width(s, TEXT_FONT_SIZE)
    });
    let first_y = cell.mul_add(0.5, y) - (lines.len() as f32 * LINE_HEIGHT) / 2.0
        + LINE_HEIGHT / 2.0;
    for (i, line) in lines.iter().enumerate() {
        let _ = write!(
            svg,
            "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{TEXT_FONT_SIZE}\" font-family=\"{FONT_FAMILY}\" fill=\"{ink}\" dominant-baseline=\"middle\">{}</text>",
            x + TEXT_INSET,
            (i as f32).mul_add(LINE_HEIGHT, first_y),
            escape_xml(line),
        );
    }
}

/// Renders `grid` to PNG bytes.
///
/// # Errors
///
/// Returns [`RasterError::Empty`] when `grid` is `None`, or a render/encode
/// error if rasterisation fails.
pub fn render_png(grid: Option<&GridState>) -> Result<Vec<u8>, RasterError> {
    let svg = render_svg(grid)?;
    let pixmap = rasterize_svg(&svg)?;
    pixmap
        .encode_png()
        .map_err(|e| RasterError::Encode(e.to_string()))
}

/// Renders `grid` and writes the PNG to `path`.
///
/// # Errors
///
/// Returns [`RasterError::Empty`] when `grid` is `None`, or an error if
/// rendering or the file write fails.
pub fn write_png(grid: Option<&GridState>, path: &Path) -> Result<(), RasterError> {
    let png = render_png(grid)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| RasterError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, &png).map_err(|source| RasterError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Exported schema to {} ({} bytes)", path.display(), png.len());
    Ok(())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rasterize_svg(svg: &str) -> Result<tiny_skia::Pixmap, RasterError> {
    let mut fontdb = usvg::fontdb::Database::new();
    fontdb.load_system_fonts();
    debug!(faces = fontdb.len(), "loaded system fonts");

    let mut opt = usvg::Options::default();
    opt.fontdb = Arc::new(fontdb);

    let tree = usvg::Tree::from_str(svg, &opt)
        .map_err(|e| RasterError::Render(format!("SVG parsing failed: {e}")))?;

    let px_w = tree.size().width() as u32;
    let px_h = tree.size().height() as u32;
    let mut pixmap = tiny_skia::Pixmap::new(px_w.max(1), px_h.max(1))
        .ok_or_else(|| RasterError::Render("Failed to create pixmap".to_string()))?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    Ok(pixmap)
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
