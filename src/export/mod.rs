//! Export of panel schemas to image files.
//!
//! Currently a single target: a fixed-size PNG page rendered through an SVG
//! intermediate with resvg.

pub mod raster;
pub mod text_wrap;

pub use raster::{export_filename, render_png, render_svg, write_png, RasterError};
