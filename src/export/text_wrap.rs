//! Line wrapping for module annotations in the PNG export.

/// Lines kept per module; the remainder is dropped without an ellipsis.
pub const MAX_LINES: usize = 3;

/// Average glyph advance as a fraction of the font size.
const AVERAGE_ADVANCE: f32 = 0.55;

/// Estimated rendered width of `text` in pixels at `font_size`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn estimate_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * AVERAGE_ADVANCE
}

/// Wraps `text` to `max_width`, measuring candidate lines with `measure`.
///
/// Explicit line breaks are honoured first. Within a paragraph, words are
/// appended while the line fits; a single word wider than `max_width` stays on
/// its own line. Empty paragraphs produce no line. At most [`MAX_LINES`] lines
/// are returned.
pub fn wrap_text(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split(' ') {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if measure(&candidate) > max_width && !current.is_empty() {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            } else {
                current = candidate;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines.truncate(MAX_LINES);
    lines
}
