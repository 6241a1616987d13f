//! Glyph measurement and rasterization.
//!
//! Two faces are available: any TrueType/OpenType file through `rusttype`,
//! and a small built-in bitmap face that needs no font file at all.

use std::path::Path;

use rusttype::{point, Font, Scale};

use crate::error::{Result, SkyClockError};

/// Vertical font metrics in the y-down drawing frame: `ascent` is negative
/// (above the baseline), `descent` positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub ascent: f32,
    pub descent: f32,
}

pub trait Typeface: Send + Sync {
    /// Horizontal advance of `text` at `size`, without kerning.
    fn advance(&self, text: &str, size: f32) -> f32;

    fn metrics(&self, size: f32) -> FontMetrics;

    /// Calls `plot(dx, dy, coverage)` for every inked sample of `ch`, with
    /// offsets relative to the pen position on the baseline.
    fn rasterize(&self, ch: char, size: f32, plot: &mut dyn FnMut(f32, f32, f32));
}

// ============================================================================
// TRUETYPE
// ============================================================================

pub struct TrueTypeFace {
    font: Font<'static>,
}

impl TrueTypeFace {
    pub fn from_bytes(data: Vec<u8>) -> Option<Self> {
        Font::try_from_vec(data).map(|font| Self { font })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|source| SkyClockError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(data).ok_or_else(|| SkyClockError::Font(path.display().to_string()))
    }
}

impl std::fmt::Debug for TrueTypeFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrueTypeFace")
            .field("glyphs", &self.font.glyph_count())
            .finish()
    }
}

impl Typeface for TrueTypeFace {
    fn advance(&self, text: &str, size: f32) -> f32 {
        let scale = Scale::uniform(size);
        text.chars()
            .map(|c| self.font.glyph(c).scaled(scale).h_metrics().advance_width)
            .sum()
    }

    fn metrics(&self, size: f32) -> FontMetrics {
        let v_metrics = self.font.v_metrics(Scale::uniform(size));
        FontMetrics {
            ascent: -v_metrics.ascent,
            descent: -v_metrics.descent,
        }
    }

    fn rasterize(&self, ch: char, size: f32, plot: &mut dyn FnMut(f32, f32, f32)) {
        let glyph = self
            .font
            .glyph(ch)
            .scaled(Scale::uniform(size))
            .positioned(point(0.0, 0.0));
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                if v > 0.001 {
                    plot(
                        gx as f32 + bb.min.x as f32,
                        gy as f32 + bb.min.y as f32,
                        v,
                    );
                }
            });
        }
    }
}

// ============================================================================
// BUILT-IN BITMAP FACE
// ============================================================================

const CELL_COLUMNS: u32 = 5;
const CELL_ROWS: usize = 7;
// seven rows above the baseline plus one below
const CELL_EM: f32 = 8.0;

/// 5x7 rows, bit 4 is the leftmost column.
fn glyph_rows(ch: char) -> Option<[u8; CELL_ROWS]> {
    let rows = match ch.to_ascii_uppercase() {
        'A' => [0x0e, 0x11, 0x11, 0x1f, 0x11, 0x11, 0x11],
        'B' => [0x1e, 0x11, 0x11, 0x1e, 0x11, 0x11, 0x1e],
        'C' => [0x0e, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0e],
        'D' => [0x1c, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1c],
        'E' => [0x1f, 0x10, 0x10, 0x1e, 0x10, 0x10, 0x1f],
        'F' => [0x1f, 0x10, 0x10, 0x1e, 0x10, 0x10, 0x10],
        'G' => [0x0e, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0f],
        'H' => [0x11, 0x11, 0x11, 0x1f, 0x11, 0x11, 0x11],
        'I' => [0x0e, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0e],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0c],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1f],
        'M' => [0x11, 0x1b, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0e, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0e],
        'P' => [0x1e, 0x11, 0x11, 0x1e, 0x10, 0x10, 0x10],
        'Q' => [0x0e, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0d],
        'R' => [0x1e, 0x11, 0x11, 0x1e, 0x14, 0x12, 0x11],
        'S' => [0x0f, 0x10, 0x10, 0x0e, 0x01, 0x01, 0x1e],
        'T' => [0x1f, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0e],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0a, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0a],
        'X' => [0x11, 0x11, 0x0a, 0x04, 0x0a, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x0a, 0x04, 0x04, 0x04, 0x04],
        'Z' => [0x1f, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1f],
        '0' => [0x0e, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0e],
        '1' => [0x04, 0x0c, 0x04, 0x04, 0x04, 0x04, 0x0e],
        '2' => [0x0e, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1f],
        '3' => [0x1f, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0e],
        '4' => [0x02, 0x06, 0x0a, 0x12, 0x1f, 0x02, 0x02],
        '5' => [0x1f, 0x10, 0x1e, 0x01, 0x01, 0x11, 0x0e],
        '6' => [0x06, 0x08, 0x10, 0x1e, 0x11, 0x11, 0x0e],
        '7' => [0x1f, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0e, 0x11, 0x11, 0x0e, 0x11, 0x11, 0x0e],
        '9' => [0x0e, 0x11, 0x11, 0x0f, 0x01, 0x02, 0x0c],
        '-' => [0x00, 0x00, 0x00, 0x1f, 0x00, 0x00, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0c, 0x0c],
        ':' => [0x00, 0x0c, 0x0c, 0x00, 0x0c, 0x0c, 0x00],
        _ => return None,
    };
    Some(rows)
}

/// Leftmost inked column and inked width of a glyph, in cells.
fn ink_span(rows: &[u8; CELL_ROWS]) -> (u32, u32) {
    let mask = rows.iter().fold(0u8, |acc, row| acc | row);
    if mask == 0 {
        return (0, 0);
    }
    // columns counted from the left: bit 4 is column 0
    let first = (0..CELL_COLUMNS)
        .find(|col| mask & (0x10 >> col) != 0)
        .unwrap_or(0);
    let last = (0..CELL_COLUMNS)
        .rev()
        .find(|col| mask & (0x10 >> col) != 0)
        .unwrap_or(0);
    (first, last - first + 1)
}

/// Proportional block face built from a 5x7 dot matrix, scaled so that one
/// em covers seven rows above the baseline and one below.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmapFace;

impl BitmapFace {
    fn dot(size: f32) -> f32 {
        size / CELL_EM
    }

    fn char_advance(ch: char, size: f32) -> f32 {
        let dot = Self::dot(size);
        match glyph_rows(ch) {
            Some(rows) => {
                let (_, width) = ink_span(&rows);
                (width.max(1) + 1) as f32 * dot
            }
            None if ch == ' ' => 3.0 * dot,
            None => (CELL_COLUMNS + 1) as f32 * dot,
        }
    }
}

impl Typeface for BitmapFace {
    fn advance(&self, text: &str, size: f32) -> f32 {
        text.chars().map(|c| Self::char_advance(c, size)).sum()
    }

    fn metrics(&self, size: f32) -> FontMetrics {
        let dot = Self::dot(size);
        FontMetrics {
            ascent: -(CELL_ROWS as f32) * dot,
            descent: dot,
        }
    }

    fn rasterize(&self, ch: char, size: f32, plot: &mut dyn FnMut(f32, f32, f32)) {
        let Some(rows) = glyph_rows(ch) else {
            return;
        };
        let dot = Self::dot(size);
        let samples = dot.ceil().max(1.0) as u32;
        let sample_step = dot / samples as f32;
        let (first, _) = ink_span(&rows);
        for (row_index, row) in rows.iter().enumerate() {
            let top = (row_index as f32 - CELL_ROWS as f32) * dot;
            for col in first..CELL_COLUMNS {
                if row & (0x10 >> col) == 0 {
                    continue;
                }
                let left = (col - first) as f32 * dot;
                for sy in 0..samples {
                    for sx in 0..samples {
                        plot(
                            left + sx as f32 * sample_step,
                            top + sy as f32 * sample_step,
                            1.0,
                        );
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitmap_face_is_proportional() {
        let face = BitmapFace;
        let narrow = face.advance("I", 24.0);
        let wide = face.advance("M", 24.0);
        assert!(narrow < wide);
        assert_eq!(narrow, 4.0 * 3.0);
        assert_eq!(wide, 6.0 * 3.0);
    }

    #[test]
    fn advance_is_additive() {
        let face = BitmapFace;
        let whole = face.advance("SEPTEMBER", 24.0);
        let parts: f32 = "SEPTEMBER"
            .chars()
            .map(|c| face.advance(&c.to_string(), 24.0))
            .sum();
        assert!((whole - parts).abs() < 1e-4);
    }

    #[test]
    fn bitmap_metrics_follow_y_down_convention() {
        let metrics = BitmapFace.metrics(24.0);
        assert_eq!(metrics.ascent, -21.0);
        assert_eq!(metrics.descent, 3.0);
    }

    #[test]
    fn bitmap_glyph_sits_on_baseline() {
        let mut min_y = f32::MAX;
        let mut max_y = f32::MIN;
        let mut count = 0;
        BitmapFace.rasterize('L', 8.0, &mut |_, y, _| {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
            count += 1;
        });
        // L has 7 + 4 inked dots at one sample each
        assert_eq!(count, 11);
        assert_eq!(min_y, -7.0);
        assert_eq!(max_y, -1.0);
    }

    #[test]
    fn unknown_characters_draw_nothing() {
        let mut count = 0;
        BitmapFace.rasterize('~', 24.0, &mut |_, _, _| count += 1);
        assert_eq!(count, 0);
        assert!(BitmapFace.advance("~", 24.0) > 0.0);
    }

    #[test]
    fn garbage_font_bytes_are_rejected() {
        assert!(TrueTypeFace::from_bytes(vec![0u8; 16]).is_none());
    }
}
