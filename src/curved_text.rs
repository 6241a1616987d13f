//! Text laid out glyph by glyph along a circle.
//!
//! The label is written at `(0, radius)`, i.e. below the pivot, and the
//! frame is rotated between glyphs. Each rotation step is the glyph's
//! measured advance converted to degrees at that radius, so proportional
//! fonts curve correctly. The first glyph starts half the label's angular
//! width before the nominal position, which centers the label.

use std::f32::consts::PI;

use crate::config::Color;
use crate::surface::Surface;

/// Angular plan for one label: the initial rotation and the rotation applied
/// after each glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcLayout {
    pub start: f32,
    pub glyphs: Vec<(char, f32)>,
}

impl ArcLayout {
    pub fn new<S: Surface>(surface: &S, label: &str, radius: f32, size: f32) -> Self {
        let ratio = degrees_per_unit(radius);
        let start = ratio * surface.measure_text(label, size) * 0.5;
        let glyphs = label
            .chars()
            .map(|ch| {
                let width = surface.measure_text(ch.encode_utf8(&mut [0; 4]), size);
                (ch, -ratio * width)
            })
            .collect();
        Self { start, glyphs }
    }

    /// Sum of the per-glyph steps; `-2 * start` for a centered label.
    pub fn sweep(&self) -> f32 {
        self.glyphs.iter().map(|(_, step)| step).sum()
    }
}

/// Degrees subtended by one drawing unit of arc length at `radius`.
pub fn degrees_per_unit(radius: f32) -> f32 {
    180.0 / PI / radius
}

/// Draws `label` centered on the arc of `radius` under the current rotation.
/// The surface's rotation is the same after the call as before it.
pub fn draw_curved_text<S: Surface>(
    surface: &mut S,
    label: &str,
    radius: f32,
    color: Color,
    size: f32,
) {
    let layout = ArcLayout::new(&*surface, label, radius, size);
    let mut arc = surface.rotated(layout.start);
    for (ch, step) in &layout.glyphs {
        arc.text(ch.encode_utf8(&mut [0; 4]), 0.0, radius, color, size);
        arc.rotate(*step);
    }
}
