//! The drawing contract shared by the raster [`Canvas`](crate::Canvas) and
//! the recording [`Scene`](crate::Scene).
//!
//! Coordinates are relative to the buffer center with y pointing down. A
//! positive rotation turns the frame clockwise on screen and nested
//! rotations add up, so all rotations pivot on the center.

use std::ops::{Deref, DerefMut};

use crate::config::Color;
use crate::typeface::FontMetrics;

/// Fill or outline for rectangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RectStyle {
    Fill,
    Stroke(f32),
}

pub trait Surface {
    /// Clears the whole target and resets the transform stack.
    fn begin_frame(&mut self, background: Color);

    fn save(&mut self);

    /// Pops the last [`save`](Surface::save). Unbalanced calls are ignored.
    fn restore(&mut self);

    fn rotate(&mut self, degrees: f32);

    /// Current accumulated rotation, in degrees.
    fn rotation(&self) -> f32;

    fn circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color);

    fn rect(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Color, style: RectStyle);

    fn line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Color, width: f32);

    /// Draws `text` with its pen origin at `(x, y)` on the baseline.
    fn text(&mut self, text: &str, x: f32, y: f32, color: Color, size: f32);

    fn measure_text(&self, text: &str, size: f32) -> f32;

    fn font_metrics(&self, size: f32) -> FontMetrics;

    /// Enters a rotated frame that is left again when the returned guard
    /// drops, whichever way the caller exits.
    fn rotated(&mut self, degrees: f32) -> RotationScope<'_, Self>
    where
        Self: Sized,
    {
        RotationScope::enter(self, degrees)
    }

    fn with_rotation<R>(&mut self, degrees: f32, body: impl FnOnce(&mut Self) -> R) -> R
    where
        Self: Sized,
    {
        let mut scope = self.rotated(degrees);
        body(&mut *scope)
    }
}

/// A save/rotate pair whose restore runs on drop.
pub struct RotationScope<'a, S: Surface> {
    surface: &'a mut S,
}

impl<'a, S: Surface> RotationScope<'a, S> {
    fn enter(surface: &'a mut S, degrees: f32) -> Self {
        surface.save();
        surface.rotate(degrees);
        Self { surface }
    }
}

impl<S: Surface> Deref for RotationScope<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        &*self.surface
    }
}

impl<S: Surface> DerefMut for RotationScope<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut *self.surface
    }
}

impl<S: Surface> Drop for RotationScope<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}

/// Rotates the point `(x, y)` by `degrees` in the y-down frame.
pub fn rotate_point(x: f32, y: f32, degrees: f32) -> (f32, f32) {
    let (sin, cos) = degrees.to_radians().sin_cos();
    (x * cos - y * sin, x * sin + y * cos)
}

/// Folds an angle into `[0, 360)`.
pub fn normalize_degrees(degrees: f32) -> f32 {
    degrees.rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_rotation_is_clockwise_on_screen() {
        // 12 o'clock turned by 90 degrees lands on 3 o'clock
        let (x, y) = rotate_point(0.0, -100.0, 90.0);
        assert!((x - 100.0).abs() < 1e-3);
        assert!(y.abs() < 1e-3);
    }

    #[test]
    fn normalize_wraps_negative_angles() {
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
    }
}
