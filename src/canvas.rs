use std::path::Path;
use std::sync::Arc;

use image::RgbaImage;

use crate::config::Color;
use crate::error::{Result, SkyClockError};
use crate::surface::{rotate_point, RectStyle, Surface};
use crate::typeface::{FontMetrics, Typeface};

// ============================================================================
// CANVAS
// ============================================================================

/// Off-screen RGBA8 buffer with its origin at the center.
///
/// Drawing units map 1:1 to pixels; anything that falls outside the buffer
/// is clipped silently.
pub struct Canvas {
    frame: Vec<u8>,
    width: usize,
    height: usize,
    rotation: f32,
    saved: Vec<f32>,
    typeface: Arc<dyn Typeface>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, typeface: Arc<dyn Typeface>) -> Self {
        Self {
            frame: vec![0; width * height * 4],
            width,
            height,
            rotation: 0.0,
            saved: Vec::new(),
            typeface,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA8 bytes, row major.
    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let mut out = [0; 4];
        out.copy_from_slice(&self.frame[idx..idx + 4]);
        Some(out)
    }

    /// Pixel under a center-relative point, ignoring the current rotation.
    pub fn pixel_at(&self, x: f32, y: f32) -> Option<[u8; 4]> {
        let px = (x + self.width as f32 / 2.0).floor();
        let py = (y + self.height as f32 / 2.0).floor();
        if px < 0.0 || py < 0.0 {
            return None;
        }
        self.pixel(px as usize, py as usize)
    }

    /// Copies the finished frame into a presentation buffer of equal size.
    pub fn copy_to(&self, target: &mut [u8]) {
        let len = target.len().min(self.frame.len());
        target[..len].copy_from_slice(&self.frame[..len]);
    }

    pub fn to_image(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width as u32, self.height as u32, self.frame.clone())
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        let img = self.to_image().ok_or_else(|| {
            SkyClockError::InvalidConfig(format!("{}x{} frame", self.width, self.height))
        })?;
        img.save(path)?;
        Ok(())
    }

    fn center(&self) -> (f32, f32) {
        (self.width as f32 / 2.0, self.height as f32 / 2.0)
    }

    fn to_device(&self, x: f32, y: f32) -> (f32, f32) {
        let (rx, ry) = rotate_point(x, y, self.rotation);
        let (cx, cy) = self.center();
        (cx + rx, cy + ry)
    }

    fn to_local(&self, dx: f32, dy: f32) -> (f32, f32) {
        let (cx, cy) = self.center();
        rotate_point(dx - cx, dy - cy, -self.rotation)
    }

    fn blend_pixel(&mut self, x: i32, y: i32, color: Color, alpha: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        let a = alpha.clamp(0.0, 1.0);
        let src = [color.r as f32, color.g as f32, color.b as f32];
        for (channel, value) in src.iter().enumerate() {
            let dst = self.frame[idx + channel] as f32;
            self.frame[idx + channel] = (value * a + dst * (1.0 - a)).round() as u8;
        }
        self.frame[idx + 3] = 0xff;
    }

    /// Spreads one sample over the four nearest pixels.
    fn blend_subpixel(&mut self, x: f32, y: f32, color: Color, alpha: f32) {
        let x_floor = x.floor();
        let y_floor = y.floor();
        // all four taps would miss the buffer
        if !(-1.0..=self.width as f32).contains(&x_floor)
            || !(-1.0..=self.height as f32).contains(&y_floor)
        {
            return;
        }
        let x_frac = x - x_floor;
        let y_frac = y - y_floor;
        let (x0, y0) = (x_floor as i32, y_floor as i32);
        let samples = [
            (x0, y0, (1.0 - x_frac) * (1.0 - y_frac)),
            (x0 + 1, y0, x_frac * (1.0 - y_frac)),
            (x0, y0 + 1, (1.0 - x_frac) * y_frac),
            (x0 + 1, y0 + 1, x_frac * y_frac),
        ];
        for (px, py, weight) in samples {
            let final_alpha = alpha * weight;
            if final_alpha > 0.001 {
                self.blend_pixel(px, py, color, final_alpha);
            }
        }
    }

    fn fill_disc(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        let (min_x, max_x) = ((cx - radius - 1.0).floor() as i32, (cx + radius + 1.0).ceil() as i32);
        let (min_y, max_y) = ((cy - radius - 1.0).floor() as i32, (cy + radius + 1.0).ceil() as i32);
        for py in min_y.max(0)..=max_y.min(self.height as i32 - 1) {
            for px in min_x.max(0)..=max_x.min(self.width as i32 - 1) {
                let dist = ((px as f32 + 0.5 - cx).powi(2) + (py as f32 + 0.5 - cy).powi(2)).sqrt();
                let aa = (radius + 0.5 - dist).clamp(0.0, 1.0);
                if aa > 0.0 {
                    self.blend_pixel(px, py, color, aa);
                }
            }
        }
    }

    fn fill_rect(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Color) {
        let (left, right) = (x0.min(x1), x0.max(x1));
        let (top, bottom) = (y0.min(y1), y0.max(y1));
        let corners = [
            self.to_device(left, top),
            self.to_device(right, top),
            self.to_device(left, bottom),
            self.to_device(right, bottom),
        ];
        let (min_x, max_x, min_y, max_y) = corners.iter().fold(
            (f32::MAX, f32::MIN, f32::MAX, f32::MIN),
            |(min_x, max_x, min_y, max_y), &(x, y)| {
                (min_x.min(x), max_x.max(x), min_y.min(y), max_y.max(y))
            },
        );
        let start_x = (min_x.floor() - 1.0).max(0.0) as i32;
        let end_x = (max_x.ceil() + 1.0).min(self.width as f32 - 1.0) as i32;
        let start_y = (min_y.floor() - 1.0).max(0.0) as i32;
        let end_y = (max_y.ceil() + 1.0).min(self.height as f32 - 1.0) as i32;
        for py in start_y..=end_y {
            for px in start_x..=end_x {
                let (lx, ly) = self.to_local(px as f32 + 0.5, py as f32 + 0.5);
                let outside_x = (left - lx).max(lx - right);
                let outside_y = (top - ly).max(ly - bottom);
                let aa = (0.5 - outside_x.max(outside_y)).clamp(0.0, 1.0);
                if aa > 0.0 {
                    self.blend_pixel(px, py, color, aa);
                }
            }
        }
    }

    fn thick_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, thickness: f32, color: Color) {
        let pad = thickness.ceil() + 1.0;
        let min_x = (x0.min(x1) - pad).floor().max(0.0) as i32;
        let max_x = (x0.max(x1) + pad).ceil().min(self.width as f32 - 1.0) as i32;
        let min_y = (y0.min(y1) - pad).floor().max(0.0) as i32;
        let max_y = (y0.max(y1) + pad).ceil().min(self.height as f32 - 1.0) as i32;
        let dx = x1 - x0;
        let dy = y1 - y0;
        let len_sq = dx * dx + dy * dy;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let (sx, sy) = (x as f32 + 0.5, y as f32 + 0.5);
                let t = if len_sq > 0.0 {
                    (((sx - x0) * dx + (sy - y0) * dy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let lx = x0 + t * dx;
                let ly = y0 + t * dy;
                let dist = ((lx - sx).powi(2) + (ly - sy).powi(2)).sqrt();
                let aa = (1.0 - (dist - thickness / 2.0).clamp(0.0, 1.0)).clamp(0.0, 1.0);
                if aa > 0.01 {
                    self.blend_pixel(x, y, color, aa);
                }
            }
        }
    }
}

impl Surface for Canvas {
    fn begin_frame(&mut self, background: Color) {
        let rgba = background.to_rgba();
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&rgba);
        }
        self.rotation = 0.0;
        self.saved.clear();
    }

    fn save(&mut self) {
        self.saved.push(self.rotation);
    }

    fn restore(&mut self) {
        if let Some(rotation) = self.saved.pop() {
            self.rotation = rotation;
        }
    }

    fn rotate(&mut self, degrees: f32) {
        self.rotation += degrees;
    }

    fn rotation(&self) -> f32 {
        self.rotation
    }

    fn circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        let (dx, dy) = self.to_device(cx, cy);
        self.fill_disc(dx, dy, radius, color);
    }

    fn rect(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Color, style: RectStyle) {
        match style {
            RectStyle::Fill => self.fill_rect(x0, y0, x1, y1, color),
            RectStyle::Stroke(width) => {
                for (ax, ay, bx, by) in [
                    (x0, y0, x1, y0),
                    (x0, y1, x1, y1),
                    (x0, y0, x0, y1),
                    (x1, y0, x1, y1),
                ] {
                    self.line(ax, ay, bx, by, color, width);
                }
            }
        }
    }

    fn line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Color, width: f32) {
        let (ax, ay) = self.to_device(x0, y0);
        let (bx, by) = self.to_device(x1, y1);
        self.thick_line(ax, ay, bx, by, width, color);
    }

    fn text(&mut self, text: &str, x: f32, y: f32, color: Color, size: f32) {
        let face = Arc::clone(&self.typeface);
        let mut pen = x;
        for ch in text.chars() {
            face.rasterize(ch, size, &mut |gx, gy, coverage| {
                let (dx, dy) = self.to_device(pen + gx, y + gy);
                self.blend_subpixel(dx, dy, color, coverage);
            });
            pen += face.advance(ch.encode_utf8(&mut [0; 4]), size);
        }
    }

    fn measure_text(&self, text: &str, size: f32) -> f32 {
        self.typeface.advance(text, size)
    }

    fn font_metrics(&self, size: f32) -> FontMetrics {
        self.typeface.metrics(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BLACK, RED, WHITE};
    use crate::typeface::BitmapFace;

    fn canvas() -> Canvas {
        let mut canvas = Canvas::new(100, 100, Arc::new(BitmapFace));
        canvas.begin_frame(BLACK);
        canvas
    }

    #[test]
    fn begin_frame_fills_background() {
        let mut canvas = canvas();
        canvas.begin_frame(RED);
        assert!(canvas.frame().chunks_exact(4).all(|px| px == [0xff, 0, 0, 0xff]));
    }

    #[test]
    fn circle_is_drawn_around_center() {
        let mut canvas = canvas();
        canvas.circle(0.0, 0.0, 10.0, WHITE);
        assert_eq!(canvas.pixel_at(0.0, 0.0), Some([0xff, 0xff, 0xff, 0xff]));
        assert_eq!(canvas.pixel_at(20.0, 0.0), Some([0, 0, 0, 0xff]));
    }

    #[test]
    fn rotation_moves_shapes() {
        let mut canvas = canvas();
        canvas.with_rotation(90.0, |c| c.circle(0.0, -30.0, 3.0, WHITE));
        // 12 o'clock rotated a quarter turn is 3 o'clock
        assert_eq!(canvas.pixel_at(30.0, 0.0), Some([0xff, 0xff, 0xff, 0xff]));
        assert_eq!(canvas.pixel_at(0.0, -30.0), Some([0, 0, 0, 0xff]));
        assert_eq!(canvas.rotation(), 0.0);
    }

    #[test]
    fn rotated_rect_covers_rotated_area() {
        let mut canvas = canvas();
        canvas.with_rotation(180.0, |c| {
            c.rect(-5.0, -40.0, 5.0, -30.0, WHITE, RectStyle::Fill)
        });
        assert_eq!(canvas.pixel_at(0.0, 35.0), Some([0xff, 0xff, 0xff, 0xff]));
        assert_eq!(canvas.pixel_at(0.0, -35.0), Some([0, 0, 0, 0xff]));
    }

    #[test]
    fn drawing_outside_clips() {
        let mut canvas = canvas();
        canvas.circle(500.0, 500.0, 20.0, WHITE);
        canvas.line(-1000.0, -1000.0, 1000.0, -1000.0, WHITE, 3.0);
        canvas.text("JANUARY", 400.0, 400.0, WHITE, 24.0);
        assert!(canvas.frame().chunks_exact(4).all(|px| px == [0, 0, 0, 0xff]));
    }

    #[test]
    fn far_away_coordinates_clip_without_overflow() {
        let mut canvas = canvas();
        canvas.text("A", 3.0e9, 0.0, WHITE, 24.0);
        canvas.text("A", -3.0e9, -3.0e9, WHITE, 24.0);
        canvas.circle(-3.0e9, 3.0e9, 5.0, WHITE);
        assert!(canvas.frame().chunks_exact(4).all(|px| px == [0, 0, 0, 0xff]));

        // a band crossing the whole buffer is still drawn where it is visible
        canvas.rect(-3.0e9, -10.0, 3.0e9, 10.0, WHITE, RectStyle::Fill);
        canvas.rect(-5.0, 3.0e9, 5.0, 3.1e9, RED, RectStyle::Fill);
        assert_eq!(canvas.pixel_at(0.0, 0.0), Some([0xff, 0xff, 0xff, 0xff]));
        assert_eq!(canvas.pixel_at(-49.0, 5.0), Some([0xff, 0xff, 0xff, 0xff]));
        assert_eq!(canvas.pixel_at(0.0, 30.0), Some([0, 0, 0, 0xff]));
    }

    #[test]
    fn restore_without_save_is_ignored() {
        let mut canvas = canvas();
        canvas.rotate(15.0);
        canvas.restore();
        assert_eq!(canvas.rotation(), 15.0);
    }

    #[test]
    fn text_inks_above_baseline() {
        let mut canvas = canvas();
        canvas.text("T", 0.0, 0.0, WHITE, 16.0);
        // T's stem runs from the cap line down to the baseline
        assert_eq!(canvas.pixel_at(5.0, -3.0), Some([0xff, 0xff, 0xff, 0xff]));
        assert_eq!(canvas.pixel_at(5.0, 6.0), Some([0, 0, 0, 0xff]));
    }
}
