use std::cmp::Ordering;

use bon::Builder;

use crate::error::{Result, SkyClockError};

/// Color representation for face elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xff]
    }
}

pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
pub const DARK_BLUE: Color = Color::new(0x00, 0x00, 0x8b);
pub const MIDNIGHT_BLUE: Color = Color::new(0x19, 0x19, 0x70);
pub const GRAY: Color = Color::new(0x80, 0x80, 0x80);
pub const DARK_GRAY: Color = Color::new(0xa9, 0xa9, 0xa9);
pub const LIGHT_GRAY: Color = Color::new(0xd3, 0xd3, 0xd3);
pub const RED: Color = Color::new(0xff, 0x00, 0x00);
pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
pub const ORANGE: Color = Color::new(0xff, 0x80, 0x00);

/// One filled disc of the backdrop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSpec {
    pub radius: f32,
    pub color: Color,
}

/// Geometry, palette and pacing of the clock face.
///
/// The defaults are the reference constants; changing radii or text sizes
/// changes the rendering, so golden comparisons must pin them.
#[derive(Debug, Clone, Builder)]
pub struct FaceConfig {
    // Backdrop rings, outer to inner
    #[builder(default = 400.0)]
    pub bezel_radius: f32,
    #[builder(default = 370.0)]
    pub date_panel_radius: f32,
    #[builder(default = 330.0)]
    pub sky_background_radius: f32,

    // Minute grid
    #[builder(default = 22.0)]
    pub tick_rectangle_size: f32,
    #[builder(default = 8.0)]
    pub double_tick_interval: f32,
    #[builder(default = 8.0)]
    pub large_dot_radius: f32,
    #[builder(default = 4.0)]
    pub small_dot_radius: f32,
    #[builder(default = 6.0)]
    pub tick_step_degrees: f32,

    // Date ring
    #[builder(default = 341.0)]
    pub day_dot_baseline: f32,
    #[builder(default = 356.0)]
    pub month_label_baseline: f32,
    #[builder(default = 24.0)]
    pub date_text_size: f32,
    #[builder(default = 2.0)]
    pub month_border_width: f32,

    // Hands
    #[builder(default = 250.0)]
    pub hour_hand_length: f32,
    #[builder(default = 310.0)]
    pub minute_hand_length: f32,
    #[builder(default = 40.0)]
    pub hand_back_length: f32,
    #[builder(default = 10.0)]
    pub hour_hand_width: f32,
    #[builder(default = 6.0)]
    pub minute_hand_width: f32,
    #[builder(default = 12.0)]
    pub hub_radius: f32,

    // Colors
    #[builder(default = BLACK)]
    pub background_color: Color,
    #[builder(default = DARK_BLUE)]
    pub bezel_color: Color,
    #[builder(default = GRAY)]
    pub minute_grid_color: Color,
    #[builder(default = LIGHT_GRAY)]
    pub date_panel_color: Color,
    #[builder(default = RED)]
    pub today_grid_color: Color,
    #[builder(default = BLACK)]
    pub day_grid_color: Color,
    #[builder(default = DARK_GRAY)]
    pub month_border_color: Color,
    #[builder(default = BLACK)]
    pub month_name_color: Color,
    #[builder(default = MIDNIGHT_BLUE)]
    pub sky_background_color: Color,
    #[builder(default = WHITE)]
    pub hour_hand_color: Color,
    #[builder(default = ORANGE)]
    pub minute_hand_color: Color,

    // Window host
    #[builder(default = 30.0)]
    pub max_framerate: f64,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl FaceConfig {
    /// Backdrop discs in draw order.
    pub fn rings(&self) -> [RingSpec; 3] {
        [
            RingSpec {
                radius: self.bezel_radius,
                color: self.bezel_color,
            },
            RingSpec {
                radius: self.date_panel_radius,
                color: self.date_panel_color,
            },
            RingSpec {
                radius: self.sky_background_radius,
                color: self.sky_background_color,
            },
        ]
    }

    /// Side of the square buffer that holds the whole bezel.
    pub fn canvas_size(&self) -> u32 {
        (self.bezel_radius * 2.0).ceil() as u32
    }

    pub fn validate(&self) -> Result<()> {
        let rings = self.rings();
        if rings.iter().any(|ring| !is_positive(ring.radius)) {
            return Err(SkyClockError::InvalidConfig(
                "ring radii must be positive".into(),
            ));
        }
        if rings.windows(2).any(|pair| pair[0].radius <= pair[1].radius) {
            return Err(SkyClockError::InvalidConfig(
                "ring radii must strictly decrease from bezel to sky".into(),
            ));
        }
        if !is_positive(self.date_text_size) || !is_positive(self.max_framerate as f32) {
            return Err(SkyClockError::InvalidConfig(
                "text size and frame rate must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// False for zero, negatives and NaN.
fn is_positive(value: f32) -> bool {
    value.partial_cmp(&0.0) == Some(Ordering::Greater)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = FaceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.canvas_size(), 800);
        assert_eq!(config.tick_rectangle_size, 22.0);
        assert_eq!(config.day_dot_baseline, 341.0);
    }

    #[test]
    fn rings_are_outer_to_inner() {
        let rings = FaceConfig::default().rings();
        assert!(rings[0].radius > rings[1].radius);
        assert!(rings[1].radius > rings[2].radius);
        assert_eq!(rings[2].color, MIDNIGHT_BLUE);
    }

    #[test]
    fn overlapping_rings_are_rejected() {
        let config = FaceConfig::builder()
            .date_panel_radius(300.0)
            .sky_background_radius(320.0)
            .build();
        assert!(matches!(
            config.validate(),
            Err(SkyClockError::InvalidConfig(_))
        ));
    }

    #[test]
    fn non_positive_or_nan_values_are_rejected() {
        let nan_ring = FaceConfig::builder().sky_background_radius(f32::NAN).build();
        assert!(nan_ring.validate().is_err());
        let zero_text = FaceConfig::builder().date_text_size(0.0).build();
        assert!(zero_text.validate().is_err());
        let nan_rate = FaceConfig::builder().max_framerate(f64::NAN).build();
        assert!(nan_rate.validate().is_err());
    }
}
