//! Panels compose the primitives into complete layers of the face.

use chrono::{NaiveTime, Timelike};
use log::debug;

use crate::calendar::CalendarDate;
use crate::config::{Color, FaceConfig};
use crate::date_ring::draw_date_ring;
use crate::grid::draw_minute_grid;
use crate::orientation::Orientation;
use crate::surface::Surface;

/// A layer of the face. Panels hold state only; drawing recomputes all
/// geometry from that state every time.
pub trait Panel {
    fn draw<S: Surface>(&self, surface: &mut S, config: &FaceConfig);
}

// ============================================================================
// CLOCK BASE
// ============================================================================

/// Backdrop rings, minute grid and date ring.
#[derive(Debug, Clone)]
pub struct ClockBasePanel {
    pub current_date: CalendarDate,
    orientation: Orientation,
}

impl ClockBasePanel {
    pub fn new(current_date: CalendarDate) -> Self {
        Self {
            current_date,
            orientation: Orientation::default(),
        }
    }

    pub fn set(&mut self, offset: f32, direction: bool) {
        self.orientation = Orientation::new(offset, direction);
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn draw_back_panel<S: Surface>(surface: &mut S, config: &FaceConfig) {
        for ring in config.rings() {
            surface.circle(0.0, 0.0, ring.radius, ring.color);
        }
    }
}

impl Panel for ClockBasePanel {
    fn draw<S: Surface>(&self, surface: &mut S, config: &FaceConfig) {
        debug!(
            "drawing clock base for {} (offset {:.2}, {:?})",
            self.current_date, self.orientation.offset, self.orientation.hemisphere
        );
        Self::draw_back_panel(surface, config);
        draw_minute_grid(surface, config);
        draw_date_ring(surface, config, self.current_date, &self.orientation);
    }
}

// ============================================================================
// HANDS
// ============================================================================

/// Hand rotations in degrees, clockwise from 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandAngles {
    pub hour: f32,
    pub minute: f32,
}

impl HandAngles {
    /// Civil time on a 24-hour dial: the hour hand turns once a day, the
    /// minute hand once an hour.
    pub fn from_time(time: NaiveTime) -> Self {
        let minutes = time.minute() as f32 + time.second() as f32 / 60.0;
        let hours = time.hour() as f32 + minutes / 60.0;
        Self {
            hour: hours / 24.0 * 360.0,
            minute: minutes / 60.0 * 360.0,
        }
    }
}

/// Hour and minute hands plus the hub, drawn over the base panel.
#[derive(Debug, Clone, Default)]
pub struct HandsPanel {
    pub angles: HandAngles,
    pub visible: bool,
}

impl HandsPanel {
    pub fn new(visible: bool) -> Self {
        Self {
            angles: HandAngles::default(),
            visible,
        }
    }

    fn draw_hand<S: Surface>(
        surface: &mut S,
        angle: f32,
        length: f32,
        back_length: f32,
        width: f32,
        color: Color,
    ) {
        surface.with_rotation(angle, |s| s.line(0.0, back_length, 0.0, -length, color, width));
    }
}

impl Panel for HandsPanel {
    fn draw<S: Surface>(&self, surface: &mut S, config: &FaceConfig) {
        if !self.visible {
            return;
        }
        Self::draw_hand(
            surface,
            self.angles.hour,
            config.hour_hand_length,
            config.hand_back_length,
            config.hour_hand_width,
            config.hour_hand_color,
        );
        Self::draw_hand(
            surface,
            self.angles.minute,
            config.minute_hand_length,
            config.hand_back_length,
            config.minute_hand_width,
            config.minute_hand_color,
        );
        surface.circle(0.0, 0.0, config.hub_radius, config.minute_hand_color);
    }
}
