//! Minute grid around the date panel.

use crate::config::FaceConfig;
use crate::surface::{RectStyle, Surface};

pub const TICK_COUNT: u32 = 60;

/// Shape drawn at one of the sixty minute positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickMark {
    /// Reference mark at 12 o'clock: two rectangles side by side.
    DoubleRect,
    /// Quarter-hour mark.
    Rect,
    /// Five-minute mark.
    LargeDot,
    /// Every other minute.
    SmallDot,
}

impl TickMark {
    pub fn for_index(index: u32) -> Self {
        match index {
            0 => TickMark::DoubleRect,
            i if i % 15 == 0 => TickMark::Rect,
            i if i % 5 == 0 => TickMark::LargeDot,
            _ => TickMark::SmallDot,
        }
    }
}

/// Draws the sixty ticks, each under its own rotation scope.
pub fn draw_minute_grid<S: Surface>(surface: &mut S, config: &FaceConfig) {
    let size = config.tick_rectangle_size;
    let double_rect1_x = -size - config.double_tick_interval * 0.5;
    let double_rect2_x = config.double_tick_interval * 0.5;
    let single_rect_half = size * 0.5;
    let offset_y = -config.date_panel_radius - size;
    let dot_y = offset_y + size * 0.5;
    let color = config.minute_grid_color;

    for index in 0..TICK_COUNT {
        let mut tick = surface.rotated(index as f32 * config.tick_step_degrees);
        match TickMark::for_index(index) {
            TickMark::DoubleRect => {
                for x in [double_rect1_x, double_rect2_x] {
                    tick.rect(x, offset_y, x + size, offset_y + size, color, RectStyle::Fill);
                }
            }
            TickMark::Rect => tick.rect(
                -single_rect_half,
                offset_y,
                single_rect_half,
                offset_y + size,
                color,
                RectStyle::Fill,
            ),
            TickMark::LargeDot => tick.circle(0.0, dot_y, config.large_dot_radius, color),
            TickMark::SmallDot => tick.circle(0.0, dot_y, config.small_dot_radius, color),
        }
    }
}
