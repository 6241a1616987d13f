//! Day-of-year markers, month boundaries and month names.
//!
//! The year is spread over a full turn: day `d` of a year with `n` days sits
//! at `-360/n * d + offset + 180` degrees, sign-flipped for the southern
//! face. Marks are drawn below the pivot, which is why the half turn is
//! added.

use std::f32::consts::PI;

use crate::calendar::CalendarDate;
use crate::config::{Color, FaceConfig};
use crate::curved_text::draw_curved_text;
use crate::orientation::Orientation;
use crate::surface::Surface;

/// How much a day stands out on the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Significance {
    Today,
    Tenth,
    Fifth,
    Ordinary,
}

impl Significance {
    pub fn of(date: CalendarDate, today: CalendarDate) -> Self {
        match date.day() {
            _ if date == today => Significance::Today,
            d if d % 10 == 0 => Significance::Tenth,
            d if d % 5 == 0 => Significance::Fifth,
            _ => Significance::Ordinary,
        }
    }

    pub fn dot_radius(self) -> f32 {
        match self {
            Significance::Today => 4.0,
            Significance::Tenth => 3.0,
            Significance::Fifth => 2.0,
            Significance::Ordinary => 1.0,
        }
    }

    pub fn color(self, config: &FaceConfig) -> Color {
        match self {
            Significance::Today => config.today_grid_color,
            _ => config.day_grid_color,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MonthFeature {
    /// First day of a month: a short radial line.
    Boundary,
    /// Fifteenth day: the month's name along the arc.
    Label(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayMarker {
    pub day_of_year: u32,
    pub date: CalendarDate,
    pub angle: f32,
    pub significance: Significance,
    pub feature: Option<MonthFeature>,
}

/// Rotation, in degrees, of day `day_of_year` of a year with `days_in_year` days.
pub fn day_angle(day_of_year: u32, days_in_year: u32, orientation: &Orientation) -> f32 {
    (-360.0 / days_in_year as f32 * day_of_year as f32 + orientation.offset + 180.0)
        * orientation.hemisphere.sign()
}

/// One marker for each day-of-year in `[1, days_in_year)`; the last day of
/// the year gets no dot.
pub fn layout_date_ring(today: CalendarDate, orientation: &Orientation) -> Vec<DayMarker> {
    let days_in_year = today.days_in_year();
    today
        .days_of_year()
        .take_while(|(day_of_year, _)| *day_of_year < days_in_year)
        .map(|(day_of_year, date)| {
            let feature = match date.day() {
                1 => Some(MonthFeature::Boundary),
                15 => Some(MonthFeature::Label(date.month_name())),
                _ => None,
            };
            DayMarker {
                day_of_year,
                date,
                angle: day_angle(day_of_year, days_in_year, orientation),
                significance: Significance::of(date, today),
                feature,
            }
        })
        .collect()
}

pub fn draw_date_ring<S: Surface>(
    surface: &mut S,
    config: &FaceConfig,
    today: CalendarDate,
    orientation: &Orientation,
) {
    // the divisor stays 365 in leap years too
    let boundary_rate = PI / if orientation.is_mirrored() { 365.0 } else { -365.0 };
    let metrics = surface.font_metrics(config.date_text_size);
    let label_radius = config.month_label_baseline - (metrics.ascent + metrics.descent) * 0.5;

    for marker in layout_date_ring(today, orientation) {
        let mut day = surface.rotated(marker.angle);
        day.circle(
            0.0,
            config.day_dot_baseline,
            marker.significance.dot_radius(),
            marker.significance.color(config),
        );

        match marker.feature {
            Some(MonthFeature::Boundary) => {
                let start_y = config.sky_background_radius;
                let stop_y = config.date_panel_radius;
                day.line(
                    start_y * boundary_rate,
                    start_y,
                    stop_y * boundary_rate,
                    stop_y,
                    config.month_border_color,
                    config.month_border_width,
                );
            }
            Some(MonthFeature::Label(name)) => draw_curved_text(
                &mut *day,
                &name,
                label_radius,
                config.month_name_color,
                config.date_text_size,
            ),
            None => {}
        }
    }
}
