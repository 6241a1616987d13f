//! Whole-face properties, checked on recorded frames and on real pixels.

use std::sync::Arc;

use rand::Rng;
use skyclock::curved_text::ArcLayout;
use skyclock::date_ring::day_angle;
use skyclock::surface::normalize_degrees;
use skyclock::{
    BitmapFace, CalendarDate, Canvas, DrawCommand, FaceConfig, HandAngles, Orientation, Scene,
    SkyClock, Surface,
};

fn clock(y: i32, m: u32, d: u32) -> SkyClock {
    let date = CalendarDate::from_ymd(y, m, d).unwrap();
    SkyClock::new(FaceConfig::default(), Arc::new(BitmapFace), date).unwrap()
}

/// Rotations of the day dots, in drawing order.
fn day_dot_rotations(scene: &Scene) -> Vec<f32> {
    let baseline = FaceConfig::default().day_dot_baseline;
    scene
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Circle { cy, rotation, .. } if *cy == baseline => Some(*rotation),
            _ => None,
        })
        .collect()
}

fn line_count(scene: &Scene) -> usize {
    scene
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::Line { .. }))
        .count()
}

fn label_glyphs(scene: &Scene) -> Vec<(String, f32)> {
    scene
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, rotation, .. } => Some((text.clone(), *rotation)),
            _ => None,
        })
        .collect()
}

#[test]
fn one_dot_per_day_but_the_last() {
    for (year, expected) in [(2023, 364), (2024, 365), (1900, 364), (2000, 365)] {
        let scene = clock(year, 6, 1).record();
        assert_eq!(day_dot_rotations(&scene).len(), expected, "{year}");
    }
}

#[test]
fn twelve_boundaries_and_twelve_names() {
    let scene = clock(2023, 8, 8).record();
    assert_eq!(line_count(&scene), 12);

    let all_names: String = MONTHS.concat();
    let drawn: String = label_glyphs(&scene).into_iter().map(|(t, _)| t).collect();
    assert_eq!(drawn, all_names);
}

#[test]
fn leap_day_is_marked_at_day_sixty() {
    let scene = clock(2024, 2, 29).record();
    let config = FaceConfig::default();
    let today: Vec<_> = scene
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Circle {
                rotation,
                radius,
                color,
                ..
            } if *color == config.today_grid_color => Some((*rotation, *radius)),
            _ => None,
        })
        .collect();
    let expected = -360.0f32 / 366.0 * 60.0 + 180.0;
    assert_eq!(today, vec![(expected, 4.0)]);
    assert_eq!(expected, day_angle(60, 366, &Orientation::default()));
}

#[test]
fn southern_face_mirrors_every_day() {
    let mut rng = rand::rng();
    for _ in 0..8 {
        let year = rng.random_range(1901..2100);
        let offset: f32 = rng.random_range(-360.0..360.0);
        let mut clock = clock(year, 1, 1);

        clock.set_orientation(offset, false);
        let north = day_dot_rotations(&clock.record());
        clock.set_orientation(offset, true);
        let south = day_dot_rotations(&clock.record());

        assert_eq!(north.len(), south.len());
        for (n, s) in north.iter().zip(&south) {
            assert_eq!(*s, -*n);
            let folded = normalize_degrees(*n) + normalize_degrees(*s);
            assert!(folded.abs() < 1e-3 || (folded - 360.0).abs() < 1e-3);
        }
    }
}

#[test]
fn boundary_lines_lean_the_other_way_when_mirrored() {
    let mut clock = clock(2022, 4, 4);
    let lean = |scene: &Scene| -> Vec<f32> {
        scene
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { x0, .. } => Some(*x0),
                _ => None,
            })
            .collect()
    };
    let north = lean(&clock.record());
    clock.set_orientation(0.0, true);
    let south = lean(&clock.record());
    assert!(north.iter().all(|x| *x < 0.0));
    assert!(south.iter().all(|x| *x > 0.0));
    let expected = 330.0 * std::f32::consts::PI / 365.0;
    assert!((south[0] - expected).abs() < 1e-4);
}

#[test]
fn leap_and_common_years_step_differently() {
    let leap = day_dot_rotations(&clock(2024, 1, 1).record());
    let common = day_dot_rotations(&clock(2023, 1, 1).record());
    let leap_step = leap[0] - leap[1];
    let common_step = common[0] - common[1];
    assert!((leap_step - 360.0 / 366.0).abs() < 1e-3);
    assert!((common_step - 360.0 / 365.0).abs() < 1e-3);
    assert!(common_step > leap_step);
}

const MONTHS: [&str; 12] = [
    "JANUARY", "FEBRUARY", "MARCH", "APRIL", "MAY", "JUNE", "JULY", "AUGUST", "SEPTEMBER",
    "OCTOBER", "NOVEMBER", "DECEMBER",
];

#[test]
fn month_names_are_centered_on_their_day() {
    let clock = clock(2023, 3, 3);
    let scene = clock.record();
    let glyphs = label_glyphs(&scene);
    let metrics = scene.font_metrics(24.0);
    let radius = 356.0 - (metrics.ascent + metrics.descent) * 0.5;

    for (month, name) in [(1u32, "JANUARY"), (9, "SEPTEMBER")] {
        let first: usize = MONTHS[..month as usize - 1].iter().map(|m| m.len()).sum();
        let n = name.len();
        let date = CalendarDate::from_ymd(2023, month, 15).unwrap();
        let anchor = day_angle(date.day_of_year(), 365, &clock.orientation());
        let layout = ArcLayout::new(&scene, name, radius, 24.0);

        let (_, first_rotation) = glyphs[first];
        let (_, last_rotation) = glyphs[first + n - 1];
        let (_, last_step) = layout.glyphs[n - 1];

        let lead = first_rotation - anchor;
        let trail = anchor - (last_rotation + last_step);
        assert!((lead - layout.start).abs() < 1e-3, "{name}");
        assert!((lead - trail).abs() < 1e-2, "{name}: {lead} vs {trail}");
    }
}

#[test]
fn redraw_is_pixel_identical() {
    let mut clock = clock(2021, 12, 24);
    clock.set_orientation(-73.25, true);
    clock.set_hands(HandAngles { hour: 200.0, minute: 15.0 });
    let first = clock.request_draw().frame().to_vec();
    let second = clock.request_draw().frame().to_vec();
    assert_eq!(first, second);
}

#[test]
fn recorded_frame_replays_to_the_same_pixels() {
    let mut clock = clock(2020, 7, 15);
    clock.set_orientation(21.0, false);
    let scene = clock.record();
    let size = clock.config().canvas_size() as usize;
    let mut replayed = Canvas::new(size, size, Arc::new(BitmapFace));
    scene.render(&mut replayed);
    assert_eq!(clock.request_draw().frame(), replayed.frame());
}

#[test]
fn rings_show_through_in_order() {
    let mut clock = clock(2021, 1, 10);
    let config = clock.config().clone();
    let canvas = clock.request_draw();
    // between the grid and the bezel edge
    assert_eq!(canvas.pixel_at(0.0, 397.0), Some(config.bezel_color.to_rgba()));
    // sky in the middle
    assert_eq!(canvas.pixel_at(0.0, 100.0), Some(config.sky_background_color.to_rgba()));
    // outside the bezel
    assert_eq!(canvas.pixel_at(-399.0, -399.0), Some(config.background_color.to_rgba()));
}

#[test]
fn orientation_changes_move_the_ring() {
    let mut clock = clock(2021, 5, 5);
    let before = day_dot_rotations(&clock.record());
    clock.set_orientation(10.0, false);
    let after = day_dot_rotations(&clock.record());
    for (b, a) in before.iter().zip(&after) {
        assert!((a - b - 10.0).abs() < 1e-3);
    }
}

#[test]
fn hands_are_drawn_last() {
    let mut clock = clock(2021, 5, 5);
    clock.set_hands(HandAngles { hour: 45.0, minute: 300.0 });
    let scene = clock.record();
    let tail: Vec<f32> = scene.commands()[scene.commands().len() - 3..]
        .iter()
        .map(DrawCommand::rotation)
        .collect();
    assert_eq!(tail, vec![45.0, 300.0, 0.0]);
    assert_eq!(line_count(&scene), 14);

    clock.set_hands_visible(false);
    assert_eq!(line_count(&clock.record()), 12);
}

#[test]
fn overlapping_rings_are_refused() {
    let config = FaceConfig::builder().sky_background_radius(380.0).build();
    let date = CalendarDate::from_ymd(2021, 5, 5).unwrap();
    assert!(SkyClock::new(config, Arc::new(BitmapFace), date).is_err());
}
