//! Polar rendering engine for an analog sky clock face.
//!
//! The face is a stack of filled discs (bezel, date panel, sky), a sixty-tick
//! minute grid, a day-of-year ring with month boundaries and curved month
//! names, and optional hands. Every frame is recomputed from the current
//! date, the rotation offset and the hemisphere; nothing is cached between
//! frames.
//!
//! ```no_run
//! use std::sync::Arc;
//! use skyclock::{BitmapFace, CalendarDate, FaceConfig, SkyClock};
//!
//! let date = CalendarDate::from_ymd(2024, 2, 29)?;
//! let mut clock = SkyClock::new(FaceConfig::default(), Arc::new(BitmapFace), date)?;
//! clock.set_orientation(12.0, false);
//! clock.request_draw().save_png("face.png".as_ref())?;
//! # Ok::<(), skyclock::SkyClockError>(())
//! ```

pub mod calendar;
pub mod canvas;
pub mod config;
pub mod curved_text;
pub mod date_ring;
pub mod error;
pub mod grid;
pub mod orientation;
pub mod panel;
pub mod preferences;
pub mod scene;
pub mod surface;
pub mod typeface;
mod window;

use std::sync::Arc;

pub use calendar::CalendarDate;
pub use canvas::Canvas;
pub use config::{Color, FaceConfig, RingSpec};
pub use error::{Result, SkyClockError};
pub use orientation::{Hemisphere, Orientation};
pub use panel::{ClockBasePanel, HandAngles, HandsPanel, Panel};
pub use scene::{DrawCommand, Scene};
pub use surface::{RectStyle, Surface};
pub use typeface::{BitmapFace, FontMetrics, TrueTypeFace, Typeface};

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// The complete face: configuration, panels and the render target.
///
/// `set_*` calls only store state; [`request_draw`](SkyClock::request_draw)
/// repaints the whole buffer from that state.
pub struct SkyClock {
    config: FaceConfig,
    base: ClockBasePanel,
    hands: HandsPanel,
    canvas: Canvas,
    typeface: Arc<dyn Typeface>,
}

impl SkyClock {
    pub fn new(config: FaceConfig, typeface: Arc<dyn Typeface>, date: CalendarDate) -> Result<Self> {
        config.validate()?;
        let size = config.canvas_size() as usize;
        Ok(Self {
            base: ClockBasePanel::new(date),
            hands: HandsPanel::default(),
            canvas: Canvas::new(size, size, Arc::clone(&typeface)),
            typeface,
            config,
        })
    }

    pub fn config(&self) -> &FaceConfig {
        &self.config
    }

    pub fn orientation(&self) -> Orientation {
        self.base.orientation()
    }

    pub fn date(&self) -> CalendarDate {
        self.base.current_date
    }

    pub fn set_orientation(&mut self, offset_degrees: f32, mirrored: bool) {
        self.base.set(offset_degrees, mirrored);
    }

    pub fn set_date(&mut self, date: CalendarDate) {
        self.base.current_date = date;
    }

    /// Sets the hand angles and makes the hands visible.
    pub fn set_hands(&mut self, angles: HandAngles) {
        self.hands.angles = angles;
        self.hands.visible = true;
    }

    pub fn set_hands_visible(&mut self, visible: bool) {
        self.hands.visible = visible;
    }

    /// The last finished frame, without redrawing.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Clears and repaints the buffer, then hands it out for presentation.
    pub fn request_draw(&mut self) -> &Canvas {
        paint(&self.config, &self.base, &self.hands, &mut self.canvas);
        &self.canvas
    }

    /// The same frame as [`request_draw`](SkyClock::request_draw) would
    /// paint, as a list of draw commands.
    pub fn record(&self) -> Scene {
        let mut scene = Scene::new(Arc::clone(&self.typeface));
        paint(&self.config, &self.base, &self.hands, &mut scene);
        scene
    }
}

fn paint<S: Surface>(config: &FaceConfig, base: &ClockBasePanel, hands: &HandsPanel, surface: &mut S) {
    surface.begin_frame(config.background_color);
    base.draw(surface, config);
    hands.draw(surface, config);
}
