//! Desktop host: presents the face in a window and keeps it on today's date.

use std::time::{Duration, Instant};

use chrono::Local;
use log::{error, info};
use pixels::{Pixels, SurfaceTexture};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::calendar::CalendarDate;
use crate::error::{Result, SkyClockError};
use crate::panel::HandAngles;
use crate::SkyClock;

fn window_error(e: impl std::fmt::Display) -> SkyClockError {
    SkyClockError::Window(e.to_string())
}

impl SkyClock {
    /// Opens a window and redraws at most `max_framerate` times per second
    /// with the current local date and time. Returns when the window closes.
    pub fn show(mut self, title: &str) -> Result<()> {
        let size = self.canvas().width() as u32;

        let event_loop = EventLoop::new().map_err(window_error)?;
        let window = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(LogicalSize::new(size as f64, size as f64))
            .with_resizable(true)
            .build(&event_loop)
            .map_err(window_error)?;

        let window = std::sync::Arc::new(window);
        let window_clone = window.clone();
        let inner = window.inner_size();
        let surface_texture = SurfaceTexture::new(inner.width, inner.height, &window);
        let mut pixels = Pixels::new(size, size, surface_texture).map_err(window_error)?;

        let frame_duration = Duration::from_secs_f64(1.0 / self.config().max_framerate);
        let mut last_frame = Instant::now();
        info!("window opened at {size}x{size}");

        event_loop
            .run(move |event, window_target| {
                window_target.set_control_flow(ControlFlow::Poll);
                match event {
                    Event::WindowEvent { event, .. } => match event {
                        WindowEvent::CloseRequested => {
                            info!("window closed");
                            window_target.exit();
                        }
                        WindowEvent::Resized(new_size) => {
                            if let Err(e) = pixels.resize_surface(new_size.width, new_size.height)
                            {
                                error!("surface resize failed: {e}");
                            }
                        }
                        WindowEvent::RedrawRequested => {
                            let now = Local::now();
                            self.set_date(CalendarDate::from_naive(now.date_naive()));
                            self.set_hands(HandAngles::from_time(now.time()));
                            self.request_draw().copy_to(pixels.frame_mut());
                            if let Err(e) = pixels.render() {
                                error!("presenting frame failed: {e}");
                                window_target.exit();
                            }
                        }
                        _ => {}
                    },
                    Event::AboutToWait => {
                        if last_frame.elapsed() >= frame_duration {
                            window_clone.request_redraw();
                            last_frame = Instant::now();
                        }
                    }
                    _ => {}
                }
            })
            .map_err(window_error)
    }
}
