//! Retained-mode recording of a frame.
//!
//! A [`Scene`] accepts the same calls as a [`Canvas`] but stores each
//! primitive together with the rotation it was issued under. Geometry can be
//! inspected without rasterizing, and the recording can be replayed onto a
//! canvas afterwards.

use std::sync::Arc;

use crate::canvas::Canvas;
use crate::config::Color;
use crate::surface::{RectStyle, Surface};
use crate::typeface::{FontMetrics, Typeface};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Circle {
        rotation: f32,
        cx: f32,
        cy: f32,
        radius: f32,
        color: Color,
    },
    Rect {
        rotation: f32,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        color: Color,
        style: RectStyle,
    },
    Line {
        rotation: f32,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        color: Color,
        width: f32,
    },
    Text {
        rotation: f32,
        text: String,
        x: f32,
        y: f32,
        color: Color,
        size: f32,
    },
}

impl DrawCommand {
    pub fn rotation(&self) -> f32 {
        match self {
            DrawCommand::Clear(_) => 0.0,
            DrawCommand::Circle { rotation, .. }
            | DrawCommand::Rect { rotation, .. }
            | DrawCommand::Line { rotation, .. }
            | DrawCommand::Text { rotation, .. } => *rotation,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            DrawCommand::Clear(color)
            | DrawCommand::Circle { color, .. }
            | DrawCommand::Rect { color, .. }
            | DrawCommand::Line { color, .. }
            | DrawCommand::Text { color, .. } => *color,
        }
    }
}

pub struct Scene {
    commands: Vec<DrawCommand>,
    rotation: f32,
    saved: Vec<f32>,
    typeface: Arc<dyn Typeface>,
}

impl Scene {
    pub fn new(typeface: Arc<dyn Typeface>) -> Self {
        Self {
            commands: Vec::new(),
            rotation: 0.0,
            saved: Vec::new(),
            typeface,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Depth of unmatched saves; zero once every scope has closed.
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn render(&self, canvas: &mut Canvas) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => canvas.begin_frame(*color),
                DrawCommand::Circle {
                    rotation,
                    cx,
                    cy,
                    radius,
                    color,
                } => canvas.with_rotation(*rotation, |c| c.circle(*cx, *cy, *radius, *color)),
                DrawCommand::Rect {
                    rotation,
                    x0,
                    y0,
                    x1,
                    y1,
                    color,
                    style,
                } => canvas.with_rotation(*rotation, |c| {
                    c.rect(*x0, *y0, *x1, *y1, *color, *style)
                }),
                DrawCommand::Line {
                    rotation,
                    x0,
                    y0,
                    x1,
                    y1,
                    color,
                    width,
                } => canvas.with_rotation(*rotation, |c| {
                    c.line(*x0, *y0, *x1, *y1, *color, *width)
                }),
                DrawCommand::Text {
                    rotation,
                    text,
                    x,
                    y,
                    color,
                    size,
                } => canvas.with_rotation(*rotation, |c| c.text(text, *x, *y, *color, *size)),
            }
        }
    }
}

impl Surface for Scene {
    fn begin_frame(&mut self, background: Color) {
        self.commands.clear();
        self.rotation = 0.0;
        self.saved.clear();
        self.add_command(DrawCommand::Clear(background));
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
        self.add_command(DrawCommand::Circle {
            rotation: self.rotation,
            cx,
            cy,
            radius,
            color,
        });
    }

    fn rect(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Color, style: RectStyle) {
        self.add_command(DrawCommand::Rect {
            rotation: self.rotation,
            x0,
            y0,
            x1,
            y1,
            color,
            style,
        });
    }

    fn line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Color, width: f32) {
        self.add_command(DrawCommand::Line {
            rotation: self.rotation,
            x0,
            y0,
            x1,
            y1,
            color,
            width,
        });
    }

    fn text(&mut self, text: &str, x: f32, y: f32, color: Color, size: f32) {
        self.add_command(DrawCommand::Text {
            rotation: self.rotation,
            text: text.to_string(),
            x,
            y,
            color,
            size,
        });
    }

    fn measure_text(&self, text: &str, size: f32) -> f32 {
        self.typeface.advance(text, size)
    }

    fn font_metrics(&self, size: f32) -> FontMetrics {
        self.typeface.metrics(size)
    }
}
