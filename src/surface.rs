use std::fmt;

use crate::schema::{ColorRgba, Vec2};

/// Drawing primitives the layout engine needs from a backend. Implementations
/// must treat every call as fire-and-forget; the engine never reads back.
pub trait DrawSurface {
    fn fill_rect(&mut self, top_left: Vec2, size: Vec2, color: ColorRgba, alpha: f32);
    fn fill_round_rect(
        &mut self,
        top_left: Vec2,
        size: Vec2,
        corner_radius: Vec2,
        color: ColorRgba,
        alpha: f32,
    );
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: ColorRgba, alpha: f32);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    FillRect {
        top_left: Vec2,
        size: Vec2,
        color: ColorRgba,
        alpha: f32,
    },
    FillRoundRect {
        top_left: Vec2,
        size: Vec2,
        corner_radius: Vec2,
        color: ColorRgba,
        alpha: f32,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: ColorRgba,
        alpha: f32,
    },
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawCommand::FillRect {
                top_left,
                size,
                color,
                alpha,
            } => write!(
                f,
                "fill_rect top_left=({:.2}, {:.2}) size=({:.2}, {:.2}) color={} alpha={:.3}",
                top_left.x,
                top_left.y,
                size.x,
                size.y,
                format_color(*color),
                alpha
            ),
            DrawCommand::FillRoundRect {
                top_left,
                size,
                corner_radius,
                color,
                alpha,
            } => write!(
                f,
                "fill_round_rect top_left=({:.2}, {:.2}) size=({:.2}, {:.2}) corner_radius=({:.2}, {:.2}) color={} alpha={:.3}",
                top_left.x,
                top_left.y,
                size.x,
                size.y,
                corner_radius.x,
                corner_radius.y,
                format_color(*color),
                alpha
            ),
            DrawCommand::FillCircle {
                center,
                radius,
                color,
                alpha,
            } => write!(
                f,
                "fill_circle center=({:.2}, {:.2}) radius={:.2} color={} alpha={:.3}",
                center.x,
                center.y,
                radius,
                format_color(*color),
                alpha
            ),
        }
    }
}

fn format_color(color: ColorRgba) -> String {
    format!(
        "({:.2}, {:.2}, {:.2}, {:.2})",
        color.r, color.g, color.b, color.a
    )
}

/// Surface that records commands instead of drawing. Backs the `trace`
/// subcommand and most of the test suite.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

impl DrawSurface for CommandRecorder {
    fn fill_rect(&mut self, top_left: Vec2, size: Vec2, color: ColorRgba, alpha: f32) {
        self.commands.push(DrawCommand::FillRect {
            top_left,
            size,
            color,
            alpha,
        });
    }

    fn fill_round_rect(
        &mut self,
        top_left: Vec2,
        size: Vec2,
        corner_radius: Vec2,
        color: ColorRgba,
        alpha: f32,
    ) {
        self.commands.push(DrawCommand::FillRoundRect {
            top_left,
            size,
            corner_radius,
            color,
            alpha,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: ColorRgba, alpha: f32) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
            alpha,
        });
    }
}
