use crate::{Color, Point, Rectangle, Result, Size};

/// Identifier for an image registered with a canvas backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// A draw command to be executed by a [`Canvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole surface.
    Clear { color: Color },
    /// Draw a registered image stretched into `rect`.
    DrawImage { texture: TextureId, rect: Rectangle },
    FillCircle {
        center: Point,
        radius: f32,
        color: Color,
    },
    StrokeCircle {
        center: Point,
        radius: f32,
        color: Color,
        width: f32,
    },
    FillRect { rect: Rectangle, color: Color },
    StrokeRect {
        rect: Rectangle,
        color: Color,
        width: f32,
    },
    /// Text centered horizontally and vertically on `position`.
    DrawText {
        text: String,
        position: Point,
        color: Color,
        size: f32,
    },
}

/// One frame worth of draw commands for a surface of a fixed size.
///
/// Scenes record into a frame; backends replay it in order.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    /// Surface size this frame was recorded for.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Recorded commands in draw order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    // Drawing primitives

    pub fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear { color });
    }

    /// Draw a registered image.
    pub fn draw_image(&mut self, texture: TextureId, rect: Rectangle) {
        self.commands.push(DrawCommand::DrawImage { texture, rect });
    }

    pub fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    pub fn stroke_circle(&mut self, center: Point, radius: f32, color: Color, width: f32) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            color,
            width,
        });
    }

    /// Draw a filled rectangle.
    pub fn fill_rect(&mut self, rect: Rectangle, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    /// Draw a rectangle outline.
    pub fn stroke_rect(&mut self, rect: Rectangle, color: Color, width: f32) {
        self.commands
            .push(DrawCommand::StrokeRect { rect, color, width });
    }

    /// Draw text centered on `position`.
    pub fn draw_text(&mut self, text: &str, position: Point, color: Color, size: f32) {
        self.commands.push(DrawCommand::DrawText {
            text: text.to_string(),
            position,
            color,
            size,
        });
    }

    /// All text commands, in draw order. Handy for assertions.
    pub fn texts(&self) -> impl Iterator<Item = (&str, Color)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::DrawText { text, color, .. } => Some((text.as_str(), *color)),
            _ => None,
        })
    }
}

/// A backend that can replay a [`Frame`].
pub trait Canvas {
    /// Resize the backing surface.
    fn resize(&mut self, size: Size) -> Result<()>;

    /// Execute every command of the frame, in order.
    fn present(&mut self, frame: &Frame) -> Result<()>;
}
