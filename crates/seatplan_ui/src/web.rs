//! Browser backend over `CanvasRenderingContext2d`.

use std::collections::HashMap;
use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::{Canvas, DrawCommand, Frame, RenderError, Result, Size, TextureId};

/// Font family used for labels.
const FONT_FAMILY: &str = "sans-serif";

/// A canvas that replays frames onto an HTML `<canvas>` element.
pub struct WebCanvas {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    images: HashMap<TextureId, HtmlImageElement>,
}

impl WebCanvas {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let context = canvas
            .get_context("2d")
            .map_err(js_error)?
            .ok_or_else(|| RenderError::Backend("2d context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| RenderError::Backend("context is not 2d".to_string()))?;

        Ok(Self {
            canvas,
            context,
            images: HashMap::new(),
        })
    }

    /// Register a loaded image element under `id`.
    pub fn register_image(&mut self, id: TextureId, image: HtmlImageElement) {
        self.images.insert(id, image);
    }

    pub fn element(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn execute(&self, command: &DrawCommand) -> Result<()> {
        let ctx = &self.context;
        match command {
            DrawCommand::Clear { color } => {
                let width = self.canvas.width() as f64;
                let height = self.canvas.height() as f64;
                ctx.clear_rect(0.0, 0.0, width, height);
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill_rect(0.0, 0.0, width, height);
            }
            DrawCommand::DrawImage { texture, rect } => {
                if let Some(image) = self.images.get(texture) {
                    ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        image,
                        rect.x as f64,
                        rect.y as f64,
                        rect.width as f64,
                        rect.height as f64,
                    )
                    .map_err(js_error)?;
                }
            }
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => {
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)
                    .map_err(js_error)?;
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill();
            }
            DrawCommand::StrokeCircle {
                center,
                radius,
                color,
                width,
            } => {
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)
                    .map_err(js_error)?;
                ctx.set_line_width(*width as f64);
                ctx.set_stroke_style_str(&color.to_css());
                ctx.stroke();
            }
            DrawCommand::FillRect { rect, color } => {
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill_rect(
                    rect.x as f64,
                    rect.y as f64,
                    rect.width as f64,
                    rect.height as f64,
                );
            }
            DrawCommand::StrokeRect { rect, color, width } => {
                ctx.set_line_width(*width as f64);
                ctx.set_stroke_style_str(&color.to_css());
                ctx.stroke_rect(
                    rect.x as f64,
                    rect.y as f64,
                    rect.width as f64,
                    rect.height as f64,
                );
            }
            DrawCommand::DrawText {
                text,
                position,
                color,
                size,
            } => {
                ctx.set_font(&format!("{}px {}", size, FONT_FAMILY));
                ctx.set_text_align("center");
                ctx.set_text_baseline("middle");
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill_text(text, position.x as f64, position.y as f64)
                    .map_err(js_error)?;
            }
        }
        Ok(())
    }
}

impl Canvas for WebCanvas {
    fn resize(&mut self, size: Size) -> Result<()> {
        let width = size.width.round().max(1.0) as u32;
        let height = size.height.round().max(1.0) as u32;
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }
        Ok(())
    }

    fn present(&mut self, frame: &Frame) -> Result<()> {
        self.resize(frame.size())?;
        for command in frame.commands() {
            self.execute(command)?;
        }
        Ok(())
    }
}

fn js_error(value: JsValue) -> RenderError {
    RenderError::Backend(format!("{:?}", value))
}
