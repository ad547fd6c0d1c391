//! CPU raster backend built on tiny-skia.
//!
//! Used for native builds: snapshots of the editor surface and rendering
//! tests. Text is shaped with cosmic-text over the system fonts when
//! enabled, and skipped otherwise.

use std::collections::HashMap;

use cosmic_text::{Attrs, Buffer, FontSystem, Metrics, Shaping, SwashCache};
use tiny_skia::{
    FillRule, FilterQuality, IntSize, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke,
    Transform,
};

use crate::{Canvas, Color, DrawCommand, Frame, ImageHandle, Point, Rectangle, RenderError};
use crate::{Result, Size, TextureId};

/// Line height as a multiple of the font size.
const LINE_HEIGHT_RATIO: f32 = 1.2;

/// Font database plus glyph cache.
struct TextRasterizer {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

/// A canvas that draws into an in-memory RGBA pixmap.
pub struct RasterCanvas {
    pixmap: Pixmap,
    textures: HashMap<TextureId, Pixmap>,
    text: Option<TextRasterizer>,
}

impl RasterCanvas {
    /// Create a canvas of the given size. Text commands are ignored until
    /// fonts are enabled.
    pub fn new(size: Size) -> Result<Self> {
        Ok(Self {
            pixmap: allocate(size)?,
            textures: HashMap::new(),
            text: None,
        })
    }

    /// Rasterize text with the fonts installed on this machine.
    pub fn with_system_fonts(mut self) -> Self {
        let font_system = FontSystem::new();
        let faces = font_system.db().len();
        if faces == 0 {
            log::warn!("No system fonts found; labels will not be rasterized");
        } else {
            log::debug!("Loaded {} font faces", faces);
        }
        self.text = Some(TextRasterizer {
            font_system,
            swash_cache: SwashCache::new(),
        });
        self
    }

    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    /// Register decoded image data under `id`, replacing any previous image.
    pub fn register_image(&mut self, id: TextureId, image: &ImageHandle) -> Result<()> {
        let mut data = image.data().to_vec();
        for px in data.chunks_exact_mut(4) {
            let alpha = px[3] as u16;
            for channel in &mut px[..3] {
                *channel = ((*channel as u16 * alpha + 127) / 255) as u8;
            }
        }

        let size = IntSize::from_wh(image.width(), image.height()).ok_or(
            RenderError::InvalidSurfaceSize {
                width: image.width(),
                height: image.height(),
            },
        )?;
        let pixmap = Pixmap::from_vec(data, size)
            .ok_or_else(|| RenderError::Backend("pixmap rejected image data".to_string()))?;

        self.textures.insert(id, pixmap);
        log::debug!(
            "Registered texture {:?} ({}x{})",
            id,
            image.width(),
            image.height()
        );
        Ok(())
    }

    pub fn size(&self) -> Size {
        Size::new(self.pixmap.width() as f32, self.pixmap.height() as f32)
    }

    /// Read back a pixel as straight-alpha RGBA.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let px = self.pixmap.pixel(x, y)?.demultiply();
        Some([px.red(), px.green(), px.blue(), px.alpha()])
    }

    /// Encode the current surface as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| RenderError::Backend(e.to_string()))
    }

    fn execute(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Clear { color } => {
                let [r, g, b, a] = color.to_rgba8();
                self.pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
            }
            DrawCommand::DrawImage { texture, rect } => self.draw_image(*texture, *rect),
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => {
                if let Some(path) = PathBuilder::from_circle(center.x, center.y, *radius) {
                    self.pixmap.fill_path(
                        &path,
                        &paint(*color),
                        FillRule::Winding,
                        Transform::identity(),
                        None,
                    );
                }
            }
            DrawCommand::StrokeCircle {
                center,
                radius,
                color,
                width,
            } => {
                if let Some(path) = PathBuilder::from_circle(center.x, center.y, *radius) {
                    self.pixmap.stroke_path(
                        &path,
                        &paint(*color),
                        &stroke(*width),
                        Transform::identity(),
                        None,
                    );
                }
            }
            DrawCommand::FillRect { rect, color } => {
                if let Some(rect) = to_skia_rect(*rect) {
                    self.pixmap
                        .fill_rect(rect, &paint(*color), Transform::identity(), None);
                }
            }
            DrawCommand::StrokeRect { rect, color, width } => {
                if let Some(rect) = to_skia_rect(*rect) {
                    let path = PathBuilder::from_rect(rect);
                    self.pixmap.stroke_path(
                        &path,
                        &paint(*color),
                        &stroke(*width),
                        Transform::identity(),
                        None,
                    );
                }
            }
            DrawCommand::DrawText {
                text,
                position,
                color,
                size,
            } => self.draw_text(text, *position, *color, *size),
        }
    }

    fn draw_image(&mut self, texture: TextureId, rect: Rectangle) {
        let Some(source) = self.textures.get(&texture) else {
            log::trace!("Texture {:?} not registered; skipping", texture);
            return;
        };

        let sx = rect.width / source.width() as f32;
        let sy = rect.height / source.height() as f32;
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.pixmap.draw_pixmap(
            0,
            0,
            source.as_ref(),
            &paint,
            Transform::from_row(sx, 0.0, 0.0, sy, rect.x, rect.y),
            None,
        );
    }

    /// Draw `text` centered on `position`.
    fn draw_text(&mut self, text: &str, position: Point, color: Color, size: f32) {
        let Some(TextRasterizer {
            font_system,
            swash_cache,
        }) = &mut self.text
        else {
            return;
        };

        let line_height = size * LINE_HEIGHT_RATIO;
        let mut buffer = Buffer::new(font_system, Metrics::new(size, line_height));
        buffer.set_size(font_system, None, None);
        buffer.set_text(font_system, text, &Attrs::new(), Shaping::Advanced);
        buffer.shape_until_scroll(font_system, false);

        let (width, height) = buffer
            .layout_runs()
            .fold((0.0f32, 0.0f32), |(w, _), run| {
                (w.max(run.line_w), run.line_top + line_height)
            });
        let left = (position.x - width / 2.0).round() as i32;
        let top = (position.y - height / 2.0).round() as i32;

        let [r, g, b, a] = color.to_rgba8();
        let pixmap = &mut self.pixmap;
        let surface_width = pixmap.width() as i32;
        let surface_height = pixmap.height() as i32;
        let data = pixmap.data_mut();

        buffer.draw(
            font_system,
            swash_cache,
            cosmic_text::Color::rgba(r, g, b, a),
            |gx, gy, w, h, glyph_color| {
                let coverage = glyph_color.a() as f32 / 255.0;
                if coverage <= 0.0 {
                    return;
                }
                let src = [glyph_color.r(), glyph_color.g(), glyph_color.b()];
                for dy in 0..h as i32 {
                    for dx in 0..w as i32 {
                        let x = left + gx + dx;
                        let y = top + gy + dy;
                        if x < 0 || y < 0 || x >= surface_width || y >= surface_height {
                            continue;
                        }
                        let i = ((y * surface_width + x) * 4) as usize;
                        for (channel, value) in src.iter().enumerate() {
                            let dst = data[i + channel] as f32;
                            data[i + channel] =
                                (*value as f32 * coverage + dst * (1.0 - coverage)).round() as u8;
                        }
                        let dst = data[i + 3] as f32;
                        data[i + 3] = (255.0 * coverage + dst * (1.0 - coverage)).round() as u8;
                    }
                }
            },
        );
    }
}

impl Canvas for RasterCanvas {
    fn resize(&mut self, size: Size) -> Result<()> {
        if self.size() != size {
            self.pixmap = allocate(size)?;
        }
        Ok(())
    }

    fn present(&mut self, frame: &Frame) -> Result<()> {
        self.resize(frame.size())?;
        for command in frame.commands() {
            self.execute(command);
        }
        Ok(())
    }
}

fn allocate(size: Size) -> Result<Pixmap> {
    let width = size.width.round().max(0.0) as u32;
    let height = size.height.round().max(0.0) as u32;
    Pixmap::new(width, height).ok_or(RenderError::InvalidSurfaceSize { width, height })
}

fn paint(color: Color) -> Paint<'static> {
    let [r, g, b, a] = color.to_rgba8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn stroke(width: f32) -> Stroke {
    Stroke {
        width,
        ..Stroke::default()
    }
}

fn to_skia_rect(rect: Rectangle) -> Option<Rect> {
    Rect::from_xywh(rect.x, rect.y, rect.width, rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_size_is_rejected() {
        assert!(matches!(
            RasterCanvas::new(Size::new(0.0, 10.0)),
            Err(RenderError::InvalidSurfaceSize { .. })
        ));
    }

    #[test]
    fn test_fill_circle_and_rect() {
        let mut canvas = RasterCanvas::new(Size::new(100.0, 100.0)).unwrap();
        let mut frame = Frame::new(Size::new(100.0, 100.0));
        frame.clear(Color::WHITE);
        frame.fill_circle(Point::new(25.0, 25.0), 10.0, Color::BLACK);
        frame.fill_rect(Rectangle::new(60.0, 60.0, 20.0, 20.0), Color::rgb(1.0, 0.0, 0.0));
        canvas.present(&frame).unwrap();

        assert_eq!(canvas.pixel(25, 25), Some([0, 0, 0, 255]));
        assert_eq!(canvas.pixel(70, 70), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(5, 95), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_present_resizes_to_frame() {
        let mut canvas = RasterCanvas::new(Size::new(10.0, 10.0)).unwrap();
        canvas.present(&Frame::new(Size::new(40.0, 30.0))).unwrap();
        assert_eq!(canvas.size(), Size::new(40.0, 30.0));
    }

    #[test]
    fn test_registered_image_is_stretched() {
        let mut canvas = RasterCanvas::new(Size::new(20.0, 20.0)).unwrap();
        let image = ImageHandle::from_rgba8(vec![0, 0, 255, 255], 1, 1).unwrap();
        canvas.register_image(TextureId(1), &image).unwrap();

        let mut frame = Frame::new(Size::new(20.0, 20.0));
        frame.clear(Color::WHITE);
        frame.draw_image(TextureId(1), Rectangle::new(0.0, 0.0, 20.0, 20.0));
        canvas.present(&frame).unwrap();

        assert_eq!(canvas.pixel(10, 10), Some([0, 0, 255, 255]));
    }

    #[test]
    fn test_unregistered_image_is_skipped() {
        let mut canvas = RasterCanvas::new(Size::new(4.0, 4.0)).unwrap();
        let mut frame = Frame::new(Size::new(4.0, 4.0));
        frame.clear(Color::WHITE);
        frame.draw_image(TextureId(9), Rectangle::new(0.0, 0.0, 4.0, 4.0));
        canvas.present(&frame).unwrap();
        assert_eq!(canvas.pixel(1, 1), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_text_without_fonts_is_skipped() {
        let mut canvas = RasterCanvas::new(Size::new(40.0, 20.0)).unwrap();
        assert!(!canvas.has_text());

        let mut frame = Frame::new(Size::new(40.0, 20.0));
        frame.clear(Color::WHITE);
        frame.draw_text("12", Point::new(20.0, 10.0), Color::BLACK, 14.0);
        canvas.present(&frame).unwrap();
        assert_eq!(canvas.pixel(20, 10), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_encode_png_signature() {
        let canvas = RasterCanvas::new(Size::new(2.0, 2.0)).unwrap();
        let png = canvas.encode_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
