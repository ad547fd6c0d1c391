use std::sync::Arc;

use crate::{RenderError, Result, Size};

/// A handle to decoded RGBA8 image data.
///
/// Cloning is cheap; the pixel buffer is shared. Raster backends register
/// handles under a [`TextureId`](crate::TextureId) and draw them on demand.
#[derive(Clone, Debug)]
pub struct ImageHandle {
    /// The raw RGBA8 image data (straight alpha)
    data: Arc<Vec<u8>>,
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
}

impl ImageHandle {
    /// Create a new image handle from RGBA8 data.
    ///
    /// Fails if `data.len() != width * height * 4`.
    pub fn from_rgba8(data: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(RenderError::ImageSize {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            data: Arc::new(data),
            width,
            height,
        })
    }

    /// Decode an encoded PNG or JPEG file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| RenderError::Decode(e.to_string()))?
            .to_rgba8();
        let (width, height) = decoded.dimensions();
        log::debug!("Decoded image ({}x{})", width, height);
        Self::from_rgba8(decoded.into_raw(), width, height)
    }

    /// Get the image data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the image width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }
}
