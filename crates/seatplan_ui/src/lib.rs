//! seatplan_ui - drawing vocabulary for the seat plan editor
//!
//! Widgets and scenes record [`DrawCommand`]s into a [`Frame`]; a [`Canvas`]
//! backend turns the frame into pixels. Two backends exist: a tiny-skia
//! raster canvas for native builds and a `CanvasRenderingContext2d` canvas
//! for the browser.

mod color;
mod error;
mod event;
mod geometry;
mod image;
mod renderer;

#[cfg(not(target_arch = "wasm32"))]
mod raster;

#[cfg(target_arch = "wasm32")]
mod web;

pub use color::Color;
pub use error::{RenderError, Result};
pub use event::{Event, KeyCode, Modifiers, MouseButton};
pub use geometry::{Point, Rectangle, Size};
pub use image::ImageHandle;
pub use renderer::{Canvas, DrawCommand, Frame, TextureId};

#[cfg(not(target_arch = "wasm32"))]
pub use raster::RasterCanvas;

#[cfg(target_arch = "wasm32")]
pub use web::WebCanvas;
