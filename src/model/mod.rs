//! Data models for the seat plan editor.

mod seat;

pub use seat::{Seat, SeatDefaults, SeatId, SeatPatch, ShapeKind};
