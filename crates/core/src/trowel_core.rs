//! # Trowel Core
//!
//! Geometry primitives shared by every crate in the workspace:
//!
//! - **Bounds**: axis-aligned boxes used for element rects, dims and spots
//! - **Coordinates**: distinct point types for each coordinate space
//! - **Offsets**: margin / border / padding edges of a rendered box
//! - **Units**: CSS lengths (`px`, `%`, `auto`) and float normalization

pub mod bounds;
pub mod coordinates;
pub mod offsets;
pub mod units;

pub use bounds::Bounds;
pub use coordinates::{CanvasPoint, Delta, FramePoint, ScreenPoint, WorldPoint};
pub use offsets::{BoxOffsets, Edges};
pub use units::{normalize_float, Length, Unit};
