//! Foundational primitives for binary-image analysis.
//!
//! ## Image Views and Stride
//! Images use element stride (not byte stride). `stride` is the distance, in
//! elements, between adjacent row starts and may be greater than `width`.
//! This allows borrowed views over padded buffers and region-of-interest
//! subviews that keep the parent's stride.
//!
//! ## Coordinates
//! Pixel coordinates are `(x, y)` with `x` growing to the right and `y`
//! growing downwards. Contour points are stored as [`Point2s`] (16-bit), so
//! every coordinate produced by downstream crates must fit `i16`.

mod error;
mod geom;
mod image;

pub use error::Error;
pub use geom::{Point2s, Rect};
pub use image::{Image, ImageView};
