//! Single-pass 8-connected blob labeling with contour tracing.
//!
//! One raster scan over a binary image labels every foreground component and
//! traces its boundaries while it goes:
//! - Any non-zero pixel is foreground; components are 8-connected.
//! - Each blob gets one external contour and, optionally, one internal
//!   contour per hole. The hole count is always maintained.
//! - Background pixels inspected while tracing are marked as border in the
//!   [`LabelGrid`], which is what keeps a hole from being discovered twice.
//!
//! Contours are closed Moore-neighbor walks: the seed pixel appears again as
//! the last point (an isolated pixel is a single point). Points are reported
//! in image coordinates even when a region of interest is used.
//!
//! Labels start at 1 and follow raster order of each blob's top-left pixel.

mod blob;
mod contour;
mod error;
mod find;
mod label;
mod roi;
mod scan;
#[cfg(test)]
mod test_masks;
mod trace;

pub use blob::{Blob, BlobRegistry};
pub use contour::Contour;
pub use error::BlobError;
pub use find::{BlobConfig, BlobLabeling, find_blobs, find_blobs_in_buffer};
pub use label::{Label, LabelCell, LabelGrid};
pub use roi::{Roi, normalize_roi};
