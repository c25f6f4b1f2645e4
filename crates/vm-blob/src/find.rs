use log::debug;
use vm_core::{ImageView, Rect};

use crate::roi::{Roi, normalize_roi};
use crate::scan::scan;
use crate::{BlobError, BlobRegistry, LabelGrid};

/// Contour points are 16-bit, so the far edge of the processed region may
/// not go past this coordinate.
const COORD_LIMIT: usize = i16::MAX as usize + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobConfig {
    /// Store the point sequence of every hole. When `false` only
    /// [`Blob::hole_count`](crate::Blob::hole_count) is maintained.
    pub extract_internal: bool,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            extract_internal: true,
        }
    }
}

/// Output of [`find_blobs`].
///
/// `labels` covers the clamped region of interest (`roi`); an empty result
/// (no region, `0 x 0` grid, no blobs) is returned when nothing overlapped
/// the image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlobLabeling {
    pub roi: Option<Roi>,
    pub labels: LabelGrid,
    pub blobs: BlobRegistry,
}

impl BlobLabeling {
    pub fn num_blobs(&self) -> usize {
        self.blobs.len()
    }

    /// Frees the label grid, every blob and every contour. Idempotent.
    pub fn release(&mut self) {
        self.labels.release();
        self.blobs.release();
    }
}

/// Labels the 8-connected foreground components of `src` inside `roi` and
/// traces their external and hole contours in one raster pass.
///
/// Any non-zero pixel is foreground. `roi` is given in image coordinates and
/// is clamped to the image (see [`normalize_roi`]); pixels outside it are
/// treated as background. Contour points are reported in image coordinates.
///
/// On error nothing partial is returned.
pub fn find_blobs(
    src: &ImageView<'_, u8>,
    roi: Rect,
    cfg: &BlobConfig,
) -> Result<BlobLabeling, BlobError> {
    let Some(roi) = normalize_roi(roi, src.width(), src.height()) else {
        return Ok(BlobLabeling::default());
    };

    if roi.x + roi.width > COORD_LIMIT || roi.y + roi.height > COORD_LIMIT {
        return Err(BlobError::InvalidArgument(format!(
            "region {roi:?} exceeds 16-bit contour coordinates"
        )));
    }

    debug!(
        "find_blobs: {}x{} image, roi {:?}",
        src.width(),
        src.height(),
        roi
    );

    let view = src.subview(roi.x, roi.y, roi.width, roi.height)?;
    let mut labels = LabelGrid::try_new(roi.width, roi.height)?;
    let blobs = scan(&view, (roi.x, roi.y), &mut labels, cfg.extract_internal)?;

    Ok(BlobLabeling {
        roi: Some(roi),
        labels,
        blobs,
    })
}

/// [`find_blobs`] over a tightly packed `width x height` buffer.
pub fn find_blobs_in_buffer(
    data: &[u8],
    width: usize,
    height: usize,
    roi: Rect,
    cfg: &BlobConfig,
) -> Result<BlobLabeling, BlobError> {
    let expected = width.checked_mul(height).ok_or_else(|| {
        BlobError::InvalidArgument(format!("image size {width}x{height} overflows"))
    })?;
    if data.len() != expected {
        return Err(BlobError::InvalidArgument(format!(
            "buffer holds {} bytes, {width}x{height} image needs {expected}",
            data.len()
        )));
    }

    let view = ImageView::from_slice(width, height, width, data)?;
    find_blobs(&view, roi, cfg)
}
