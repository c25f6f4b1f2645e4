use log::debug;
use vm_core::ImageView;

use crate::trace::{TraceKind, is_foreground, trace_contour};
use crate::{BlobError, BlobRegistry, Label, LabelGrid};

/// Single row-major pass over `src` (already cropped to the region of
/// interest) that discovers blobs and holes and fills `grid`.
///
/// Each foreground pixel goes through these cases in order:
/// 1. unvisited with background above: first pixel of a new blob, whose
///    external contour is traced;
/// 2. background below that no trace has reached yet, checked again right
///    after case 1: top edge of a new hole, whose contour is traced with
///    the blob's label;
/// 3. when neither applied, an unvisited pixel is interior and takes its left
///    neighbor's label.
pub(crate) fn scan(
    src: &ImageView<'_, u8>,
    origin: (usize, usize),
    grid: &mut LabelGrid,
    extract_internal: bool,
) -> Result<BlobRegistry, BlobError> {
    let (width, height) = (src.width(), src.height());
    let mut blobs = BlobRegistry::new();

    for y in 0..height {
        for x in 0..width {
            if !is_foreground(src, (x, y)) {
                continue;
            }

            let mut cell = grid.at(x, y);
            let above = y > 0 && is_foreground(src, (x, y - 1));

            if cell.is_unvisited() && !above {
                let blob = blobs.push_new()?;
                let label = blob.label;
                trace_contour(
                    TraceKind::External,
                    label,
                    (x, y),
                    src,
                    grid,
                    origin,
                    Some(&mut blob.external),
                )?;
                cell = grid.at(x, y);
            }

            // Re-read after a possible external trace: the pixel below may
            // have been reached by it.
            let hole_below = y + 1 < height
                && !is_foreground(src, (x, y + 1))
                && grid.at(x, y + 1).is_unvisited();

            if hole_below {
                let owner = cell.label().or_else(|| left_label(grid, x, y));
                debug_assert!(owner.is_some(), "hole seed ({x}, {y}) without owner");
                let Some(owner) = owner else {
                    continue;
                };

                let contour = blobs.begin_hole(owner, extract_internal)?;
                trace_contour(
                    TraceKind::Internal,
                    owner,
                    (x, y),
                    src,
                    grid,
                    origin,
                    contour,
                )?;
            } else if cell.is_unvisited()
                && let Some(label) = left_label(grid, x, y)
            {
                grid.assign(x, y, label);
            }
        }
    }

    debug!(
        "scanned {width}x{height} region: {} blobs, {} holes",
        blobs.len(),
        blobs.total_holes()
    );

    Ok(blobs)
}

#[inline]
fn left_label(grid: &LabelGrid, x: usize, y: usize) -> Option<Label> {
    let lx = x.checked_sub(1)?;
    grid.get(lx, y)?.label()
}
