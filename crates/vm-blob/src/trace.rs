//! Moore-neighbor boundary tracing.
//!
//! Directions are indexed clockwise (image `y` grows downwards), starting
//! with the right neighbor:
//!
//! ```text
//!   5 6 7
//!   4 . 0
//!   3 2 1
//! ```

use vm_core::{ImageView, Point2s};

use crate::{BlobError, Contour, Label, LabelGrid};

const DX: [isize; 8] = [1, 1, 0, -1, -1, -1, 0, 1];
const DY: [isize; 8] = [0, 1, 1, 1, 0, -1, -1, -1];

/// Which side of the blob a contour separates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TraceKind {
    /// Blob versus surrounding background; search starts up-right of the seed.
    External,
    /// Blob versus an enclosed hole; search starts down-left of the seed.
    Internal,
}

impl TraceKind {
    #[inline]
    fn start_dir(self) -> usize {
        match self {
            Self::External => 7,
            Self::Internal => 3,
        }
    }
}

/// Traces one closed contour through the seed pixel.
///
/// Every foreground pixel stepped onto gets `label`; every background
/// neighbor inspected on the way is marked as border. Points are appended to
/// `contour` (when given) in traversal order, offset by `origin`.
///
/// Tracing stops on the first repetition of the initial edge (seed followed
/// by its first successor), or right away for an isolated seed.
pub(crate) fn trace_contour(
    kind: TraceKind,
    label: Label,
    seed: (usize, usize),
    src: &ImageView<'_, u8>,
    grid: &mut LabelGrid,
    origin: (usize, usize),
    mut contour: Option<&mut Contour>,
) -> Result<(), BlobError> {
    let (width, height) = (src.width(), src.height());
    let mut cur = seed;
    let mut dir = kind.start_dir();
    let mut first_step: Option<(usize, usize)> = None;

    grid.assign(seed.0, seed.1, label);

    // Each (pixel, direction) state occurs at most once per period.
    let max_steps = 8 * width * height + 2;
    for _ in 0..max_steps {
        if let Some(c) = contour.as_deref_mut() {
            c.push(to_point(origin, cur))?;
        }

        let mut next = None;
        for _ in 0..8 {
            if let Some(nb) = neighbor(cur, dir, width, height) {
                if is_foreground(src, nb) {
                    grid.assign(nb.0, nb.1, label);
                    next = Some(nb);
                    break;
                }
                grid.mark_border(nb.0, nb.1);
            }
            dir = (dir + 1) & 7;
        }

        let Some(nb) = next else {
            // Isolated pixel.
            return Ok(());
        };

        let closed = match first_step {
            None => {
                first_step = Some(nb);
                false
            }
            Some(first) => cur == seed && nb == first,
        };
        if closed {
            return Ok(());
        }

        cur = nb;
        // Back to the pixel we came from, then two steps clockwise.
        dir = (dir + 6) & 7;
    }

    Ok(())
}

#[inline]
pub(crate) fn is_foreground(src: &ImageView<'_, u8>, (x, y): (usize, usize)) -> bool {
    src.get(x, y).is_some_and(|&v| v != 0)
}

#[inline]
fn neighbor(
    (x, y): (usize, usize),
    dir: usize,
    width: usize,
    height: usize,
) -> Option<(usize, usize)> {
    let nx = x as isize + DX[dir];
    let ny = y as isize + DY[dir];
    if nx < 0 || ny < 0 {
        return None;
    }

    let (nxu, nyu) = (nx as usize, ny as usize);
    if nxu >= width || nyu >= height {
        return None;
    }

    Some((nxu, nyu))
}

/// Region-local pixel to image coordinates. Callers guarantee the sum fits
/// `i16`.
#[inline]
fn to_point(origin: (usize, usize), (x, y): (usize, usize)) -> Point2s {
    Point2s::new((origin.0 + x) as i16, (origin.1 + y) as i16)
}
