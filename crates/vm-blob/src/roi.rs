use log::debug;
use vm_core::Rect;

/// Region of interest clamped to the image; never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Roi {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// Clamps `request` to a `width x height` image.
///
/// A negative origin snaps to 0 with the requested extent kept; the far
/// edges are then clamped to the image using the (snapped) origin on both
/// axes. Returns `None` when the origin starts at or past the image edge or
/// the clamped extent is not positive.
pub fn normalize_roi(request: Rect, width: usize, height: usize) -> Option<Roi> {
    let img_w = i64::try_from(width).unwrap_or(i64::MAX);
    let img_h = i64::try_from(height).unwrap_or(i64::MAX);

    let x = i64::from(request.x);
    let y = i64::from(request.y);
    if x >= img_w || y >= img_h {
        debug!("roi {request:?} starts outside {width}x{height} image");
        return None;
    }

    let x = x.max(0);
    let y = y.max(0);
    let mut w = i64::from(request.width);
    let mut h = i64::from(request.height);
    if x + w > img_w {
        w = img_w - x;
    }
    if y + h > img_h {
        h = img_h - y;
    }

    if w <= 0 || h <= 0 {
        debug!("roi {request:?} has no area inside {width}x{height} image");
        return None;
    }

    Some(Roi {
        x: x as usize,
        y: y as usize,
        width: w as usize,
        height: h as usize,
    })
}
