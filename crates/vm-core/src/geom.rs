/// Integer pixel coordinate with 16-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Point2s {
    pub x: i16,
    pub y: i16,
}

impl Point2s {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

impl From<(i16, i16)> for Point2s {
    fn from((x, y): (i16, i16)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in pixel units.
///
/// Components are signed so that callers can express requests that start
/// left of / above the image or have a degenerate extent. Consumers decide
/// how such requests are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering a whole `width x height` image. Sizes beyond
    /// `i32::MAX` saturate.
    pub fn full(width: usize, height: usize) -> Self {
        Self {
            x: 0,
            y: 0,
            width: i32::try_from(width).unwrap_or(i32::MAX),
            height: i32::try_from(height).unwrap_or(i32::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Point2s, Rect};

    #[test]
    fn point_from_tuple() {
        assert_eq!(Point2s::from((7, -8)), Point2s::new(7, -8));
        assert!(Point2s::new(1, 5) < Point2s::new(2, 0));
    }

    #[test]
    fn full_rect_covers_image_and_saturates() {
        assert_eq!(Rect::full(640, 480), Rect::new(0, 0, 640, 480));
        assert_eq!(Rect::full(usize::MAX, 3), Rect::new(0, 0, i32::MAX, 3));
    }
}
