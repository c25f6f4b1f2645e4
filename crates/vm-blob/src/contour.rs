use vm_core::{Point2s, Rect};

use crate::BlobError;

const MIN_CAPACITY: usize = 32;

/// Ordered boundary points, in image coordinates.
///
/// Contours are closed implicitly: the tracer stops once the first edge
/// repeats, so a traced contour of more than one point ends with its seed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contour {
    points: Vec<Point2s>,
}

impl Contour {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a point, doubling the capacity when it is exhausted.
    ///
    /// On allocation failure the contour keeps its previous contents.
    pub fn push(&mut self, p: Point2s) -> Result<(), BlobError> {
        if self.points.len() == self.points.capacity() {
            let additional = self.points.capacity().max(MIN_CAPACITY);
            self.points
                .try_reserve_exact(additional)
                .map_err(|_| BlobError::oom("contour points"))?;
        }
        self.points.push(p);
        Ok(())
    }

    pub fn points(&self) -> &[Point2s] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Point2s> {
        self.points.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point2s> {
        self.points.iter()
    }

    pub fn bounding_rect(&self) -> Option<Rect> {
        let first = self.first()?;
        let (mut x0, mut y0, mut x1, mut y1) = (first.x, first.y, first.x, first.y);
        for p in &self.points[1..] {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }

        Some(Rect::new(
            i32::from(x0),
            i32::from(y0),
            i32::from(x1) - i32::from(x0) + 1,
            i32::from(y1) - i32::from(y0) + 1,
        ))
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.points.capacity()
    }
}
