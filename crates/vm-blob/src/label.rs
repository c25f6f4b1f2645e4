use vm_core::Image;

use crate::BlobError;

/// Blob identifier. Valid labels start at 1.
pub type Label = u32;

/// State of one label-grid cell.
///
/// Transitions only leave `Unvisited`: a cell that became `Border` or
/// `Blob` keeps that state for the rest of the pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LabelCell {
    #[default]
    Unvisited,
    /// Background pixel adjacent to a traced contour.
    Border,
    Blob(Label),
}

impl LabelCell {
    pub fn is_unvisited(self) -> bool {
        self == Self::Unvisited
    }

    pub fn label(self) -> Option<Label> {
        match self {
            Self::Blob(l) => Some(l),
            _ => None,
        }
    }

    /// Signed encoding: `0` unvisited, `-1` border, the label otherwise.
    pub fn to_raw(self) -> i64 {
        match self {
            Self::Unvisited => 0,
            Self::Border => -1,
            Self::Blob(l) => i64::from(l),
        }
    }
}

/// Dense per-pixel labels over the processed region, row-major, indexed in
/// region-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelGrid {
    cells: Image<LabelCell>,
}

impl LabelGrid {
    pub(crate) fn try_new(width: usize, height: usize) -> Result<Self, BlobError> {
        let cells = Image::try_new_fill(width, height, LabelCell::Unvisited)?;
        Ok(Self { cells })
    }

    pub fn empty() -> Self {
        Self {
            cells: Image::empty(),
        }
    }

    pub fn width(&self) -> usize {
        self.cells.width()
    }

    pub fn height(&self) -> usize {
        self.cells.height()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, x: usize, y: usize) -> Option<LabelCell> {
        self.cells.get(x, y).copied()
    }

    /// Panics if `(x, y)` lies outside the grid.
    pub fn at(&self, x: usize, y: usize) -> LabelCell {
        match self.cells.get(x, y) {
            Some(c) => *c,
            None => panic!(
                "label grid index ({x}, {y}) out of bounds for {}x{}",
                self.width(),
                self.height()
            ),
        }
    }

    pub fn cells(&self) -> &Image<LabelCell> {
        &self.cells
    }

    /// Labels an unvisited cell. Cells that already hold a state are kept.
    pub(crate) fn assign(&mut self, x: usize, y: usize, label: Label) {
        if let Some(c) = self.cells.get_mut(x, y)
            && c.is_unvisited()
        {
            *c = LabelCell::Blob(label);
        }
    }

    pub(crate) fn mark_border(&mut self, x: usize, y: usize) {
        if let Some(c) = self.cells.get_mut(x, y)
            && c.is_unvisited()
        {
            *c = LabelCell::Border;
        }
    }

    pub fn to_raw(&self) -> Image<i64> {
        self.cells.map(|c| c.to_raw())
    }

    pub fn count_labeled(&self) -> usize {
        self.cells
            .data()
            .iter()
            .filter(|c| matches!(c, LabelCell::Blob(_)))
            .count()
    }

    pub fn area_of(&self, label: Label) -> usize {
        self.cells
            .data()
            .iter()
            .filter(|&&c| c == LabelCell::Blob(label))
            .count()
    }

    pub(crate) fn release(&mut self) {
        self.cells.clear();
    }
}

impl Default for LabelGrid {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{LabelCell, LabelGrid};

    #[test]
    fn cells_start_unvisited() {
        let grid = LabelGrid::try_new(4, 3).expect("small grid");
        assert_eq!((grid.width(), grid.height()), (4, 3));
        assert!(grid.cells().data().iter().all(|c| c.is_unvisited()));
        assert_eq!(grid.get(4, 0), None);
    }

    #[test]
    fn transitions_are_one_way() {
        let mut grid = LabelGrid::try_new(3, 1).expect("small grid");

        grid.assign(0, 0, 2);
        grid.assign(0, 0, 5);
        grid.mark_border(0, 0);
        assert_eq!(grid.at(0, 0), LabelCell::Blob(2));

        grid.mark_border(1, 0);
        grid.assign(1, 0, 3);
        assert_eq!(grid.at(1, 0), LabelCell::Border);

        assert_eq!(grid.at(2, 0), LabelCell::Unvisited);
    }

    #[test]
    fn raw_encoding() {
        let mut grid = LabelGrid::try_new(3, 1).expect("small grid");
        grid.assign(0, 0, 7);
        grid.mark_border(1, 0);

        assert_eq!(grid.to_raw().data(), &[7, -1, 0]);
        assert_eq!(grid.count_labeled(), 1);
        assert_eq!(grid.area_of(7), 1);
        assert_eq!(LabelCell::Blob(4).label(), Some(4));
        assert_eq!(LabelCell::Border.label(), None);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn at_panics_outside() {
        let grid = LabelGrid::try_new(2, 2).expect("small grid");
        let _ = grid.at(2, 0);
    }
}
