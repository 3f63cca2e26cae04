//! Geometry types shared by the tilers
//!
//! Coordinates are millimeters with the origin at the top-left corner and
//! y growing downwards.

use crate::constants::COUNT_EPSILON;
use crate::types::{Dimension, Orientation, SheetPlacement};

/// A rectangular area in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// X position (left edge)
    pub x: f64,
    /// Y position (top edge)
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle of `size` with its top-left corner at `(x, y)`
    pub fn at(x: f64, y: f64, size: Dimension) -> Self {
        Self::new(x, y, size.width, size.height)
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn size(&self) -> Dimension {
        Dimension::new(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        !self.is_empty() && x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Smallest rectangle containing both
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }

    /// Overlap of both, if it has a positive area
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        (right > x && bottom > y).then(|| Rect::new(x, y, right - x, bottom - y))
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    pub fn scaled(&self, factor: f64) -> Rect {
        Rect::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }
}

/// Number of steps of length `step` needed to span `length` (at least one).
pub fn sheets_needed(length: f64, step: f64) -> usize {
    ((length / step) - COUNT_EPSILON).ceil().max(1.0) as usize
}

/// Lower bound on the number of sheets for any cover: poster area over
/// printable area, rounded up.
pub fn minimum_sheets(poster: Dimension, printable: Dimension) -> usize {
    ((poster.area() / printable.area()) - COUNT_EPSILON)
        .ceil()
        .max(1.0) as usize
}

/// A block of sheets sharing one orientation, laid out edge to edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    /// Number of sheets side by side
    pub columns: usize,
    /// Number of sheets stacked
    pub rows: usize,
    /// Printable size of one sheet, orientation applied
    pub cell: Dimension,
    pub orientation: Orientation,
}

impl Grid {
    /// A `columns × rows` block of sheets whose native printable size is
    /// `printable`.
    pub fn new(columns: usize, rows: usize, orientation: Orientation, printable: Dimension) -> Self {
        Self {
            columns,
            rows,
            cell: orientation.apply(printable),
            orientation,
        }
    }

    /// Smallest block in `orientation` that covers `area`.
    pub fn fit(area: Dimension, printable: Dimension, orientation: Orientation) -> Self {
        let cell = orientation.apply(printable);
        Self::new(
            sheets_needed(area.width, cell.width),
            sheets_needed(area.height, cell.height),
            orientation,
            printable,
        )
    }

    /// Saturates at `usize::MAX` instead of overflowing
    pub fn sheet_count(&self) -> usize {
        self.columns.saturating_mul(self.rows)
    }

    /// Area covered by the printable regions of the block
    pub fn size(&self) -> Dimension {
        Dimension::new(
            self.columns as f64 * self.cell.width,
            self.rows as f64 * self.cell.height,
        )
    }

    /// Sheets of the block in row-major order, the block's top-left corner
    /// at `(x, y)`.
    pub fn placements(&self, x: f64, y: f64) -> impl Iterator<Item = SheetPlacement> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.columns).map(move |col| {
                SheetPlacement::new(
                    x + col as f64 * self.cell.width,
                    y + row as f64 * self.cell.height,
                    self.orientation,
                )
            })
        })
    }
}

/// Result of the simple tiler
#[derive(Debug, Clone, PartialEq)]
pub struct GridCover {
    /// The grid that was chosen
    pub grid: Grid,
    /// Sheets in row-major order, relative to the grid's top-left corner
    pub placements: Vec<SheetPlacement>,
}

impl GridCover {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            placements: grid.placements(0.0, 0.0).collect(),
        }
    }

    pub fn sheet_count(&self) -> usize {
        self.placements.len()
    }

    /// Area spanned by the grid; never smaller than the area it was fit to
    pub fn covered(&self) -> Dimension {
        self.grid.size()
    }

    /// Placements shifted so that the grid is centred on `area`, whose
    /// top-left corner is the origin. Overhang is split evenly between
    /// opposite sides.
    pub fn centred_on(&self, area: Dimension) -> Vec<SheetPlacement> {
        let covered = self.covered();
        let dx = (area.width - covered.width) / 2.0;
        let dy = (area.height - covered.height) / 2.0;
        self.placements.iter().map(|p| p.translated(dx, dy)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheets_needed_exact_multiple() {
        assert_eq!(sheets_needed(340.0, 170.0), 2);
        assert_eq!(sheets_needed(3.0 * 0.1, 0.1), 3);
        assert_eq!(sheets_needed(340.5, 170.0), 3);
        assert_eq!(sheets_needed(1.0, 170.0), 1);
    }

    #[test]
    fn test_minimum_sheets() {
        let printable = Dimension::new(257.0, 170.0);
        assert_eq!(minimum_sheets(Dimension::new(420.0, 594.0), printable), 6);
        assert_eq!(minimum_sheets(Dimension::new(257.0, 170.0), printable), 1);
    }

    #[test]
    fn test_sheet_count_saturates() {
        let printable = Dimension::new(100.0, 100.0);
        let grid = Grid::fit(Dimension::new(1e300, 1e300), printable, Orientation::Portrait);
        assert_eq!(grid.sheet_count(), usize::MAX);
        assert_eq!(Grid::new(3, 4, Orientation::Portrait, printable).sheet_count(), 12);
    }

    #[test]
    fn test_grid_placements_row_major() {
        let grid = Grid::new(2, 2, Orientation::Portrait, Dimension::new(10.0, 20.0));
        let positions: Vec<(f64, f64)> = grid.placements(5.0, 0.0).map(|p| (p.x, p.y)).collect();
        assert_eq!(positions, vec![(5.0, 0.0), (15.0, 0.0), (5.0, 20.0), (15.0, 20.0)]);
    }

    #[test]
    fn test_rotated_grid_uses_swapped_cell() {
        let grid = Grid::fit(
            Dimension::new(50.0, 15.0),
            Dimension::new(10.0, 20.0),
            Orientation::Landscape,
        );
        assert_eq!(grid.cell, Dimension::new(20.0, 10.0));
        assert_eq!((grid.columns, grid.rows), (3, 2));
        assert_eq!(grid.size(), Dimension::new(60.0, 20.0));
    }

    #[test]
    fn test_rect_union_and_intersection() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, -5.0, 10.0, 10.0);
        assert_eq!(a.union(&b), Rect::new(0.0, -5.0, 15.0, 15.0));
        assert_eq!(a.intersection(&b), Some(Rect::new(5.0, 0.0, 5.0, 5.0)));
        assert_eq!(a.intersection(&Rect::new(10.0, 0.0, 5.0, 5.0)), None);
    }
}
