//! Simple tiler
//!
//! Covers the poster with a single axis-aligned grid of equally turned
//! sheets, picking whichever sheet orientation needs fewer sheets.

use crate::constants::MAX_SHEET_COUNT;
use crate::types::{Dimension, Orientation, PosterError, Result};

use super::{Grid, GridCover};

/// Cover `poster` with the smallest uniform grid of sheets whose printable
/// area is `printable`.
///
/// Both the unrotated and the rotated sheet are tried; on a tie the
/// unrotated sheet wins. Placements are emitted row by row, relative to
/// the grid's top-left corner.
///
/// # Errors
/// `InvalidDimension` for a degenerate poster or sheet, or when the grid
/// would need more than [`MAX_SHEET_COUNT`] sheets.
pub fn simple_cover(poster: Dimension, printable: Dimension) -> Result<GridCover> {
    poster.validate("poster")?;
    printable.validate("printable sheet area")?;

    let portrait = Grid::fit(poster, printable, Orientation::Portrait);
    let landscape = Grid::fit(poster, printable, Orientation::Landscape);

    let grid = if landscape.sheet_count() < portrait.sheet_count() {
        landscape
    } else {
        portrait
    };
    if grid.sheet_count() > MAX_SHEET_COUNT {
        return Err(PosterError::InvalidDimension(format!(
            "poster {poster} needs more than {MAX_SHEET_COUNT} sheets of {printable}"
        )));
    }

    Ok(GridCover::new(grid))
}
