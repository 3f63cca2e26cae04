//! Complex tiler
//!
//! Covers the poster with four corner blocks arranged as a clockwise
//! pinwheel, each block a grid of sheets in its own orientation:
//!
//! ```text
//! +-----------+-----+
//! |     1     |     |
//! +---+-------+  2  |
//! |   |       |     |
//! | 4 +-------+-----+
//! |   |     3       |
//! +---+-------------+
//! ```
//!
//! Block 1 and block 3 choose their column count freely and derive their row
//! count from the span the neighbouring block leaves open; blocks 2 and 4 do
//! the opposite. Whatever the four blocks miss is filled by the simple tiler,
//! centred on the bounding box of the gap. The infill never recurses into a
//! further mixed cover, so the result is not always optimal.

use log::debug;

use crate::constants::GEOMETRY_EPSILON;
use crate::types::{Dimension, Orientation, Result, SheetPlacement};

use super::{Grid, GridCover, Rect, minimum_sheets, sheets_needed, simple_cover};

/// Orientation of the top-left, top-right, bottom-right and bottom-left
/// block, in that order
pub type CornerPattern = [Orientation; 4];

/// Cover `poster` with sheets of printable size `printable`, mixing sheet
/// orientations when that saves sheets.
///
/// Every mixed corner assignment is searched once per symmetry class of the
/// poster: 8 patterns for a rectangular poster, 5 for a square one (see
/// [`orientation_patterns`]). The 8 include the 5, so a rectangular poster
/// can only come out with fewer sheets than the 5 alone would give.
///
/// Never uses more sheets than [`simple_cover`]; returns as soon as a cover
/// with `ceil(poster area / printable area)` sheets is found. Placements are
/// relative to the poster's top-left corner. Deterministic: the same input
/// always yields the same placements.
pub fn complex_cover(poster: Dimension, printable: Dimension) -> Result<Vec<SheetPlacement>> {
    let simple = simple_cover(poster, printable)?;
    let minimum = minimum_sheets(poster, printable);
    let simple_count = simple.sheet_count();
    let mut best = simple.centred_on(poster);

    if simple_count <= minimum || printable.is_square() {
        return Ok(best);
    }

    for pattern in orientation_patterns(poster) {
        if let Some(found) = search_pattern(poster, printable, pattern, best.len(), minimum)? {
            best = found;
            if best.len() <= minimum {
                break;
            }
        }
    }

    debug!(
        "complex cover of {poster}: {} sheets (simple {simple_count}, minimum {minimum})",
        best.len()
    );
    Ok(best)
}

/// Corner orientation patterns worth searching for `poster`.
///
/// Uniform patterns are left out since a single orientation can never beat
/// the simple grid. Patterns that map onto each other under a symmetry of
/// the poster are searched once: a half turn always, a quarter turn with
/// every sheet flipped when the poster is square.
pub fn orientation_patterns(poster: Dimension) -> Vec<CornerPattern> {
    let square = poster.is_square();
    (1u8..0b1111)
        .filter(|&code| canonical(code, square) == code)
        .map(decode)
        .collect()
}

/// Bit `i` set means corner `i` (clockwise from top-left) is rotated.
fn decode(code: u8) -> CornerPattern {
    std::array::from_fn(|corner| {
        if code & (1 << corner) != 0 {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    })
}

/// Turn a corner assignment clockwise by `quarter_turns`.
fn turn(code: u8, quarter_turns: u32) -> u8 {
    ((code << quarter_turns) | (code >> (4 - quarter_turns))) & 0b1111
}

fn canonical(code: u8, square_poster: bool) -> u8 {
    let mut lowest = code.min(turn(code, 2));
    if square_poster {
        // a quarter turn swaps which sheet side runs along each poster edge
        lowest = lowest.min(turn(code, 1) ^ 0b1111).min(turn(code, 3) ^ 0b1111);
    }
    lowest
}

/// Number of sheets of `step` needed for an open `span` left by a neighbour;
/// `None` if the neighbour already overshoots the poster.
fn span_count(span: f64, step: f64) -> Option<usize> {
    if span < -GEOMETRY_EPSILON {
        None
    } else if span <= GEOMETRY_EPSILON {
        Some(0)
    } else {
        Some(sheets_needed(span, step))
    }
}

/// Best cover for one orientation pattern that uses fewer than `to_beat`
/// sheets, if any.
fn search_pattern(
    poster: Dimension,
    printable: Dimension,
    pattern: CornerPattern,
    to_beat: usize,
    minimum: usize,
) -> Result<Option<Vec<SheetPlacement>>> {
    let cells = pattern.map(|orientation| orientation.apply(printable));
    let mut limit = to_beat;
    let mut best = None;

    for c1 in 1..=sheets_needed(poster.width, cells[0].width) {
        let Some(c2) = span_count(poster.width - c1 as f64 * cells[0].width, cells[1].width) else {
            continue;
        };
        for r2 in 1..=sheets_needed(poster.height, cells[1].height) {
            let Some(r3) = span_count(poster.height - r2 as f64 * cells[1].height, cells[2].height)
            else {
                continue;
            };
            for c3 in 1..=sheets_needed(poster.width, cells[2].width) {
                let Some(c4) = span_count(poster.width - c3 as f64 * cells[2].width, cells[3].width)
                else {
                    continue;
                };
                for r4 in 1..=sheets_needed(poster.height, cells[3].height) {
                    let Some(r1) =
                        span_count(poster.height - r4 as f64 * cells[3].height, cells[0].height)
                    else {
                        continue;
                    };

                    let blocks = [
                        Grid::new(c1, r1, pattern[0], printable),
                        Grid::new(c2, r2, pattern[1], printable),
                        Grid::new(c3, r3, pattern[2], printable),
                        Grid::new(c4, r4, pattern[3], printable),
                    ];
                    let corner_sheets: usize = blocks.iter().map(Grid::sheet_count).sum();
                    if corner_sheets >= limit {
                        continue;
                    }

                    let candidate = PinwheelCover::new(poster, printable, blocks)?;
                    if candidate.sheet_count() < limit {
                        limit = candidate.sheet_count();
                        best = Some(candidate.placements());
                        if limit <= minimum {
                            return Ok(best);
                        }
                    }
                }
            }
        }
    }

    Ok(best)
}

/// Four corner blocks plus the infill of whatever they leave uncovered
struct PinwheelCover {
    blocks: [Grid; 4],
    origins: [(f64, f64); 4],
    infill: Option<(Rect, GridCover)>,
}

impl PinwheelCover {
    fn new(poster: Dimension, printable: Dimension, blocks: [Grid; 4]) -> Result<Self> {
        let sizes = blocks.map(|block| block.size());
        let origins = [
            (0.0, 0.0),
            (poster.width - sizes[1].width, 0.0),
            (poster.width - sizes[2].width, poster.height - sizes[2].height),
            (0.0, poster.height - sizes[3].height),
        ];
        let rects: [Rect; 4] =
            std::array::from_fn(|i| Rect::at(origins[i].0, origins[i].1, sizes[i]));

        let infill = match uncovered_bounds(poster, &rects) {
            Some(hole) => Some((hole, simple_cover(hole.size(), printable)?)),
            None => None,
        };

        Ok(Self {
            blocks,
            origins,
            infill,
        })
    }

    fn sheet_count(&self) -> usize {
        let corners: usize = self.blocks.iter().map(Grid::sheet_count).sum();
        corners + self.infill.as_ref().map_or(0, |(_, cover)| cover.sheet_count())
    }

    fn placements(&self) -> Vec<SheetPlacement> {
        let mut placements = Vec::with_capacity(self.sheet_count());
        for (block, &(x, y)) in self.blocks.iter().zip(&self.origins) {
            placements.extend(block.placements(x, y));
        }
        if let Some((hole, cover)) = &self.infill {
            let centred = cover.centred_on(hole.size());
            placements.extend(centred.into_iter().map(|p| p.translated(hole.x, hole.y)));
        }
        placements
    }
}

/// Bounding box of the part of the poster that none of `rects` covers, or
/// `None` if the poster is fully covered.
///
/// The poster is cut along every rectangle edge; each resulting cell is
/// either entirely covered by some rectangle or not at all, so testing its
/// centre is enough.
pub fn uncovered_bounds(poster: Dimension, rects: &[Rect]) -> Option<Rect> {
    let clamp_x = |v: f64| v.clamp(0.0, poster.width);
    let clamp_y = |v: f64| v.clamp(0.0, poster.height);

    let mut xs = vec![0.0, poster.width];
    let mut ys = vec![0.0, poster.height];
    for rect in rects.iter().filter(|rect| !rect.is_empty()) {
        xs.extend([clamp_x(rect.x), clamp_x(rect.right())]);
        ys.extend([clamp_y(rect.y), clamp_y(rect.bottom())]);
    }
    for edges in [&mut xs, &mut ys] {
        edges.sort_by(f64::total_cmp);
        edges.dedup_by(|a, b| (*a - *b).abs() <= GEOMETRY_EPSILON);
    }

    let mut hole: Option<Rect> = None;
    for xw in xs.windows(2) {
        for yw in ys.windows(2) {
            let cell = Rect::new(xw[0], yw[0], xw[1] - xw[0], yw[1] - yw[0]);
            let (cx, cy) = (cell.x + cell.width / 2.0, cell.y + cell.height / 2.0);
            if rects.iter().any(|rect| rect.contains_point(cx, cy)) {
                continue;
            }
            hole = Some(hole.map_or(cell, |h| h.union(&cell)));
        }
    }
    hole
}

/// Bounding box of the part of the poster left uncovered by the printable
/// regions of `placements` (poster-relative), or `None` if nothing is missed.
pub fn uncovered_region(
    poster: Dimension,
    printable: Dimension,
    placements: &[SheetPlacement],
) -> Option<Rect> {
    let rects: Vec<Rect> = placements
        .iter()
        .map(|p| Rect::at(p.x, p.y, p.orientation.apply(printable)))
        .collect();
    uncovered_bounds(poster, &rects)
}
