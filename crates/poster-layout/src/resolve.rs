//! Poster size resolution
//!
//! Turns a [`SizingSpec`] into concrete poster dimensions and reports the
//! area multiplier and sheet count that go with them, whichever of the
//! three drove the computation.

use log::{debug, trace};

use crate::constants::{BISECTION_TOLERANCE, LOWER_BOUND_SAFETY, MAX_BISECTION_ITERATIONS};
use crate::layout::{complex_cover, simple_cover};
use crate::types::*;

/// Poster size together with the two values derived from it
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution {
    /// Poster size in millimeters
    pub poster: Dimension,
    /// Poster area divided by source page area
    pub multiplier: f64,
    /// Sheets needed to print the poster with the chosen strategy
    pub sheet_count: usize,
}

/// Resolve the poster size for `spec`.
///
/// # Arguments
/// * `spec` - The sizing mode driving the computation
/// * `source` - Source page size in millimeters
/// * `sheet` - Output sheet size in millimeters (native orientation)
/// * `border` - Border reserved on every sheet
/// * `strategy` - Tiler used to count sheets
///
/// # Errors
/// `InvalidDimension` for degenerate sizes or borders, `NoSolutionFound`
/// for a sheet budget of zero. Nothing is tiled before validation passes.
pub fn resolve(
    spec: &SizingSpec,
    source: Dimension,
    sheet: Dimension,
    border: Border,
    strategy: Strategy,
) -> Result<Resolution> {
    resolve_tiled(spec, source, sheet, border, strategy).map(|(resolution, _)| resolution)
}

/// [`resolve`], also returning the placements the sheet count was taken
/// from (poster-relative), so that the poster is tiled only once.
pub(crate) fn resolve_tiled(
    spec: &SizingSpec,
    source: Dimension,
    sheet: Dimension,
    border: Border,
    strategy: Strategy,
) -> Result<(Resolution, Vec<SheetPlacement>)> {
    source.validate("source page")?;
    let printable = border.printable_area(sheet)?;
    spec.validate()?;

    let poster = match *spec {
        SizingSpec::FitToBox {
            max_width,
            max_height,
        } => fit_to_box(source, Dimension::new(max_width, max_height)),
        SizingSpec::AreaMultiplier(factor) => scale_to_multiplier(source, factor),
        SizingSpec::MaxSheetCount(sheets) => {
            let lower = largest_grid_poster(source, printable, sheets)?;
            match strategy {
                Strategy::Simple => lower,
                Strategy::Complex => maximize_complex(source, printable, sheets, lower)?,
            }
        }
    };

    let placements = tile(poster, printable, strategy)?;
    let resolution = Resolution {
        poster,
        multiplier: poster.area() / source.area(),
        sheet_count: placements.len(),
    };
    debug!(
        "resolved {:?} ({strategy}): poster {}, multiplier {:.4}, {} sheets",
        spec.mode(),
        resolution.poster,
        resolution.multiplier,
        resolution.sheet_count
    );
    Ok((resolution, placements))
}

/// Cover `poster` with `strategy`. Placements are relative to the poster's
/// top-left corner; the simple grid is centred on the poster.
pub fn tile(poster: Dimension, printable: Dimension, strategy: Strategy) -> Result<Vec<SheetPlacement>> {
    match strategy {
        Strategy::Simple => Ok(simple_cover(poster, printable)?.centred_on(poster)),
        Strategy::Complex => complex_cover(poster, printable),
    }
}

/// Sheets `strategy` needs to cover `poster`.
pub fn count_sheets(poster: Dimension, printable: Dimension, strategy: Strategy) -> Result<usize> {
    Ok(match strategy {
        Strategy::Simple => simple_cover(poster, printable)?.sheet_count(),
        Strategy::Complex => complex_cover(poster, printable)?.len(),
    })
}

/// Largest page with the aspect ratio of `source` that fits into `bounds`.
pub fn fit_within(source: Dimension, bounds: Dimension) -> Dimension {
    let mut width = bounds.width;
    let mut height = (width * source.height) / source.width;
    if height > bounds.height {
        height = bounds.height;
        width = (height * source.width) / source.height;
    }
    Dimension::new(width, height)
}

/// Largest poster fitting into the box in either of its orientations; the
/// box as given wins a tie.
pub fn fit_to_box(source: Dimension, bounds: Dimension) -> Dimension {
    let native = fit_within(source, bounds);
    let turned = fit_within(source, bounds.swapped());
    if turned.area() > native.area() {
        turned
    } else {
        native
    }
}

/// Uniform scale of `source` whose area is `factor` times the source area.
pub fn scale_to_multiplier(source: Dimension, factor: f64) -> Dimension {
    let area = source.area() * factor;
    Dimension::new(
        (area * source.width / source.height).sqrt(),
        (area * source.height / source.width).sqrt(),
    )
}

/// Largest poster that an `x × y` grid with `x · y ≤ sheets` can cover, in
/// either sheet orientation.
fn largest_grid_poster(source: Dimension, printable: Dimension, sheets: usize) -> Result<Dimension> {
    if sheets == 0 {
        return Err(PosterError::NoSolutionFound(
            "a poster needs at least one sheet".to_string(),
        ));
    }

    let mut best: Option<Dimension> = None;
    for x in 1..=sheets {
        for y in 1..=sheets / x {
            for orientation in [Orientation::Portrait, Orientation::Landscape] {
                let cell = orientation.apply(printable);
                let grid = Dimension::new(x as f64 * cell.width, y as f64 * cell.height);
                let poster = fit_within(source, grid);
                if best.is_none_or(|b| poster.area() > b.area()) {
                    best = Some(poster);
                }
            }
        }
    }

    best.ok_or_else(|| PosterError::NoSolutionFound(format!("no grid fits into {sheets} sheets")))
}

/// Bisect on the area multiplier for the largest poster the complex tiler
/// prints on at most `sheets` sheets, starting from the simple-grid poster
/// `lower`.
fn maximize_complex(
    source: Dimension,
    printable: Dimension,
    sheets: usize,
    lower: Dimension,
) -> Result<Dimension> {
    let lower_multiplier = lower.area() / source.area();
    let mut low = lower_multiplier * LOWER_BOUND_SAFETY;
    let mut high = sheets as f64 * printable.area() / source.area();

    let mut iterations = 0;
    while high - low >= BISECTION_TOLERANCE && iterations < MAX_BISECTION_ITERATIONS {
        let mid = (low + high) / 2.0;
        let count = complex_cover(scale_to_multiplier(source, mid), printable)?.len();
        trace!("bisection step {iterations}: multiplier {mid:.5} needs {count} sheets");
        if count > sheets {
            high = mid;
        } else {
            low = mid;
        }
        iterations += 1;
    }

    if low <= lower_multiplier {
        Ok(lower)
    } else {
        Ok(scale_to_multiplier(source, low))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a4() -> Dimension {
        PaperSize::A4.dimensions_mm()
    }

    #[test]
    fn test_fit_within_limits_height() {
        let poster = fit_within(a4(), Dimension::new(420.0, 420.0));
        assert!((poster.height - 420.0).abs() < 1e-9);
        assert!((poster.width - 420.0 * 210.0 / 297.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_to_box_picks_larger_orientation() {
        // a landscape source fills an A3 box better when the box is turned
        let source = a4().swapped();
        let poster = fit_to_box(source, Dimension::new(297.0, 420.0));
        assert!((poster.width - 420.0).abs() < 1e-9);
        assert!((poster.height - 297.0).abs() < 0.1);
    }

    #[test]
    fn test_a3_from_a4_simple() {
        let resolution = resolve(
            &SizingSpec::FitToBox {
                max_width: 297.0,
                max_height: 420.0,
            },
            a4(),
            a4(),
            Border::uniform(20.0),
            Strategy::Simple,
        )
        .unwrap();

        assert!((resolution.poster.width - 297.0).abs() < 0.1);
        assert!((resolution.poster.height - 420.0).abs() < 1e-9);
        assert!((resolution.multiplier - 2.0).abs() < 1e-2);
        assert_eq!(resolution.sheet_count, 4);
    }

    #[test]
    fn test_max_sheets_simple_uses_whole_grid() {
        let resolution = resolve(
            &SizingSpec::MaxSheetCount(4),
            a4(),
            a4(),
            Border::uniform(20.0),
            Strategy::Simple,
        )
        .unwrap();

        // 2 × 2 portrait sheets span 340 × 514mm; the A4 ratio is width-bound
        assert!((resolution.poster.width - 340.0).abs() < 1e-9);
        assert_eq!(resolution.sheet_count, 4);
    }

    #[test]
    fn test_max_sheets_complex_never_exceeds_budget() {
        let border = Border::uniform(20.0);
        let simple = resolve(&SizingSpec::MaxSheetCount(6), a4(), a4(), border, Strategy::Simple).unwrap();
        let complex = resolve(&SizingSpec::MaxSheetCount(6), a4(), a4(), border, Strategy::Complex).unwrap();

        assert!(complex.sheet_count <= 6);
        assert!(complex.poster.area() >= simple.poster.area());
    }

    #[test]
    fn test_zero_sheets_rejected() {
        let result = resolve(
            &SizingSpec::MaxSheetCount(0),
            a4(),
            a4(),
            Border::uniform(20.0),
            Strategy::Simple,
        );
        assert!(matches!(result, Err(PosterError::NoSolutionFound(_))));
    }

    #[test]
    fn test_sheet_count_comes_from_returned_placements() {
        let border = Border::uniform(20.0);
        let printable = border.printable_area(a4()).unwrap();
        for strategy in [Strategy::Simple, Strategy::Complex] {
            let (resolution, placements) =
                resolve_tiled(&SizingSpec::MaxSheetCount(6), a4(), a4(), border, strategy).unwrap();

            assert_eq!(resolution.sheet_count, placements.len());
            assert_eq!(placements, tile(resolution.poster, printable, strategy).unwrap());
            assert_eq!(
                resolution,
                resolve(&SizingSpec::MaxSheetCount(6), a4(), a4(), border, strategy).unwrap()
            );
        }
    }

    #[test]
    fn test_unprintably_large_poster_rejected() {
        let result = resolve(
            &SizingSpec::AreaMultiplier(1e30),
            a4(),
            a4(),
            Border::uniform(20.0),
            Strategy::Complex,
        );
        assert!(matches!(result, Err(PosterError::InvalidDimension(_))));
    }

    #[test]
    fn test_oversized_border_rejected() {
        let result = resolve(
            &SizingSpec::AreaMultiplier(2.0),
            a4(),
            a4(),
            Border::new(10.0, 110.0, 10.0, 100.0),
            Strategy::Simple,
        );
        assert!(matches!(result, Err(PosterError::InvalidDimension(_))));
    }
}
