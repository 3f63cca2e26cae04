use crate::assemble::Layout;
use crate::layout::minimum_sheets;

/// Statistics about a poster layout
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutStatistics {
    pub total_sheets: usize,
    pub portrait_sheets: usize,
    pub landscape_sheets: usize,
    /// `ceil(poster area / printable area)`; no cover can use fewer sheets
    pub minimum_sheets: usize,
    /// Poster area in mm²
    pub poster_area: f64,
    /// Printable area of all sheets together in mm²
    pub printable_area: f64,
    /// Poster area over total printable area
    pub efficiency: f64,
}

/// Calculate statistics for the layout
pub fn calculate_statistics(layout: &Layout) -> LayoutStatistics {
    let total_sheets = layout.sheet_count();
    let landscape_sheets = layout
        .placements
        .iter()
        .filter(|p| p.orientation.is_rotated())
        .count();

    let printable = layout.printable();
    let poster_area = layout.poster.area();
    let printable_area = total_sheets as f64 * printable.area();

    LayoutStatistics {
        total_sheets,
        portrait_sheets: total_sheets - landscape_sheets,
        landscape_sheets,
        minimum_sheets: minimum_sheets(layout.poster, printable),
        poster_area,
        printable_area,
        efficiency: if printable_area > 0.0 {
            poster_area / printable_area
        } else {
            0.0
        },
    }
}
