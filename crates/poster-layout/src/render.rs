//! Mapping between output sheets and the source page
//!
//! The layout engine does not draw anything. It tells a renderer, sheet by
//! sheet, which part of the source page lands where on the sheet; the
//! renderer owns the document format.

use crate::assemble::Layout;
use crate::constants::{mm_to_pt, pt_to_mm};
use crate::layout::Rect;
use crate::types::*;

/// A page of the source document, measured in PostScript points
pub trait SourcePage {
    fn width_pt(&self) -> f64;
    fn height_pt(&self) -> f64;

    /// Page size in millimeters
    fn dimension_mm(&self) -> Dimension {
        Dimension::new(pt_to_mm(self.width_pt()), pt_to_mm(self.height_pt()))
    }
}

impl SourcePage for Dimension {
    fn width_pt(&self) -> f64 {
        mm_to_pt(self.width)
    }

    fn height_pt(&self) -> f64 {
        mm_to_pt(self.height)
    }

    fn dimension_mm(&self) -> Dimension {
        *self
    }
}

/// The part of one output sheet that carries poster content
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetRegion {
    /// Index of the placement in the layout
    pub index: usize,
    pub orientation: Orientation,
    /// Sheet size as printed, orientation applied
    pub sheet: Dimension,
    /// Where the content goes, in sheet millimeters (top-left origin)
    pub target: Rect,
    /// What is shown there, in source-page millimeters (top-left origin)
    pub source: Rect,
}

/// Regions for every sheet of `layout`, in placement order.
///
/// The whole sheet is used, border included, so neighbouring sheets repeat
/// the content under their overlap. Sheets that do not touch the poster are
/// skipped.
pub fn sheet_regions(layout: &Layout, source: Dimension) -> Vec<SheetRegion> {
    let poster = layout.poster_rect();
    let scale = source.width / layout.poster.width;

    layout
        .placements
        .iter()
        .enumerate()
        .filter_map(|(index, placement)| {
            let sheet = layout.sheet_rect(placement);
            let visible = sheet.intersection(&poster)?;
            Some(SheetRegion {
                index,
                orientation: placement.orientation,
                sheet: sheet.size(),
                target: visible.translated(-sheet.x, -sheet.y),
                source: visible.translated(-poster.x, -poster.y).scaled(scale),
            })
        })
        .collect()
}

/// Receiver of sheet regions, implemented by whatever writes the output
/// document.
pub trait RegionSink {
    /// Called once per sheet before its region is placed
    fn begin_sheet(&mut self, _index: usize, _size: Dimension) -> Result<()> {
        Ok(())
    }

    fn place_region(&mut self, region: &SheetRegion) -> Result<()>;
}

/// Drive `sink` through every sheet of `layout`. Returns the number of
/// regions placed.
pub fn render_layout(layout: &Layout, source: Dimension, sink: &mut impl RegionSink) -> Result<usize> {
    let regions = sheet_regions(layout, source);
    for region in &regions {
        sink.begin_sheet(region.index, region.sheet)?;
        sink.place_region(region)?;
    }
    Ok(regions.len())
}
