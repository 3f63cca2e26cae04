//! Layout assembly
//!
//! Turns tiler output (placements relative to the poster's top-left corner)
//! into a [`Layout`] whose coordinates start at the top-left corner of the
//! bounding box of every sheet and the poster.

use log::debug;

use crate::layout::Rect;
use crate::types::*;

/// Finished poster layout, handed to rendering
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    /// Poster size
    pub poster: Dimension,
    /// Size of the bounding box of all sheets and the poster
    pub overall: Dimension,
    /// Top-left corner of the poster inside the bounding box
    pub poster_offset: (f64, f64),
    /// Output sheet size in its native orientation
    pub sheet: Dimension,
    pub border: Border,
    /// Top-left corners of the printable regions, in bounding-box coordinates
    pub placements: Vec<SheetPlacement>,
}

impl Layout {
    pub fn sheet_count(&self) -> usize {
        self.placements.len()
    }

    /// Printable size of a sheet in native orientation
    pub fn printable(&self) -> Dimension {
        Dimension::new(
            self.sheet.width - (self.border.left + self.border.right),
            self.sheet.height - (self.border.top + self.border.bottom),
        )
    }

    /// Where the poster sits in the bounding box
    pub fn poster_rect(&self) -> Rect {
        Rect::at(self.poster_offset.0, self.poster_offset.1, self.poster)
    }

    /// Printable region of `placement`
    pub fn printable_rect(&self, placement: &SheetPlacement) -> Rect {
        Rect::at(
            placement.x,
            placement.y,
            placement.orientation.apply(self.printable()),
        )
    }

    /// Full sheet of `placement`, border included
    pub fn sheet_rect(&self, placement: &SheetPlacement) -> Rect {
        sheet_outline(placement, self.sheet, self.border)
    }
}

fn sheet_outline(placement: &SheetPlacement, sheet: Dimension, border: Border) -> Rect {
    let border = border.oriented(placement.orientation);
    Rect::at(
        placement.x - border.left,
        placement.y - border.top,
        placement.orientation.apply(sheet),
    )
}

/// Build the layout for `placements`, which are relative to the poster's
/// top-left corner.
///
/// The bounding box grows independently on every side by however far the
/// worst sheet overhangs the poster there, so a grid centred on the poster
/// yields a centred poster and an asymmetric cover yields an asymmetric
/// offset.
pub fn assemble(
    poster: Dimension,
    sheet: Dimension,
    border: Border,
    placements: Vec<SheetPlacement>,
) -> Result<Layout> {
    poster.validate("poster")?;
    border.printable_area(sheet)?;

    let poster_rect = Rect::at(0.0, 0.0, poster);
    let bounds = placements
        .iter()
        .map(|p| sheet_outline(p, sheet, border))
        .fold(poster_rect, |acc, r| acc.union(&r));

    let (dx, dy) = (-bounds.x, -bounds.y);
    let layout = Layout {
        poster,
        overall: bounds.size(),
        poster_offset: (dx, dy),
        sheet,
        border,
        placements: placements.into_iter().map(|p| p.translated(dx, dy)).collect(),
    };

    debug!(
        "assembled {} sheets: overall {}, poster at ({:.2}, {:.2})",
        layout.sheet_count(),
        layout.overall,
        dx,
        dy
    );
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::simple_cover;

    fn a4() -> Dimension {
        PaperSize::A4.dimensions_mm()
    }

    #[test]
    fn test_centred_grid_gives_centred_poster() {
        let poster = Dimension::new(297.0, 420.0);
        let border = Border::uniform(20.0);
        let cover = simple_cover(poster, border.printable_area(a4()).unwrap()).unwrap();
        let layout = assemble(poster, a4(), border, cover.centred_on(poster)).unwrap();

        // 2 × 2 sheets overlapping by two borders
        assert_eq!(layout.overall, Dimension::new(380.0, 554.0));
        assert_eq!(layout.poster_offset, (41.5, 67.0));
        assert_eq!((layout.placements[0].x, layout.placements[0].y), (20.0, 20.0));
        assert_eq!(layout.sheet_rect(&layout.placements[3]), Rect::new(170.0, 257.0, 210.0, 297.0));
    }

    #[test]
    fn test_asymmetric_overhang() {
        let poster = Dimension::new(100.0, 100.0);
        let sheet = Dimension::new(100.0, 100.0);
        // left border only; one sheet flush with the poster
        let border = Border::new(0.0, 0.0, 0.0, 30.0);
        let placements = vec![
            SheetPlacement::new(0.0, 0.0, Orientation::Portrait),
            SheetPlacement::new(30.0, 0.0, Orientation::Portrait),
        ];
        let layout = assemble(poster, sheet, border, placements).unwrap();

        assert_eq!(layout.poster_offset, (30.0, 0.0));
        assert_eq!(layout.overall, Dimension::new(130.0, 100.0));
    }

    #[test]
    fn test_rotated_sheet_border_follows_sheet() {
        let sheet = Dimension::new(100.0, 200.0);
        let border = Border::new(1.0, 2.0, 3.0, 4.0);
        let placement = SheetPlacement::new(50.0, 50.0, Orientation::Landscape);
        let layout = assemble(Dimension::new(10.0, 10.0), sheet, border, vec![placement]).unwrap();

        // turned sheet: bottom border on the left, left border on top
        let p = layout.placements[0];
        let outline = layout.sheet_rect(&p);
        assert_eq!((p.x - outline.x, p.y - outline.y), (3.0, 4.0));
        assert_eq!(outline.size(), Dimension::new(200.0, 100.0));
        assert_eq!(layout.printable_rect(&p).size(), Dimension::new(196.0, 94.0));
    }

    #[test]
    fn test_invalid_border_rejected() {
        let result = assemble(
            Dimension::new(100.0, 100.0),
            a4(),
            Border::new(150.0, 0.0, 150.0, 0.0),
            Vec::new(),
        );
        assert!(matches!(result, Err(PosterError::InvalidDimension(_))));
    }
}
