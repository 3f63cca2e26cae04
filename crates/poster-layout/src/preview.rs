use crate::assemble::Layout;
use crate::layout::Rect;
use crate::types::*;

/// One sheet as drawn in the preview
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewSheet {
    /// Sheet edge
    pub outline: Rect,
    /// Printable region inside the border
    pub printable: Rect,
    pub orientation: Orientation,
}

/// Preview geometry in canvas pixels
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewScene {
    /// Pixels per layout millimeter
    pub zoom: f64,
    /// Where the poster image is drawn
    pub poster: Rect,
    pub sheets: Vec<PreviewSheet>,
}

/// Fit `layout` into a canvas of the given pixel size, keeping `padding`
/// layout millimeters free around it, and centre it.
pub fn preview_scene(
    layout: &Layout,
    canvas_width: f64,
    canvas_height: f64,
    padding: f64,
) -> Result<PreviewScene> {
    Dimension::new(canvas_width, canvas_height).validate("preview canvas")?;
    if !padding.is_finite() || padding < 0.0 {
        return Err(PosterError::InvalidDimension(format!(
            "preview padding must be non-negative and finite, got {padding}"
        )));
    }

    let overall = layout.overall;
    let zoom = (canvas_width / (overall.width + padding)).min(canvas_height / (overall.height + padding));
    let origin_x = (canvas_width - zoom * overall.width) / 2.0;
    let origin_y = (canvas_height - zoom * overall.height) / 2.0;
    let to_canvas = |r: Rect| r.scaled(zoom).translated(origin_x, origin_y);

    let sheets = layout
        .placements
        .iter()
        .map(|p| PreviewSheet {
            outline: to_canvas(layout.sheet_rect(p)),
            printable: to_canvas(layout.printable_rect(p)),
            orientation: p.orientation,
        })
        .collect();

    Ok(PreviewScene {
        zoom,
        poster: to_canvas(layout.poster_rect()),
        sheets,
    })
}
