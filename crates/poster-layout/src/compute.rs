use crate::assemble::{Layout, assemble};
use crate::options::PosterOptions;
use crate::render::SourcePage;
use crate::resolve::{Resolution, resolve_tiled};
use crate::types::*;

/// Result of a layout computation: the resolved size triple plus the layout
/// built for it. `layout.sheet_count()` always equals
/// `resolution.sheet_count`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PosterPlan {
    pub resolution: Resolution,
    pub layout: Layout,
}

/// Main layout function
///
/// Resolves the poster size, tiles it with the configured strategy and
/// assembles the result. `source` is the source page size in millimeters.
pub fn compute_layout(source: Dimension, options: &PosterOptions) -> Result<PosterPlan> {
    options.validate()?;

    let sheet = options.sheet();
    let (resolution, placements) = resolve_tiled(
        &options.sizing,
        source,
        sheet,
        options.border,
        options.strategy,
    )?;

    let layout = assemble(resolution.poster, sheet, options.border, placements)?;

    Ok(PosterPlan { resolution, layout })
}

/// [`compute_layout`] for a page read from a document.
pub fn compute_layout_for_page(page: &impl SourcePage, options: &PosterOptions) -> Result<PosterPlan> {
    compute_layout(page.dimension_mm(), options)
}

/// Run [`compute_layout`] on the blocking thread pool.
///
/// Sheet budgets in the hundreds make the complex search noticeably slow;
/// this keeps an async caller responsive meanwhile.
pub async fn compute_layout_async(source: Dimension, options: &PosterOptions) -> Result<PosterPlan> {
    options.validate()?;

    let options = options.clone();

    tokio::task::spawn_blocking(move || compute_layout(source, &options)).await?
}
