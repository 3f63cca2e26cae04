pub mod constants;
pub mod layout;
mod assemble;
mod compute;
mod options;
mod preview;
mod render;
mod resolve;
mod stats;
mod types;

pub use assemble::{Layout, assemble};
pub use compute::{PosterPlan, compute_layout, compute_layout_async, compute_layout_for_page};
pub use constants::Unit;
pub use layout::{Rect, complex_cover, simple_cover};
pub use options::*;
pub use preview::{PreviewScene, PreviewSheet, preview_scene};
pub use render::{RegionSink, SheetRegion, SourcePage, render_layout, sheet_regions};
pub use resolve::{Resolution, count_sheets, fit_to_box, fit_within, resolve, scale_to_multiplier, tile};
pub use stats::{LayoutStatistics, calculate_statistics};
pub use types::*;
