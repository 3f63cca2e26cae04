mod logger;
mod source;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use log::info;
use poster_layout::{
    Border, Dimension, PaperSize, PosterOptions, PosterPlan, SizingSpec, SourcePage, Unit,
    calculate_statistics, compute_layout_async,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "postr", about = "Poster layout planner", version)]
struct Cli {
    /// More log output (repeat for debug and trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute how a page is split over output sheets
    Layout {
        /// Input PDF file
        #[arg(short, long, required_unless_present = "source_size")]
        input: Option<PathBuf>,

        /// Page of the input PDF (1-based)
        #[arg(long, default_value = "1")]
        page: u32,

        /// Source page size instead of an input file
        #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"], conflicts_with = "input")]
        source_size: Option<Vec<f64>>,

        /// Unit of --source-size, --fit and --sheet-size
        #[arg(long, default_value = "mm", value_enum)]
        unit: UnitArg,

        #[command(flatten)]
        sizing: SizingArgs,

        /// Output paper size
        #[arg(long, value_enum)]
        paper: Option<PaperArg>,

        /// Custom output sheet size
        #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"], conflicts_with = "paper")]
        sheet_size: Option<Vec<f64>>,

        /// Sheet border in mm (top, right, bottom, left)
        #[arg(long, num_args = 4, value_names = ["TOP", "RIGHT", "BOTTOM", "LEFT"])]
        border: Option<Vec<f64>>,

        /// Tiling strategy
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Load options from a JSON file; other flags override it
        #[arg(long)]
        config: Option<PathBuf>,

        /// Store the effective options as JSON
        #[arg(long)]
        save_config: Option<PathBuf>,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the paper size presets
    Sizes {
        #[arg(long, default_value = "mm", value_enum)]
        unit: UnitArg,
    },
}

/// How big the poster gets; at most one may be given
#[derive(Args)]
#[group(multiple = false)]
struct SizingArgs {
    /// Fit the poster into a box
    #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"])]
    fit: Option<Vec<f64>>,

    /// Fit the poster into a paper size
    #[arg(long, value_enum)]
    paper_fit: Option<PaperArg>,

    /// Poster area as a multiple of the source page area
    #[arg(long)]
    multiplier: Option<f64>,

    /// Largest poster printable on this many sheets
    #[arg(long)]
    pages: Option<usize>,
}

impl SizingArgs {
    fn to_spec(&self, unit: Unit) -> Option<SizingSpec> {
        let box_of = |size: Dimension| SizingSpec::FitToBox {
            max_width: size.width,
            max_height: size.height,
        };

        if let Some(fit) = &self.fit {
            Some(box_of(pair(fit, unit)))
        } else if let Some(paper) = self.paper_fit {
            Some(box_of(PaperSize::from(paper).dimensions_mm()))
        } else if let Some(factor) = self.multiplier {
            Some(SizingSpec::AreaMultiplier(factor))
        } else {
            self.pages.map(SizingSpec::MaxSheetCount)
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Simple,
    Complex,
}

#[derive(Clone, Copy, ValueEnum)]
enum UnitArg {
    Mm,
    Cm,
    In,
    Pt,
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A0 => Self::A0,
            PaperArg::A1 => Self::A1,
            PaperArg::A2 => Self::A2,
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<StrategyArg> for poster_layout::Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Simple => Self::Simple,
            StrategyArg::Complex => Self::Complex,
        }
    }
}

impl From<UnitArg> for Unit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Mm => Self::Millimeters,
            UnitArg::Cm => Self::Centimeters,
            UnitArg::In => Self::Inches,
            UnitArg::Pt => Self::Points,
        }
    }
}

/// A `WIDTH HEIGHT` argument pair, converted to millimeters
fn pair(values: &[f64], unit: Unit) -> Dimension {
    Dimension::new(unit.to_mm(values[0]), unit.to_mm(values[1]))
}

fn print_plan(plan: &PosterPlan) {
    let layout = &plan.layout;
    let stats = calculate_statistics(layout);

    println!("Poster Layout:");
    println!("  Poster: {}", plan.resolution.poster);
    println!("  Area multiplier: {:.3}", plan.resolution.multiplier);
    println!(
        "  Sheets: {} ({} portrait, {} landscape, at least {} needed)",
        stats.total_sheets, stats.portrait_sheets, stats.landscape_sheets, stats.minimum_sheets
    );
    println!("  Efficiency: {:.1}%", stats.efficiency * 100.0);
    println!("  Bounding box: {}", layout.overall);
    println!(
        "  Poster offset: ({:.2}, {:.2}) mm",
        layout.poster_offset.0, layout.poster_offset.1
    );
    println!("  Placements:");
    for (index, placement) in layout.placements.iter().enumerate() {
        println!(
            "    {:>3}: x {:>8.2}  y {:>8.2}  {:?}",
            index + 1,
            placement.x,
            placement.y,
            placement.orientation
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::StderrLogger::new(cli.verbose).init()?;

    match cli.command {
        Commands::Layout {
            input,
            page,
            source_size,
            unit,
            sizing,
            paper,
            sheet_size,
            border,
            strategy,
            config,
            save_config,
            json,
        } => {
            let unit = Unit::from(unit);

            let mut options = match &config {
                Some(path) => PosterOptions::load(path)
                    .await
                    .with_context(|| format!("loading {}", path.display()))?,
                None => PosterOptions::default(),
            };
            if let Some(spec) = sizing.to_spec(unit) {
                options.sizing = spec;
            }
            if let Some(paper) = paper {
                options.paper = paper.into();
            }
            if let Some(size) = &sheet_size {
                let size = pair(size, unit);
                options.paper = PaperSize::Custom {
                    width_mm: size.width,
                    height_mm: size.height,
                };
            }
            if let Some(border) = &border {
                options.border = Border::new(border[0], border[1], border[2], border[3]);
            }
            if let Some(strategy) = strategy {
                options.strategy = strategy.into();
            }
            options.validate()?;

            if let Some(path) = &save_config {
                options.save(path).await?;
                info!("saved options to {}", path.display());
            }

            let source = match (&input, &source_size) {
                (Some(path), _) => {
                    let pdf_page = source::load_page(path, page).await?;
                    info!(
                        "page {} of {}: {:.2} × {:.2} pt",
                        page,
                        path.display(),
                        pdf_page.width_pt,
                        pdf_page.height_pt
                    );
                    pdf_page.dimension_mm()
                }
                (None, Some(size)) => pair(size, unit),
                (None, None) => anyhow::bail!("either --input or --source-size is required"),
            };

            let plan = compute_layout_async(source, &options).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print_plan(&plan);
            }
        }

        Commands::Sizes { unit } => {
            let unit = Unit::from(unit);
            println!("Paper sizes ({}):", unit.name());
            for paper in PaperSize::PRESETS {
                let size = paper.dimensions_mm();
                println!(
                    "  {:<8} {:>8.2} × {:<8.2}",
                    paper.name(),
                    unit.from_mm(size.width),
                    unit.from_mm(size.height)
                );
            }
        }
    }

    Ok(())
}
