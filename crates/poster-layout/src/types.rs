use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PosterError {
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),
    #[error("Unsupported mode: {0}")]
    UnsupportedMode(String),
    #[error("No solution found: {0}")]
    NoSolutionFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, PosterError>;

/// Reject anything that is not a strictly positive, finite length.
pub(crate) fn check_positive(value: f64, what: &str) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PosterError::InvalidDimension(format!(
            "{what} must be positive and finite, got {value}"
        )))
    }
}

/// Width and height in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimension {
    pub width: f64,
    pub height: f64,
}

impl Dimension {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn area(self) -> f64 {
        self.width * self.height
    }

    /// The same dimension turned by 90°
    pub fn swapped(self) -> Self {
        Self::new(self.height, self.width)
    }

    pub fn is_square(self) -> bool {
        (self.width - self.height).abs() <= crate::constants::GEOMETRY_EPSILON
    }

    /// Check that both sides are strictly positive and finite.
    pub fn validate(self, what: &str) -> Result<()> {
        check_positive(self.width, &format!("{what} width"))?;
        check_positive(self.height, &format!("{what} height"))
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} × {:.2} mm", self.width, self.height)
    }
}

/// Per-sheet margin reserved for overlap/gluing and for the unprintable area
/// of the printer. Values are in millimeters and refer to the sheet in its
/// native (unrotated) orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Border {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Border {
    fn default() -> Self {
        Self::uniform(20.0)
    }
}

impl Border {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create the same border on all sides
    pub fn uniform(border_mm: f64) -> Self {
        Self::new(border_mm, border_mm, border_mm, border_mm)
    }

    /// Border as seen on the poster for a sheet printed in `orientation`.
    ///
    /// A rotated sheet is turned clockwise: its left edge ends up on top,
    /// its top edge on the right, and so on.
    pub fn oriented(self, orientation: Orientation) -> Self {
        match orientation {
            Orientation::Portrait => self,
            Orientation::Landscape => Self {
                top: self.left,
                right: self.top,
                bottom: self.right,
                left: self.bottom,
            },
        }
    }

    /// Printable area left on `sheet` once the border is removed.
    ///
    /// Fails if any border is negative or non-finite, or if the border eats
    /// the whole sheet on either axis.
    pub fn printable_area(self, sheet: Dimension) -> Result<Dimension> {
        sheet.validate("sheet")?;
        for (value, side) in [
            (self.top, "top"),
            (self.right, "right"),
            (self.bottom, "bottom"),
            (self.left, "left"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PosterError::InvalidDimension(format!(
                    "{side} border must be non-negative and finite, got {value}"
                )));
            }
        }

        let printable = Dimension::new(
            sheet.width - (self.left + self.right),
            sheet.height - (self.top + self.bottom),
        );
        if printable.width <= 0.0 {
            return Err(PosterError::InvalidDimension(format!(
                "left and right borders ({} + {} mm) leave no printable width on a {} mm wide sheet",
                self.left, self.right, sheet.width
            )));
        }
        if printable.height <= 0.0 {
            return Err(PosterError::InvalidDimension(format!(
                "top and bottom borders ({} + {} mm) leave no printable height on a {} mm high sheet",
                self.top, self.bottom, sheet.height
            )));
        }
        Ok(printable)
    }
}

/// How an output sheet is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// The sheet's native aspect, as given by its paper size
    #[default]
    Portrait,
    /// The sheet turned by 90°
    Landscape,
}

impl Orientation {
    pub fn is_rotated(self) -> bool {
        self == Orientation::Landscape
    }

    /// Apply this orientation to a size given in native orientation.
    pub fn apply(self, size: Dimension) -> Dimension {
        match self {
            Orientation::Portrait => size,
            Orientation::Landscape => size.swapped(),
        }
    }
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: f64, height_mm: f64 },
}

impl PaperSize {
    /// Every preset, largest A size first
    pub const PRESETS: [PaperSize; 9] = [
        PaperSize::A0,
        PaperSize::A1,
        PaperSize::A2,
        PaperSize::A3,
        PaperSize::A4,
        PaperSize::A5,
        PaperSize::Letter,
        PaperSize::Legal,
        PaperSize::Tabloid,
    ];

    /// Get base dimensions (portrait for the presets)
    pub fn dimensions_mm(self) -> Dimension {
        match self {
            PaperSize::A0 => Dimension::new(841.0, 1189.0),
            PaperSize::A1 => Dimension::new(594.0, 841.0),
            PaperSize::A2 => Dimension::new(420.0, 594.0),
            PaperSize::A3 => Dimension::new(297.0, 420.0),
            PaperSize::A4 => Dimension::new(210.0, 297.0),
            PaperSize::A5 => Dimension::new(148.0, 210.0),
            PaperSize::Letter => Dimension::new(215.9, 279.4),
            PaperSize::Legal => Dimension::new(215.9, 355.6),
            PaperSize::Tabloid => Dimension::new(279.4, 431.8),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => Dimension::new(width_mm, height_mm),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PaperSize::A0 => "A0",
            PaperSize::A1 => "A1",
            PaperSize::A2 => "A2",
            PaperSize::A3 => "A3",
            PaperSize::A4 => "A4",
            PaperSize::A5 => "A5",
            PaperSize::Letter => "Letter",
            PaperSize::Legal => "Legal",
            PaperSize::Tabloid => "Tabloid",
            PaperSize::Custom { .. } => "Custom",
        }
    }
}

/// Tiling strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Strategy {
    /// Uniform-orientation rectangular grid
    #[default]
    Simple,
    /// Four corner blocks with mixed orientations plus a centred infill
    Complex,
}

impl FromStr for Strategy {
    type Err = PosterError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "simple" => Ok(Strategy::Simple),
            "complex" => Ok(Strategy::Complex),
            other => Err(PosterError::UnsupportedMode(format!(
                "unknown strategy '{other}' (expected 'simple' or 'complex')"
            ))),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Simple => "simple",
            Strategy::Complex => "complex",
        })
    }
}

/// Tag of a [`SizingSpec`], as it appears on command lines and in
/// configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizingMode {
    Size,
    Mult,
    Npages,
}

impl FromStr for SizingMode {
    type Err = PosterError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "size" => Ok(SizingMode::Size),
            "mult" => Ok(SizingMode::Mult),
            "npages" => Ok(SizingMode::Npages),
            other => Err(PosterError::UnsupportedMode(format!(
                "unknown sizing mode '{other}' (expected 'size', 'mult' or 'npages')"
            ))),
        }
    }
}

/// How the poster size is chosen. Exactly one mode drives a computation; the
/// resolver reports the values of the other two alongside.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SizingSpec {
    /// Largest poster with the source's aspect ratio fitting into the box
    /// (in either orientation of the box)
    FitToBox { max_width: f64, max_height: f64 },
    /// Poster area as a multiple of the source page area
    AreaMultiplier(f64),
    /// Largest poster that can be printed on at most this many sheets
    MaxSheetCount(usize),
}

impl SizingSpec {
    pub fn mode(&self) -> SizingMode {
        match self {
            SizingSpec::FitToBox { .. } => SizingMode::Size,
            SizingSpec::AreaMultiplier(_) => SizingMode::Mult,
            SizingSpec::MaxSheetCount(_) => SizingMode::Npages,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            SizingSpec::FitToBox {
                max_width,
                max_height,
            } => Dimension::new(max_width, max_height).validate("poster box"),
            SizingSpec::AreaMultiplier(factor) => check_positive(factor, "area multiplier"),
            SizingSpec::MaxSheetCount(0) => Err(PosterError::NoSolutionFound(
                "a poster needs at least one sheet".to_string(),
            )),
            SizingSpec::MaxSheetCount(_) => Ok(()),
        }
    }
}

impl Default for SizingSpec {
    fn default() -> Self {
        let a1 = PaperSize::A1.dimensions_mm();
        SizingSpec::FitToBox {
            max_width: a1.width,
            max_height: a1.height,
        }
    }
}

/// One output sheet: the top-left corner of its printable region and the
/// way it is turned.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetPlacement {
    pub x: f64,
    pub y: f64,
    pub orientation: Orientation,
}

impl SheetPlacement {
    pub fn new(x: f64, y: f64, orientation: Orientation) -> Self {
        Self { x, y, orientation }
    }

    /// The same placement moved by `(dx, dy)`
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.orientation)
    }
}
