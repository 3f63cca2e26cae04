//! Shared constants for poster layout
//!
//! This module centralizes unit conversions and the numeric tolerances used
//! by the tilers and the poster-size search.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Points per inch (PostScript points)
pub const POINTS_PER_INCH: f64 = 72.0;

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f64 = POINTS_PER_INCH / MM_PER_INCH; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f64) -> f64 {
    pt / POINTS_PER_MM
}

/// Convert centimeters to millimeters
#[inline]
pub fn cm_to_mm(cm: f64) -> f64 {
    cm * 10.0
}

/// Convert millimeters to centimeters
#[inline]
pub fn mm_to_cm(mm: f64) -> f64 {
    mm / 10.0
}

/// Convert inches to millimeters
#[inline]
pub fn in_to_mm(inches: f64) -> f64 {
    inches * MM_PER_INCH
}

/// Convert millimeters to inches
#[inline]
pub fn mm_to_in(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

/// Length units accepted at the edges of the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    #[default]
    Millimeters,
    Centimeters,
    Inches,
    Points,
}

impl Unit {
    pub fn name(self) -> &'static str {
        match self {
            Unit::Millimeters => "mm",
            Unit::Centimeters => "cm",
            Unit::Inches => "in",
            Unit::Points => "pt",
        }
    }

    pub fn to_mm(self, value: f64) -> f64 {
        match self {
            Unit::Millimeters => value,
            Unit::Centimeters => cm_to_mm(value),
            Unit::Inches => in_to_mm(value),
            Unit::Points => pt_to_mm(value),
        }
    }

    pub fn from_mm(self, value: f64) -> f64 {
        match self {
            Unit::Millimeters => value,
            Unit::Centimeters => mm_to_cm(value),
            Unit::Inches => mm_to_in(value),
            Unit::Points => mm_to_pt(value),
        }
    }
}

// =============================================================================
// Geometry Tolerances
// =============================================================================

/// Two coordinates closer than this (in mm) are treated as the same edge.
pub const GEOMETRY_EPSILON: f64 = 1e-6;

/// Slack subtracted from `length / step` before rounding up, so that exact
/// multiples survive floating-point noise.
pub const COUNT_EPSILON: f64 = 1e-9;

/// Largest grid the simple tiler lays out; bigger covers are rejected
/// instead of allocated.
pub const MAX_SHEET_COUNT: usize = 1_000_000;

// =============================================================================
// Poster Size Search
// =============================================================================

/// The bisection stops once its bracket is narrower than this
/// (in area-multiplier units).
pub const BISECTION_TOLERANCE: f64 = 0.001;

/// The simple-grid lower bound is shrunk by this factor before it seeds the
/// bisection bracket.
pub const LOWER_BOUND_SAFETY: f64 = 0.9999;

/// Hard cap on bisection steps.
pub const MAX_BISECTION_ITERATIONS: usize = 200;

// =============================================================================
// Preview
// =============================================================================

/// Default padding around the preview, in layout millimeters
pub const PREVIEW_PADDING_MM: f64 = 10.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_conversion() {
        assert!((mm_to_pt(25.4) - 72.0).abs() < 1e-12);
        assert!((pt_to_mm(72.0) - 25.4).abs() < 1e-12);
        assert!((pt_to_mm(mm_to_pt(210.0)) - 210.0).abs() < 1e-9);
    }

    #[test]
    fn test_unit_round_trip() {
        for unit in [Unit::Millimeters, Unit::Centimeters, Unit::Inches, Unit::Points] {
            let mm = unit.to_mm(unit.from_mm(297.0));
            assert!((mm - 297.0).abs() < 1e-9, "{} lost precision", unit.name());
        }
        assert_eq!(Unit::Centimeters.to_mm(21.0), 210.0);
        assert_eq!(Unit::Inches.to_mm(1.0), 25.4);
    }
}
