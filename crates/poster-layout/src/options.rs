use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Everything the layout engine needs besides the source page
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PosterOptions {
    // Poster size
    pub sizing: SizingSpec,

    // Output sheets
    pub paper: PaperSize,
    pub border: Border,

    // Tiling
    pub strategy: Strategy,
}

impl Default for PosterOptions {
    fn default() -> Self {
        Self {
            sizing: SizingSpec::default(),
            paper: PaperSize::A4,
            border: Border::default(),
            strategy: Strategy::Simple,
        }
    }
}

impl PosterOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| PosterError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PosterError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Output sheet size in millimeters (native orientation)
    pub fn sheet(&self) -> Dimension {
        self.paper.dimensions_mm()
    }

    /// Printable area of one output sheet
    pub fn printable(&self) -> Result<Dimension> {
        self.border.printable_area(self.sheet())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        self.printable()?;
        self.sizing.validate()
    }
}
