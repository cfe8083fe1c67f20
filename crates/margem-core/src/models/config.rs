//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the margem pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MargemConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Proposal extraction configuration.
    pub extraction: ExtractionConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to process (0 = unlimited).
    pub max_pages: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { max_pages: 0 }
    }
}

/// Proposal extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Minimum reconstructed text length to attempt field matching.
    /// Documents below this fall back to the all-defaults record.
    pub min_text_length: usize,

    /// Enable the layout-specific composite row strategies (identity row,
    /// banking row).
    pub composite_rows: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_text_length: 50,
            composite_rows: true,
        }
    }
}

impl MargemConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
