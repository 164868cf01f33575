//! Render configuration loaded from TOML.
//!
//! Every key is optional; missing keys take the defaults below. Colors are a
//! table keyed by iteration index:
//!
//! ```toml
//! polygon = 6
//! offset = 0.5
//! iterations = 4
//! background = [234, 238, 241, 255]
//!
//! [colors]
//! 0 = [18, 80, 123, 255]
//! 4 = [255, 255, 255, 255]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::canvas::{ComposeParams, DEFAULT_RADIUS};
use crate::color::{ColorTable, Rgba8};
use crate::error::{Error, Result};
use crate::surface::OutputFormat;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractalConfig {
    /// Seed polygon: 3, 6 or 7.
    pub polygon: u32,
    pub offset: f64,
    pub iterations: u32,
    /// Zero means the default radius.
    pub radius: i32,
    pub minimize: bool,
    pub background: Rgba8,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    /// Iteration index (as a string key) to color.
    pub colors: BTreeMap<String, Rgba8>,
}

impl Default for FractalConfig {
    fn default() -> Self {
        let params = ComposeParams::default();
        Self {
            polygon: params.polygon_count,
            offset: params.offset,
            iterations: params.iterations,
            radius: DEFAULT_RADIUS,
            minimize: params.minimize,
            background: Rgba8::TRANSPARENT,
            output_dir: PathBuf::from("."),
            format: OutputFormat::Png,
            colors: BTreeMap::from([("0".to_string(), Rgba8::AZURE)]),
        }
    }
}

impl FractalConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a config file. A missing file is an error here; the
    /// caller decides whether to fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn compose_params(&self) -> ComposeParams {
        ComposeParams {
            polygon_count: self.polygon,
            offset: self.offset,
            iterations: self.iterations,
            radius: self.radius,
            minimize: self.minimize,
        }
    }

    /// Color keys must be non-negative integers.
    pub fn color_table(&self) -> Result<ColorTable> {
        self.colors
            .iter()
            .map(|(key, &color)| {
                key.trim()
                    .parse::<usize>()
                    .map(|iteration| (iteration, color))
                    .map_err(|_| Error::Config(format!("invalid color key '{key}'")))
            })
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
