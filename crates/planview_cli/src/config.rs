//! planview configuration file handling
//!
//! Settings live in an optional `planview.toml`. Every section and key may be
//! omitted; command line flags override what the file says.
//!
//! ```toml
//! [viewport]
//! width = 1024
//! height = 768
//! background = "#ffffff"
//!
//! [svg]
//! dpi = 96.0
//! system_fonts = true
//! ```

use anyhow::{Context, Result};
use planview_core::Color;
use planview_svg::PlanOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "planview.toml";

#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct PlanviewConfig {
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub svg: SvgConfig,
}

/// Output surface settings
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct ViewportConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Hex color, `#rrggbb` or `#rrggbbaa`
    #[serde(default = "default_background")]
    pub background: String,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            background: default_background(),
        }
    }
}

fn default_width() -> u32 {
    1024
}

fn default_height() -> u32 {
    768
}

fn default_background() -> String {
    "#ffffff".to_string()
}

/// Plan parsing settings
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct SvgConfig {
    #[serde(default = "default_dpi")]
    pub dpi: f32,
    #[serde(default)]
    pub system_fonts: bool,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            dpi: default_dpi(),
            system_fonts: false,
        }
    }
}

fn default_dpi() -> f32 {
    96.0
}

impl PlanviewConfig {
    /// Load from an explicit path. The file must exist.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Load `planview.toml` from a directory, falling back to defaults when
    /// the file is absent.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.background_color()?;
        Ok(config)
    }

    pub fn background_color(&self) -> Result<Color> {
        Color::parse_hex(&self.viewport.background).with_context(|| {
            format!(
                "Invalid background color '{}', expected #rrggbb or #rrggbbaa",
                self.viewport.background
            )
        })
    }

    pub fn plan_options(&self) -> PlanOptions {
        PlanOptions {
            dpi: self.svg.dpi,
            system_fonts: self.svg.system_fonts,
        }
    }
}
