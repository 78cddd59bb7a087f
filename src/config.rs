use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration. Every section and field is optional in the TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NagareConfig {
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub simulator: SimulatorConfig,
}

impl NagareConfig {
    /// Loads a configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::NotFound(path.display().to_string()))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Where the anchors of a new process are placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    #[serde(default = "default_canvas_width")]
    pub width: f64,
    #[serde(default = "default_start_y")]
    pub start_y: f64,
    #[serde(default = "default_end_y")]
    pub end_y: f64,
}

impl CanvasConfig {
    /// Horizontal position shared by both seeded anchors.
    pub fn anchor_x(&self) -> f64 {
        self.width / 2.0 - 40.0
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            start_y: default_start_y(),
            end_y: default_end_y(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default = "default_fallback_x")]
    pub fallback_x: f64,
    #[serde(default = "default_fallback_y")]
    pub fallback_y: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            fallback_x: default_fallback_x(),
            fallback_y: default_fallback_y(),
        }
    }
}

/// Zoom levels, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    #[serde(default = "default_min_zoom")]
    pub min_zoom: u32,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: u32,
    #[serde(default = "default_zoom_step")]
    pub zoom_step: u32,
    #[serde(default = "default_zoom")]
    pub default_zoom: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            zoom_step: default_zoom_step(),
            default_zoom: default_zoom(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_collection")]
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
            collection: default_collection(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Probability that a simulated run passes.
    #[serde(default = "default_pass_rate")]
    pub pass_rate: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            pass_rate: default_pass_rate(),
        }
    }
}

fn default_canvas_width() -> f64 {
    1280.0
}

fn default_start_y() -> f64 {
    100.0
}

fn default_end_y() -> f64 {
    400.0
}

fn default_fallback_x() -> f64 {
    540.0
}

fn default_fallback_y() -> f64 {
    250.0
}

fn default_min_zoom() -> u32 {
    50
}

fn default_max_zoom() -> u32 {
    200
}

fn default_zoom_step() -> u32 {
    10
}

fn default_zoom() -> u32 {
    100
}

fn default_store_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_collection() -> String {
    "workflows".to_string()
}

fn default_pass_rate() -> f64 {
    0.7
}
