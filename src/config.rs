use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlacementConfig {
    /// When false the overlay is pushed off the target's bounding box.
    pub allow_overlap: bool,
}

/// Host window metrics, sampled by the caller at placement time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub scroll_y: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
        }
    }

    pub fn scrolled(mut self, scroll_y: f64) -> Self {
        self.scroll_y = scroll_y;
        self
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1024.0, 768.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub placement: PlacementConfig,
    pub viewport: Viewport,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ViewportFile {
    width: Option<f64>,
    height: Option<f64>,
    scroll_y: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    allow_overlap: Option<bool>,
    viewport: Option<ViewportFile>,
}

/// Reads a JSON5 config file and layers it over the defaults. No path means
/// defaults only.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = json5::from_str(contents)?;

    if let Some(v) = parsed.allow_overlap {
        config.placement.allow_overlap = v;
    }
    if let Some(viewport) = parsed.viewport {
        if let Some(v) = viewport.width {
            config.viewport.width = v;
        }
        if let Some(v) = viewport.height {
            config.viewport.height = v;
        }
        if let Some(v) = viewport.scroll_y {
            config.viewport.scroll_y = v;
        }
    }
    log::debug!("loaded placement config: {config:?}");
    Ok(config)
}
