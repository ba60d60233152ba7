//! FILENAME: app/cli/src/config.rs
// PURPOSE: Dashboard configuration file and command-line overrides.

use crate::cli::{ChartArgs, FilterArgs, GlobalArgs};
use crate::DynError;
use persistence::{GeneratorConfig, DEFAULT_DATASET_PATH};
use pivot_engine::{CategoryOrder, FilterContext, Metric};
use scene_engine::{BarSize, ColorScale, SceneOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Chart selection, as chosen on the 3D page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub metric: Metric,
    pub color_scale: ColorScale,
    pub bar_size: BarSize,
    pub category_order: CategoryOrder,
}

impl SceneConfig {
    pub fn options(&self) -> SceneOptions {
        SceneOptions {
            color_scale: self.color_scale,
            bar_size: self.bar_size,
            category_order: self.category_order,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub generator: GeneratorConfig,
    pub scene: SceneConfig,
    pub log_file: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            data_path: PathBuf::from(DEFAULT_DATASET_PATH),
            generator: GeneratorConfig::default(),
            scene: SceneConfig::default(),
            log_file: None,
        }
    }
}

impl DashboardConfig {
    pub fn load(path: &Path) -> Result<Self, DynError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| format!("cannot read config {}: {}", path.display(), e))?;
        let config: DashboardConfig = serde_json::from_str(&raw)
            .map_err(|e| format!("invalid config {}: {}", path.display(), e))?;
        config.generator.validate()?;
        Ok(config)
    }

    /// The config file named by `--config` (or defaults), with global flags applied.
    pub fn from_args(global: &GlobalArgs) -> Result<Self, DynError> {
        let mut config = match &global.config {
            Some(path) => DashboardConfig::load(path)?,
            None => DashboardConfig::default(),
        };
        if let Some(path) = &global.data {
            config.data_path = path.clone();
        }
        if let Some(path) = &global.log_file {
            config.log_file = Some(path.clone());
        }
        Ok(config)
    }

    pub fn apply_chart(&mut self, chart: &ChartArgs) {
        if let Some(metric) = chart.metric {
            self.scene.metric = metric;
        }
        if let Some(scale) = chart.color_scale {
            self.scene.color_scale = scale;
        }
        if let Some(size) = chart.bar_size {
            self.scene.bar_size = size;
        }
        if chart.ascending {
            self.scene.category_order = CategoryOrder::Ascending;
        }
    }
}

fn clean_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Sidebar-equivalent filter built from `--start`, `--end`, `--segments`, `--products`.
pub fn filter_context(args: &FilterArgs) -> Result<FilterContext, DynError> {
    let filter = FilterContext::unrestricted()
        .with_dates(args.start, args.end)
        .with_segments(clean_list(&args.segments))
        .with_products(clean_list(&args.products));
    filter.validate()?;
    Ok(filter)
}
