use crate::error::OptimizeError;
use crate::seo::rules::SeoRuleConfig;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const DEFAULT_LINK_DENSITY_TARGET: usize = 10;

/// Configuration for an optimization run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizerConfig {
    /// Minimum outbound links per page; per-type floors still apply
    #[serde(default = "default_link_density_target")]
    pub link_density_target: usize,

    /// Whether to run the schema re-validation phase
    #[serde(default = "default_schema_validation")]
    pub schema_validation: bool,

    /// Upper bound on orphan repair passes. One pass matches the reference behavior.
    #[serde(default = "default_orphan_repair_passes")]
    pub orphan_repair_passes: usize,

    /// Number of pages optimized at once by the concurrent runner
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Thresholds and patterns used by the page rules
    #[serde(default)]
    pub rules: SeoRuleConfig,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            link_density_target: default_link_density_target(),
            schema_validation: default_schema_validation(),
            orphan_repair_passes: default_orphan_repair_passes(),
            max_concurrency: default_max_concurrency(),
            rules: SeoRuleConfig::default(),
        }
    }
}

impl OptimizerConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, OptimizeError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, OptimizeError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }
}

/// Default value for link_density_target
fn default_link_density_target() -> usize {
    DEFAULT_LINK_DENSITY_TARGET
}

/// Default value for schema_validation
fn default_schema_validation() -> bool {
    true
}

/// Default number of orphan repair passes
fn default_orphan_repair_passes() -> usize {
    1
}

/// Default value for max_concurrency
fn default_max_concurrency() -> usize {
    4
}
