pub mod assembly;
pub mod config;
pub mod error;
pub mod graph;
pub mod pages;
pub mod pipeline;
pub mod results;
pub mod schema;
pub mod seo;
pub mod utils;

// Re-export commonly used types for convenience
pub use assembly::Collaborators;
pub use config::OptimizerConfig;
pub use error::OptimizeError;
pub use graph::{InternalLink, LinkGraph, build_link_graph};
pub use pages::{Blueprint, PageDescriptor, PageType, SiteContext, SiteInput};
pub use pipeline::{ChannelProgress, NoProgress, Phase, ProgressEvent, ProgressSink};
pub use results::{OptimizedPackage, OptimizedPage};
pub use schema::{SchemaRecord, generate_schema, validate_schema};
pub use seo::{Issue, Severity, validate_package, validate_page};

/// Main builder for optimizing a site blueprint into a package
#[derive(Debug, Clone, Default)]
pub struct Optimizer {
    config: OptimizerConfig,
    collaborators: Collaborators,
}

impl Optimizer {
    /// Create an optimizer with default configuration and collaborators
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: OptimizerConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a file
    pub fn with_config_file(
        self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let config = OptimizerConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a string
    pub fn with_config_str(self, config_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config = OptimizerConfig::from_json(config_str)?;
        Ok(self.with_config(config))
    }

    /// Set the minimum outbound links per page
    pub fn with_link_density_target(mut self, target: usize) -> Self {
        self.config.link_density_target = target;
        self
    }

    /// Enable or disable the schema re-validation phase
    pub fn with_schema_validation(mut self, enabled: bool) -> Self {
        self.config.schema_validation = enabled;
        self
    }

    /// Set the maximum number of orphan repair passes
    pub fn with_orphan_repair_passes(mut self, passes: usize) -> Self {
        self.config.orphan_repair_passes = passes;
        self
    }

    /// Set the number of pages assembled at once by [`Optimizer::run_concurrent`]
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.config.max_concurrency = max_concurrency;
        self
    }

    /// Swap in custom metadata, heading, breadcrumb, scoring, sitemap or robots generators
    pub fn with_collaborators(mut self, collaborators: Collaborators) -> Self {
        self.collaborators = collaborators;
        self
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Run every phase on the current thread
    pub fn run(
        &self,
        input: &SiteInput,
        sink: &mut impl ProgressSink,
    ) -> Result<OptimizedPackage, OptimizeError> {
        pipeline::run(input, &self.config, &self.collaborators, sink)
    }

    /// Run with the per-page phase spread over tokio tasks
    pub async fn run_concurrent(
        &self,
        input: &SiteInput,
        sink: &mut impl ProgressSink,
    ) -> Result<OptimizedPackage, OptimizeError> {
        pipeline::workers::run_concurrent(input, &self.config, &self.collaborators, sink).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_config() {
        let optimizer = Optimizer::new()
            .with_config_str(r#"{"linkDensityTarget": 4, "maxConcurrency": 8}"#)
            .unwrap()
            .with_schema_validation(false)
            .with_orphan_repair_passes(3);

        let config = optimizer.config();
        assert_eq!(config.link_density_target, 4);
        assert_eq!(config.max_concurrency, 8);
        assert!(!config.schema_validation);
        assert_eq!(config.orphan_repair_passes, 3);
    }

    #[test]
    fn test_builder_rejects_bad_config() {
        assert!(Optimizer::new().with_config_str("{not json").is_err());
        assert!(Optimizer::new().with_config_file("/nonexistent/sitegraph.json").is_err());
    }

    #[test]
    fn test_run_through_builder() {
        let blueprint = Blueprint {
            brand_name: "Acme".to_string(),
            base_url: "https://acme.test".to_string(),
            city: "Austin".to_string(),
            state: None,
            category: "plumbing".to_string(),
            phone: None,
            generated_at: "2024-05-01".to_string(),
            pages: vec![
                PageDescriptor::new("home", "/", PageType::Homepage),
                PageDescriptor::new("about", "/about", PageType::About),
            ],
            providers: Vec::new(),
        };
        let package = Optimizer::new()
            .with_link_density_target(1)
            .run(&SiteInput::new(blueprint), &mut NoProgress)
            .unwrap();

        assert_eq!(package.pages.len(), 2);
        assert_eq!(package.validation.internal_link_coverage, 100.0);
    }
}
