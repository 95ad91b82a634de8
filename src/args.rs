use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sitegraph")]
#[command(about = "Builds internal links, structured data and SEO checks for a site blueprint")]
#[command(version)]
pub struct Args {
    /// Site input JSON (blueprint plus optional enrichments)
    pub input: PathBuf,

    /// Optimizer configuration JSON
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Minimum outbound links per page (overrides the config file)
    #[arg(short, long)]
    pub density: Option<usize>,

    /// Skip the schema re-validation phase
    #[arg(long)]
    pub no_schema_validation: bool,

    /// Maximum orphan repair passes
    #[arg(long)]
    pub repair_passes: Option<usize>,

    /// Number of pages optimized concurrently
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Write the package here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
