use clap::Parser;
use sitegraph::{Optimizer, ProgressEvent, SiteInput};
use std::error::Error;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the site input JSON
    #[arg(short, long, default_value = "demos/blueprint.json")]
    input: String,

    /// JSON configuration string
    #[arg(short, long)]
    config: Option<String>,

    /// Minimum outbound links per page
    #[arg(short, long)]
    density: Option<usize>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logger
    env_logger::init();

    let args = Args::parse();
    let input = SiteInput::from_file(&args.input)?;

    let mut optimizer = Optimizer::new();
    if let Some(config) = &args.config {
        optimizer = optimizer.with_config_str(config)?;
    }
    if let Some(density) = args.density {
        optimizer = optimizer.with_link_density_target(density);
    }

    let package = optimizer.run(&input, &mut |event: ProgressEvent| {
        if event.page_id.is_none() {
            println!("[{}] {}", event.phase, event.step);
        }
    })?;

    println!();
    for page in &package.pages {
        println!(
            "{:<16} score {:>5.1}  links {:>2}  schema {}  issues {}",
            page.id,
            page.score,
            page.internal_links.len(),
            page.schema.len(),
            page.issues.len()
        );
    }

    let validation = &package.validation;
    println!();
    println!("Package valid: {}", validation.valid);
    println!("Link coverage: {:.1}%", validation.internal_link_coverage);
    println!("Orphans: {:?}", validation.orphan_pages);
    for warning in &validation.warnings {
        println!("  warning: {}", warning);
    }

    Ok(())
}
