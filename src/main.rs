use clap::Parser;
use sitegraph::{Optimizer, ProgressEvent, SiteInput};

mod args;
use args::Args;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    ::log::info!("Loading site input from {}", args.input.display());
    let input = SiteInput::from_file(&args.input)?;

    let mut optimizer = Optimizer::new();
    if let Some(path) = &args.config {
        optimizer = optimizer.with_config_file(path)?;
    }
    if let Some(density) = args.density {
        optimizer = optimizer.with_link_density_target(density);
    }
    if args.no_schema_validation {
        optimizer = optimizer.with_schema_validation(false);
    }
    if let Some(passes) = args.repair_passes {
        optimizer = optimizer.with_orphan_repair_passes(passes);
    }
    if let Some(concurrency) = args.concurrency {
        optimizer = optimizer.with_max_concurrency(concurrency);
    }

    let start_time = std::time::Instant::now();
    let package = optimizer
        .run_concurrent(&input, &mut |event: ProgressEvent| log_progress(&event))
        .await?;

    ::log::info!(
        "Optimization complete - {} pages in {:.2} seconds",
        package.pages.len(),
        start_time.elapsed().as_secs_f64()
    );

    let json = package.to_json()?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json)?;
            ::log::info!("Wrote package to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn log_progress(event: &ProgressEvent) {
    match &event.page_id {
        Some(page_id) => ::log::debug!(
            "[{}/{}] {}: {}",
            event.completed,
            event.total,
            page_id,
            event.step
        ),
        None => ::log::info!("{}: {}", event.phase, event.step),
    }
}
