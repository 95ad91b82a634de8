use super::{Phase, ProgressSink, RunContext, assemble_page, emit, emit_page, finish, prepare};
use crate::assembly::Collaborators;
use crate::config::OptimizerConfig;
use crate::error::OptimizeError;
use crate::pages::SiteInput;
use crate::results::{OptimizedPackage, OptimizedPage};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// Run the pipeline with the per-page phase spread over tokio tasks.
///
/// At most `max_concurrency` pages are assembled at once. Tasks are awaited in
/// blueprint order, so page events and the output match [`super::run`].
pub async fn run_concurrent(
    input: &SiteInput,
    config: &OptimizerConfig,
    collaborators: &Collaborators,
    sink: &mut impl ProgressSink,
) -> Result<OptimizedPackage, OptimizeError> {
    let ctx = Arc::new(prepare(input, config, collaborators, sink)?);
    let total = ctx.pages.len();

    emit(sink, Phase::OptimizingPages, 0, total);
    let handles = spawn_workers(config.max_concurrency, &ctx);
    ::log::debug!(
        "Spawned {} page tasks with {} permits",
        handles.len(),
        config.max_concurrency.max(1)
    );

    let mut pages = Vec::with_capacity(total);
    for (index, handle) in handles.into_iter().enumerate() {
        let page = handle
            .await
            .map_err(|e| OptimizeError::Worker(e.to_string()))??;
        emit_page(sink, &page.id, index + 1, total);
        pages.push(page);
    }

    Ok(finish(&ctx, input, config, pages, sink))
}

/// Spawns one task per page, gated by a shared semaphore
fn spawn_workers(
    max_concurrency: usize,
    ctx: &Arc<RunContext>,
) -> Vec<JoinHandle<Result<OptimizedPage, OptimizeError>>> {
    let semaphore = Arc::new(Semaphore::new(max_concurrency.max(1)));

    (0..ctx.pages.len())
        .map(|index| {
            let ctx = Arc::clone(ctx);
            let semaphore = Arc::clone(&semaphore);
            tokio::spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| OptimizeError::Worker(e.to_string()))?;
                let page = &ctx.pages[index];
                ::log::trace!("Worker assembling page {}", page.id);
                Ok(assemble_page(&ctx, page))
            })
        })
        .collect()
}
