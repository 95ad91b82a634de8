//! The phase pipeline.
//!
//! `preparing → optimizing_links → optimizing_pages → validating_schema →
//! generating_sitemap → validating_package → aggregating_stats → complete`.
//! Each phase starts only after the previous one has fully produced its
//! output. [`run`] is the sequential reference; [`workers::run_concurrent`]
//! runs the per-page phase on tokio tasks and produces identical output.

pub mod workers;

#[cfg(test)]
mod tests;

use crate::assembly::Collaborators;
use crate::config::OptimizerConfig;
use crate::error::OptimizeError;
use crate::graph::{LinkGraph, LinkGraphBuilder};
use crate::pages::{EditorialContent, PageDescriptor, Provider, SiteContext, SiteInput, check_pages};
use crate::results::{
    Enrichments, IssueCounts, OptimizedPackage, OptimizedPage, PackageStats, SiteArtifacts,
};
use crate::schema::{self, PageSchemaInput, SchemaRecord, validate_schema};
use crate::seo::{self, PageFacts, SeoRules, rules::check_schema_validity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Preparing,
    OptimizingLinks,
    OptimizingPages,
    ValidatingSchema,
    GeneratingSitemap,
    ValidatingPackage,
    AggregatingStats,
    Complete,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Preparing => "preparing",
            Phase::OptimizingLinks => "optimizing_links",
            Phase::OptimizingPages => "optimizing_pages",
            Phase::ValidatingSchema => "validating_schema",
            Phase::GeneratingSitemap => "generating_sitemap",
            Phase::ValidatingPackage => "validating_package",
            Phase::AggregatingStats => "aggregating_stats",
            Phase::Complete => "complete",
        }
    }

    /// Human-readable label for the start of the phase
    pub fn step(&self) -> &'static str {
        match self {
            Phase::Preparing => "Checking blueprint",
            Phase::OptimizingLinks => "Building internal link graph",
            Phase::OptimizingPages => "Optimizing pages",
            Phase::ValidatingSchema => "Validating structured data",
            Phase::GeneratingSitemap => "Generating sitemap and robots.txt",
            Phase::ValidatingPackage => "Validating package",
            Phase::AggregatingStats => "Aggregating statistics",
            Phase::Complete => "Optimization complete",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A progress notification. Page events carry the page id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub phase: Phase,
    pub page_id: Option<String>,
    pub completed: usize,
    pub total: usize,
    pub step: String,
}

impl ProgressEvent {
    fn phase(phase: Phase, completed: usize, total: usize) -> Self {
        Self {
            phase,
            page_id: None,
            completed,
            total,
            step: phase.step().to_string(),
        }
    }

    fn page(page_id: &str, completed: usize, total: usize) -> Self {
        Self {
            phase: Phase::OptimizingPages,
            page_id: Some(page_id.to_string()),
            completed,
            total,
            step: format!("Optimized {}", page_id),
        }
    }
}

/// Receives progress events, in phase and page order
pub trait ProgressSink {
    fn emit(&mut self, event: ProgressEvent);
}

impl<F: FnMut(ProgressEvent)> ProgressSink for F {
    fn emit(&mut self, event: ProgressEvent) {
        self(event)
    }
}

/// Discards all events
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn emit(&mut self, _event: ProgressEvent) {}
}

/// Forwards events into a tokio channel; a closed receiver is ignored
#[derive(Debug, Clone)]
pub struct ChannelProgress(pub mpsc::UnboundedSender<ProgressEvent>);

impl From<mpsc::UnboundedSender<ProgressEvent>> for ChannelProgress {
    fn from(sender: mpsc::UnboundedSender<ProgressEvent>) -> Self {
        Self(sender)
    }
}

impl ProgressSink for ChannelProgress {
    fn emit(&mut self, event: ProgressEvent) {
        let _ = self.0.send(event);
    }
}

/// Read-only state shared by every page of a run
pub struct RunContext {
    pub site: SiteContext,
    pub pages: Vec<PageDescriptor>,
    pub graph: LinkGraph,
    pub editorial: BTreeMap<String, EditorialContent>,
    pub providers: BTreeMap<String, Provider>,
    pub rules: SeoRules,
    pub collaborators: Collaborators,
}

fn emit(sink: &mut impl ProgressSink, phase: Phase, completed: usize, total: usize) {
    ::log::debug!("Phase {} ({}/{})", phase, completed, total);
    sink.emit(ProgressEvent::phase(phase, completed, total));
}

fn emit_page(sink: &mut impl ProgressSink, page_id: &str, completed: usize, total: usize) {
    ::log::trace!("Page {} done ({}/{})", page_id, completed, total);
    sink.emit(ProgressEvent::page(page_id, completed, total));
}

/// Check the input, then build the link graph.
///
/// Every fatal error surfaces here, before any page is assembled.
pub fn prepare(
    input: &SiteInput,
    config: &OptimizerConfig,
    collaborators: &Collaborators,
    sink: &mut impl ProgressSink,
) -> Result<RunContext, OptimizeError> {
    let pages = &input.blueprint.pages;
    let total = pages.len();

    emit(sink, Phase::Preparing, 0, total);
    check_pages(pages)?;
    let site = SiteContext::from_blueprint(&input.blueprint)?;
    let rules = SeoRules::new(config.rules.clone())?;
    ::log::info!(
        "Optimizing {} pages for {} ({})",
        total,
        site.brand_name,
        site.base_url
    );

    emit(sink, Phase::OptimizingLinks, 0, total);
    let graph = LinkGraphBuilder::new(&site)
        .with_density_target(config.link_density_target)
        .with_repair_passes(config.orphan_repair_passes)
        .build(pages)?;
    ::log::info!(
        "Link graph: {} links, {} orphans repaired, {} unresolved required links",
        graph.total_links(),
        graph.report().repaired_orphans.len(),
        graph.report().unresolved_required.len()
    );

    Ok(RunContext {
        site,
        pages: pages.clone(),
        graph,
        editorial: input.editorial.clone(),
        providers: input.provider_index(),
        rules,
        collaborators: collaborators.clone(),
    })
}

/// The per-page body: meta, headings, breadcrumbs, schema, validate, score, suggest
pub fn assemble_page(ctx: &RunContext, page: &PageDescriptor) -> OptimizedPage {
    let collaborators = &ctx.collaborators;
    let editorial = ctx.editorial.get(&page.id);

    let meta = collaborators.meta.generate(page, &ctx.site);
    let headings = collaborators.headings.generate(page, editorial);
    let breadcrumbs = collaborators
        .breadcrumbs
        .generate(page, &ctx.pages, &ctx.site);

    let provider = page
        .provider_id
        .as_ref()
        .and_then(|id| ctx.providers.get(id));
    let listed: Vec<Provider> = page
        .provider_ids
        .iter()
        .filter_map(|id| ctx.providers.get(id))
        .cloned()
        .collect();
    let faqs = editorial.map(|e| e.faqs.as_slice()).unwrap_or(&[]);

    let schema = schema::generate_schema(
        &PageSchemaInput {
            page,
            title: meta.title.as_deref(),
            description: meta.description.as_deref(),
            provider,
            listed_providers: &listed,
            faqs,
            breadcrumbs: &breadcrumbs,
        },
        &ctx.site,
    );

    let internal_links = ctx.graph.links_for(&page.id).to_vec();

    let facts = PageFacts {
        page_type: page.page_type,
        meta: &meta,
        headings: &headings,
        schema: &schema,
        link_count: internal_links.len(),
        city: &ctx.site.city,
    };
    let issues = seo::validate_page(&facts, &ctx.rules);
    let score = collaborators.scorer.score(&facts, &issues);
    let suggestions = seo::suggestions(score, &issues, &facts, &ctx.rules);

    OptimizedPage {
        id: page.id.clone(),
        url: page.url.clone(),
        page_type: page.page_type,
        meta,
        schema,
        headings,
        internal_links,
        breadcrumbs,
        content: page.content.clone(),
        score,
        issues,
        suggestions,
    }
}

/// Re-validate every schema record and fold invalid ones back into the page
fn revalidate(ctx: &RunContext, page: &mut OptimizedPage) {
    let records = std::mem::take(&mut page.schema);
    page.schema = records.into_iter().map(validate_schema).collect();

    let invalid = check_schema_validity(&page.schema);
    if invalid.is_empty() {
        return;
    }

    ::log::debug!("{}: {} invalid schema findings", page.id, invalid.len());
    page.issues.extend(invalid);

    let facts = PageFacts {
        page_type: page.page_type,
        meta: &page.meta,
        headings: &page.headings,
        schema: &page.schema,
        link_count: page.internal_links.len(),
        city: &ctx.site.city,
    };
    let score = ctx.collaborators.scorer.score(&facts, &page.issues);
    let suggestions = seo::suggestions(score, &page.issues, &facts, &ctx.rules);
    page.score = score;
    page.suggestions = suggestions;
}

fn aggregate(ctx: &RunContext, pages: &[OptimizedPage], site_schema: &[SchemaRecord]) -> PackageStats {
    let total_pages = pages.len();
    let total_internal_links: usize = pages.iter().map(|p| p.internal_links.len()).sum();

    let schema_records = pages.iter().flat_map(|p| p.schema.iter()).chain(site_schema);
    let (total_schema_records, invalid_schema_records) =
        schema_records.fold((0, 0), |(total, invalid), record| {
            (total + 1, invalid + usize::from(!record.valid))
        });

    let mut pages_by_type = BTreeMap::new();
    for page in pages {
        *pages_by_type.entry(page.page_type).or_insert(0) += 1;
    }

    let average = |sum: f64| {
        if total_pages == 0 {
            0.0
        } else {
            sum / total_pages as f64
        }
    };

    PackageStats {
        total_pages,
        total_internal_links,
        average_links_per_page: average(total_internal_links as f64),
        total_schema_records,
        invalid_schema_records,
        average_score: average(pages.iter().map(|p| p.score).sum()),
        pages_by_type,
        issues_by_severity: IssueCounts::from_issues(pages.iter().flat_map(|p| p.issues.iter())),
        orphans_repaired: ctx.graph.report().repaired_orphans.len(),
        unresolved_required_links: ctx.graph.report().unresolved_required.len(),
    }
}

/// Everything after the per-page phase
pub fn finish(
    ctx: &RunContext,
    input: &SiteInput,
    config: &OptimizerConfig,
    mut pages: Vec<OptimizedPage>,
    sink: &mut impl ProgressSink,
) -> OptimizedPackage {
    let total = pages.len();
    let mut site_schema = schema::generate_site_schema(&ctx.site);

    if config.schema_validation {
        emit(sink, Phase::ValidatingSchema, total, total);
        for page in &mut pages {
            revalidate(ctx, page);
        }
        site_schema = site_schema.into_iter().map(validate_schema).collect();
    } else {
        ::log::debug!("Schema re-validation disabled");
    }

    emit(sink, Phase::GeneratingSitemap, total, total);
    let sitemap = ctx.collaborators.sitemap.generate(&ctx.pages, &ctx.site);
    let robots = ctx.collaborators.robots.generate(&ctx.site);

    emit(sink, Phase::ValidatingPackage, total, total);
    let validation = seo::validate_package(&pages, &site_schema);

    emit(sink, Phase::AggregatingStats, total, total);
    let stats = aggregate(ctx, &pages, &site_schema);

    ::log::info!(
        "Optimized {} pages: {} links, average score {:.1}, package {}",
        stats.total_pages,
        stats.total_internal_links,
        stats.average_score,
        if validation.valid { "valid" } else { "has findings" }
    );
    emit(sink, Phase::Complete, total, total);

    OptimizedPackage {
        pages,
        site: SiteArtifacts {
            schema: site_schema,
            sitemap,
            robots,
        },
        validation,
        stats,
        enrichments: Enrichments {
            editorial: input.editorial.clone(),
            comparisons: input.comparisons.clone(),
            providers: input.providers.clone(),
        },
    }
}

/// Run the whole pipeline on the current thread
pub fn run(
    input: &SiteInput,
    config: &OptimizerConfig,
    collaborators: &Collaborators,
    sink: &mut impl ProgressSink,
) -> Result<OptimizedPackage, OptimizeError> {
    let ctx = prepare(input, config, collaborators, sink)?;
    let total = ctx.pages.len();

    emit(sink, Phase::OptimizingPages, 0, total);
    let mut pages = Vec::with_capacity(total);
    for (index, page) in ctx.pages.iter().enumerate() {
        pages.push(assemble_page(&ctx, page));
        emit_page(sink, &page.id, index + 1, total);
    }

    Ok(finish(&ctx, input, config, pages, sink))
}
