use super::tables::{self, CONTEXTUAL_LINK_CAP};
use super::{BuildReport, InternalLink, LinkContext, LinkGraph, LinkOrigin, UnresolvedLink};
use crate::config::DEFAULT_LINK_DENSITY_TARGET;
use crate::error::OptimizeError;
use crate::pages::{PageDescriptor, PageType, SiteContext, check_pages};
use crate::utils::{self, Placeholders};
use std::collections::{HashMap, HashSet};

/// Builds the internal link graph for a set of pages.
///
/// Each page gets its required links, then up to [`CONTEXTUAL_LINK_CAP`]
/// keyword or relationship links, then density fill until it reaches
/// `max(min_links(type), density_target)`. A final repair step gives every
/// non-exempt orphan one inbound link from its best eligible linker.
pub struct LinkGraphBuilder<'a> {
    site: &'a SiteContext,
    density_target: usize,
    repair_passes: usize,
}

impl<'a> LinkGraphBuilder<'a> {
    pub fn new(site: &'a SiteContext) -> Self {
        Self {
            site,
            density_target: DEFAULT_LINK_DENSITY_TARGET,
            repair_passes: 1,
        }
    }

    /// Set the configured minimum outbound links per page
    pub fn with_density_target(mut self, density_target: usize) -> Self {
        self.density_target = density_target;
        self
    }

    /// Allow orphan repair to re-verify and run again, up to `passes` times (at least one)
    pub fn with_repair_passes(mut self, passes: usize) -> Self {
        self.repair_passes = passes.max(1);
        self
    }

    /// Build the graph. Fails only on malformed page lists.
    pub fn build(&self, pages: &[PageDescriptor]) -> Result<LinkGraph, OptimizeError> {
        check_pages(pages)?;

        let index: HashMap<&str, usize> = pages
            .iter()
            .enumerate()
            .map(|(i, page)| (page.id.as_str(), i))
            .collect();

        let mut by_priority: Vec<usize> = (0..pages.len()).collect();
        by_priority.sort_by_key(|&i| (tables::density_rank(pages[i].page_type), i));

        let mut report = BuildReport::default();
        let mut outbound: Vec<Outbound> = Vec::with_capacity(pages.len());

        for (source_idx, source) in pages.iter().enumerate() {
            let mut links = Outbound::new(source_idx);

            for required in &source.required_links {
                let Some(&target_idx) = index.get(required.target_id.as_str()) else {
                    ::log::debug!(
                        "Dropping required link {} -> {}: no such page",
                        source.id,
                        required.target_id
                    );
                    report.unresolved_required.push(UnresolvedLink {
                        source_id: source.id.clone(),
                        target_id: required.target_id.clone(),
                    });
                    continue;
                };
                let target = &pages[target_idx];
                let anchor = self.required_anchor(required.anchor_pattern.as_deref(), target);
                let link = self.link_to(target, anchor, LinkContext::Body, LinkOrigin::Required);
                if links.push(target_idx, link) {
                    report.required_links += 1;
                }
            }

            let mut contextual = 0;
            for (target_idx, target) in pages.iter().enumerate() {
                if contextual >= CONTEXTUAL_LINK_CAP {
                    break;
                }
                if target_idx == source_idx || !is_contextual(source, target) {
                    continue;
                }
                let anchor = self.target_phrase(target);
                let link = self.link_to(target, anchor, LinkContext::Body, LinkOrigin::Contextual);
                if links.push(target_idx, link) {
                    contextual += 1;
                }
            }
            report.contextual_links += contextual;

            let min_links = tables::min_links(source.page_type).max(self.density_target);
            for &target_idx in &by_priority {
                if links.len() >= min_links {
                    break;
                }
                let target = &pages[target_idx];
                let anchor = self.target_phrase(target);
                let link = self.link_to(target, anchor, LinkContext::Sidebar, LinkOrigin::Density);
                if links.push(target_idx, link) {
                    report.density_links += 1;
                }
            }
            if links.len() < min_links {
                ::log::trace!(
                    "Page {} has {} of {} links, candidate pool exhausted",
                    source.id,
                    links.len(),
                    min_links
                );
            }

            outbound.push(links);
        }

        self.repair_orphans(pages, &mut outbound, &mut report);

        let order = pages.iter().map(|page| page.id.clone()).collect();
        let links = pages
            .iter()
            .zip(outbound)
            .map(|(page, links)| (page.id.clone(), links.links))
            .collect();
        let graph = LinkGraph::new(order, links, report);

        ::log::info!(
            "Built link graph: {} pages, {} links, {} orphans repaired",
            graph.page_count(),
            graph.total_links(),
            graph.report().repaired_orphans.len()
        );

        Ok(graph)
    }

    /// Greedy orphan repair. One pass unless more were configured; stops once a pass repairs nothing.
    fn repair_orphans(
        &self,
        pages: &[PageDescriptor],
        outbound: &mut [Outbound],
        report: &mut BuildReport,
    ) {
        let mut orphans = find_orphans(pages, outbound);

        for _ in 0..self.repair_passes {
            if orphans.is_empty() {
                break;
            }
            report.repair_passes += 1;

            let mut repaired = 0;
            for &orphan_idx in &orphans {
                let orphan = &pages[orphan_idx];
                let Some(linker_idx) = best_linker(pages, outbound, orphan_idx) else {
                    ::log::debug!("No eligible linker for orphan {}", orphan.id);
                    continue;
                };

                let anchor = self.target_phrase(orphan);
                let link = self.link_to(orphan, anchor, LinkContext::Body, LinkOrigin::Repair);
                if outbound[linker_idx].push(orphan_idx, link) {
                    ::log::debug!(
                        "Repaired orphan {} with a link from {}",
                        orphan.id,
                        pages[linker_idx].id
                    );
                    report.repair_links += 1;
                    report.repaired_orphans.push(orphan.id.clone());
                    repaired += 1;
                }
            }

            orphans = find_orphans(pages, outbound);
            if repaired == 0 {
                break;
            }
        }

        report.remaining_orphans = orphans.iter().map(|&i| pages[i].id.clone()).collect();
    }

    fn placeholders<'k>(&'k self, keyword: &'k str) -> Placeholders<'k> {
        Placeholders {
            brand: &self.site.brand_name,
            city: &self.site.city,
            state: self.site.state.as_deref().unwrap_or(""),
            category: &self.site.category,
            keyword,
        }
    }

    /// The target's keyword, or its type's fallback phrase
    fn target_phrase(&self, target: &PageDescriptor) -> String {
        match target.primary_keyword() {
            Some(keyword) => keyword.to_string(),
            None => utils::fill_placeholders(
                tables::fallback_anchor(target.page_type),
                &self.placeholders(""),
            ),
        }
    }

    fn required_anchor(&self, pattern: Option<&str>, target: &PageDescriptor) -> String {
        let keyword = self.target_phrase(target);
        let template = pattern
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| tables::fallback_anchor(target.page_type));
        utils::fill_placeholders(template, &self.placeholders(&keyword))
    }

    fn link_to(
        &self,
        target: &PageDescriptor,
        anchor_text: String,
        context: LinkContext,
        origin: LinkOrigin,
    ) -> InternalLink {
        InternalLink {
            target_id: target.id.clone(),
            target_url: target.url.clone(),
            anchor_text,
            context,
            origin,
        }
    }
}

/// Build a graph with a single orphan-repair pass
pub fn build_link_graph(
    pages: &[PageDescriptor],
    site: &SiteContext,
    density_target: usize,
) -> Result<LinkGraph, OptimizeError> {
    LinkGraphBuilder::new(site)
        .with_density_target(density_target)
        .build(pages)
}

/// Outbound links of one page, deduplicated by target as they are added
struct Outbound {
    source: usize,
    links: Vec<InternalLink>,
    targets: HashSet<usize>,
}

impl Outbound {
    fn new(source: usize) -> Self {
        Self {
            source,
            links: Vec::new(),
            targets: HashSet::new(),
        }
    }

    fn len(&self) -> usize {
        self.links.len()
    }

    /// Add a link unless it points back at the source or repeats a target
    fn push(&mut self, target: usize, link: InternalLink) -> bool {
        if target == self.source || !self.targets.insert(target) {
            return false;
        }
        self.links.push(link);
        true
    }
}

fn is_contextual(source: &PageDescriptor, target: &PageDescriptor) -> bool {
    let keyword_match = match (source.primary_keyword(), target.primary_keyword()) {
        (Some(source_kw), Some(target_kw)) => utils::contains_ignore_case(source_kw, target_kw),
        _ => false,
    };
    keyword_match || tables::is_natural_pair(source.page_type, target.page_type)
}

fn find_orphans(pages: &[PageDescriptor], outbound: &[Outbound]) -> Vec<usize> {
    let targeted: HashSet<usize> = outbound
        .iter()
        .flat_map(|links| links.targets.iter().copied())
        .collect();

    (0..pages.len())
        .filter(|&i| !pages[i].page_type.is_orphan_exempt() && !targeted.contains(&i))
        .collect()
}

/// Preferred-type page with the fewest outbound links; homepage if no preferred type exists.
/// Ties go to the earlier page.
fn best_linker(
    pages: &[PageDescriptor],
    outbound: &[Outbound],
    orphan_idx: usize,
) -> Option<usize> {
    let preferred = tables::preferred_linkers(pages[orphan_idx].page_type);

    let fewest_links = |eligible: &dyn Fn(&PageDescriptor) -> bool| -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, page) in pages.iter().enumerate() {
            if i == orphan_idx || !eligible(page) {
                continue;
            }
            match best {
                Some(b) if outbound[b].len() <= outbound[i].len() => {}
                _ => best = Some(i),
            }
        }
        best
    };

    fewest_links(&|page| preferred.contains(&page.page_type))
        .or_else(|| fewest_links(&|page| page.page_type == PageType::Homepage))
}
