pub mod builder;
pub mod tables;

pub use builder::{LinkGraphBuilder, build_link_graph};

use crate::pages::PageDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Where on the page a link is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkContext {
    Body,
    Sidebar,
}

/// Which construction step produced a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkOrigin {
    Required,
    Contextual,
    Density,
    Repair,
}

/// One outbound link; the source is implied by its position in the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalLink {
    pub target_id: String,
    pub target_url: String,
    pub anchor_text: String,
    pub context: LinkContext,
    pub origin: LinkOrigin,
}

/// A required link whose target id does not exist in the blueprint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnresolvedLink {
    pub source_id: String,
    pub target_id: String,
}

/// Bookkeeping gathered while building a graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildReport {
    pub required_links: usize,
    pub contextual_links: usize,
    pub density_links: usize,
    pub repair_links: usize,
    pub repair_passes: usize,

    /// Orphans that received an inbound link during repair, in repair order
    pub repaired_orphans: Vec<String>,

    /// Orphans left after repair because no eligible linker exists
    pub remaining_orphans: Vec<String>,

    pub unresolved_required: Vec<UnresolvedLink>,
}

/// The internal link structure for a whole site. Immutable once built.
#[derive(Debug, Clone)]
pub struct LinkGraph {
    order: Vec<String>,
    links: HashMap<String, Vec<InternalLink>>,
    report: BuildReport,
}

impl LinkGraph {
    pub(crate) fn new(
        order: Vec<String>,
        links: HashMap<String, Vec<InternalLink>>,
        report: BuildReport,
    ) -> Self {
        Self {
            order,
            links,
            report,
        }
    }

    /// Outbound links of a page, in insertion order
    pub fn links_for(&self, page_id: &str) -> &[InternalLink] {
        self.links.get(page_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Pages and their outbound links in blueprint order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[InternalLink])> {
        self.order
            .iter()
            .map(move |id| (id.as_str(), self.links_for(id)))
    }

    pub fn page_count(&self) -> usize {
        self.order.len()
    }

    pub fn total_links(&self) -> usize {
        self.links.values().map(Vec::len).sum()
    }

    /// Number of links pointing at each page; pages without inbound links are absent
    pub fn inbound_counts(&self) -> HashMap<&str, usize> {
        let mut counts = HashMap::new();
        for links in self.links.values() {
            for link in links {
                *counts.entry(link.target_id.as_str()).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Non-exempt pages that no link targets, in blueprint order
    pub fn orphans(&self, pages: &[PageDescriptor]) -> Vec<String> {
        let targeted: HashSet<&str> = self
            .links
            .values()
            .flatten()
            .map(|link| link.target_id.as_str())
            .collect();

        pages
            .iter()
            .filter(|page| !page.page_type.is_orphan_exempt())
            .filter(|page| !targeted.contains(page.id.as_str()))
            .map(|page| page.id.clone())
            .collect()
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }
}
