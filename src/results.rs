use crate::graph::InternalLink;
use crate::pages::{EditorialContent, PageType, Provider};
use crate::schema::SchemaRecord;
use crate::seo::{Issue, Severity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One step in a breadcrumb trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub name: String,

    /// Absolute URL of the crumb
    pub url: String,
}

/// Head metadata for a page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    pub canonical: Option<String>,
    pub robots: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_keyword: Option<String>,
}

/// Heading outline of a page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadingStructure {
    pub h1: Option<String>,

    #[serde(default)]
    pub h2: Vec<String>,

    #[serde(default)]
    pub h3: Vec<String>,
}

/// A fully assembled page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedPage {
    pub id: String,
    pub url: String,

    #[serde(rename = "type")]
    pub page_type: PageType,

    pub meta: PageMeta,
    pub schema: Vec<SchemaRecord>,
    pub headings: HeadingStructure,
    pub internal_links: Vec<InternalLink>,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub content: serde_json::Value,
    pub score: f64,
    pub issues: Vec<Issue>,
    pub suggestions: Vec<String>,
}

/// One sitemap entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: String,
    pub change_frequency: String,
    pub priority: f64,
}

/// Site-wide outputs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteArtifacts {
    pub schema: Vec<SchemaRecord>,
    pub sitemap: Vec<SitemapEntry>,
    pub robots: String,
}

/// Package-level cross-check, computed from the assembled pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageValidation {
    pub valid: bool,
    pub title_coverage: bool,
    pub description_coverage: bool,
    pub canonical_coverage: bool,
    pub schema_coverage: bool,

    /// Percentage of pages targeted by at least one internal link
    pub internal_link_coverage: f64,

    pub orphan_pages: Vec<String>,
    pub schema_errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Issue totals by severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueCounts {
    pub error: usize,
    pub warning: usize,
    pub info: usize,
}

impl IssueCounts {
    pub fn from_issues<'a>(issues: impl IntoIterator<Item = &'a Issue>) -> Self {
        let mut counts = Self::default();
        for issue in issues {
            match issue.severity {
                Severity::Error => counts.error += 1,
                Severity::Warning => counts.warning += 1,
                Severity::Info => counts.info += 1,
            }
        }
        counts
    }
}

/// Aggregate numbers for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageStats {
    pub total_pages: usize,
    pub total_internal_links: usize,
    pub average_links_per_page: f64,
    pub total_schema_records: usize,
    pub invalid_schema_records: usize,
    pub average_score: f64,
    pub pages_by_type: BTreeMap<PageType, usize>,
    pub issues_by_severity: IssueCounts,
    pub orphans_repaired: usize,
    pub unresolved_required_links: usize,
}

/// Upstream enrichment inputs, passed through untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Enrichments {
    pub editorial: BTreeMap<String, EditorialContent>,
    pub comparisons: BTreeMap<String, serde_json::Value>,
    pub providers: BTreeMap<String, Provider>,
}

/// The final output of a run. Never mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizedPackage {
    pub pages: Vec<OptimizedPage>,
    pub site: SiteArtifacts,
    pub validation: PackageValidation,
    pub stats: PackageStats,
    pub enrichments: Enrichments,
}

impl OptimizedPackage {
    /// Look up a page by id
    pub fn page(&self, id: &str) -> Option<&OptimizedPage> {
        self.pages.iter().find(|page| page.id == id)
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
