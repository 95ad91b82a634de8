//! Per-page collaborators.
//!
//! The pipeline only depends on these traits. The default implementations
//! cover metadata, headings, breadcrumbs, scoring, sitemap and robots, and any
//! of them can be swapped through [`Collaborators`].

pub mod breadcrumbs;
pub mod headings;
pub mod meta;
pub mod sitemap;

pub use breadcrumbs::PathBreadcrumbs;
pub use headings::EditorialHeadings;
pub use meta::TemplateMeta;
pub use sitemap::{StandardRobots, TieredSitemap};

use crate::pages::{EditorialContent, PageDescriptor, SiteContext};
use crate::results::{Breadcrumb, HeadingStructure, PageMeta, SitemapEntry};
use crate::seo::{Issue, IssueWeightScorer, PageFacts};
use std::sync::Arc;

/// Produces the head metadata of a page
pub trait MetaGenerator: Send + Sync {
    fn generate(&self, page: &PageDescriptor, site: &SiteContext) -> PageMeta;
}

/// Produces the heading outline of a page
pub trait HeadingGenerator: Send + Sync {
    fn generate(
        &self,
        page: &PageDescriptor,
        editorial: Option<&EditorialContent>,
    ) -> HeadingStructure;
}

/// Produces the breadcrumb trail of a page
pub trait BreadcrumbGenerator: Send + Sync {
    fn generate(
        &self,
        page: &PageDescriptor,
        pages: &[PageDescriptor],
        site: &SiteContext,
    ) -> Vec<Breadcrumb>;
}

/// Turns a page's facts and issues into a 0..=100 score
pub trait PageScorer: Send + Sync {
    fn score(&self, facts: &PageFacts<'_>, issues: &[Issue]) -> f64;
}

/// Lists the indexable pages of a site
pub trait SitemapGenerator: Send + Sync {
    fn generate(&self, pages: &[PageDescriptor], site: &SiteContext) -> Vec<SitemapEntry>;
}

/// Renders robots.txt
pub trait RobotsGenerator: Send + Sync {
    fn generate(&self, site: &SiteContext) -> String;
}

/// The full set of collaborators used by a run
#[derive(Clone)]
pub struct Collaborators {
    pub meta: Arc<dyn MetaGenerator>,
    pub headings: Arc<dyn HeadingGenerator>,
    pub breadcrumbs: Arc<dyn BreadcrumbGenerator>,
    pub scorer: Arc<dyn PageScorer>,
    pub sitemap: Arc<dyn SitemapGenerator>,
    pub robots: Arc<dyn RobotsGenerator>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            meta: Arc::new(TemplateMeta),
            headings: Arc::new(EditorialHeadings),
            breadcrumbs: Arc::new(PathBreadcrumbs),
            scorer: Arc::new(IssueWeightScorer::default()),
            sitemap: Arc::new(TieredSitemap),
            robots: Arc::new(StandardRobots),
        }
    }
}

impl Collaborators {
    pub fn with_meta(mut self, meta: impl MetaGenerator + 'static) -> Self {
        self.meta = Arc::new(meta);
        self
    }

    pub fn with_headings(mut self, headings: impl HeadingGenerator + 'static) -> Self {
        self.headings = Arc::new(headings);
        self
    }

    pub fn with_breadcrumbs(mut self, breadcrumbs: impl BreadcrumbGenerator + 'static) -> Self {
        self.breadcrumbs = Arc::new(breadcrumbs);
        self
    }

    pub fn with_scorer(mut self, scorer: impl PageScorer + 'static) -> Self {
        self.scorer = Arc::new(scorer);
        self
    }

    pub fn with_sitemap(mut self, sitemap: impl SitemapGenerator + 'static) -> Self {
        self.sitemap = Arc::new(sitemap);
        self
    }

    pub fn with_robots(mut self, robots: impl RobotsGenerator + 'static) -> Self {
        self.robots = Arc::new(robots);
        self
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
