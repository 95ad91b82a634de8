use crate::error::OptimizeError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use url::Url;

/// Closed set of page kinds a blueprint can describe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    Homepage,
    ServiceHub,
    ServicePage,
    CityServicePage,
    ProviderProfile,
    ProviderListing,
    Comparison,
    CostGuide,
    Troubleshooting,
    BuyingGuide,
    DiyGuide,
    LocalExpertise,
    About,
    Methodology,
    Contact,
    Legal,
    Privacy,
    Terms,
    Guide,
    Article,
}

impl PageType {
    pub const ALL: [PageType; 20] = [
        PageType::Homepage,
        PageType::ServiceHub,
        PageType::ServicePage,
        PageType::CityServicePage,
        PageType::ProviderProfile,
        PageType::ProviderListing,
        PageType::Comparison,
        PageType::CostGuide,
        PageType::Troubleshooting,
        PageType::BuyingGuide,
        PageType::DiyGuide,
        PageType::LocalExpertise,
        PageType::About,
        PageType::Methodology,
        PageType::Contact,
        PageType::Legal,
        PageType::Privacy,
        PageType::Terms,
        PageType::Guide,
        PageType::Article,
    ];

    /// Wire tag of the page type
    pub fn as_str(&self) -> &'static str {
        match self {
            PageType::Homepage => "homepage",
            PageType::ServiceHub => "service_hub",
            PageType::ServicePage => "service_page",
            PageType::CityServicePage => "city_service_page",
            PageType::ProviderProfile => "provider_profile",
            PageType::ProviderListing => "provider_listing",
            PageType::Comparison => "comparison",
            PageType::CostGuide => "cost_guide",
            PageType::Troubleshooting => "troubleshooting",
            PageType::BuyingGuide => "buying_guide",
            PageType::DiyGuide => "diy_guide",
            PageType::LocalExpertise => "local_expertise",
            PageType::About => "about",
            PageType::Methodology => "methodology",
            PageType::Contact => "contact",
            PageType::Legal => "legal",
            PageType::Privacy => "privacy",
            PageType::Terms => "terms",
            PageType::Guide => "guide",
            PageType::Article => "article",
        }
    }

    /// Pages that never count as orphans
    pub fn is_orphan_exempt(&self) -> bool {
        matches!(
            self,
            PageType::Homepage
                | PageType::Legal
                | PageType::Privacy
                | PageType::Terms
                | PageType::Contact
        )
    }

    /// Editorial pages that carry Article markup
    pub fn is_article_like(&self) -> bool {
        matches!(
            self,
            PageType::CostGuide
                | PageType::Troubleshooting
                | PageType::BuyingGuide
                | PageType::DiyGuide
                | PageType::Guide
                | PageType::Article
                | PageType::LocalExpertise
                | PageType::Methodology
        )
    }

    /// Pages whose title is expected to name the city
    pub fn is_location_bearing(&self) -> bool {
        matches!(
            self,
            PageType::Homepage
                | PageType::ServicePage
                | PageType::CityServicePage
                | PageType::ProviderListing
                | PageType::LocalExpertise
        )
    }
}

impl std::fmt::Display for PageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional SEO hints attached to a page descriptor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoHints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_template: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_template: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_keyword: Option<String>,
}

/// An outbound link the blueprint insists on
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredLink {
    pub target_id: String,

    /// Anchor text with `{city}`, `{category}`, `{keyword}` or `{brand}` placeholders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_pattern: Option<String>,
}

/// Sitemap priority tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    High,
    Medium,
    Low,
}

/// One page of the target site, as described by the blueprint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDescriptor {
    pub id: String,

    /// Site-relative path, e.g. `/plumbing/drain-cleaning`
    pub url: String,

    #[serde(rename = "type")]
    pub page_type: PageType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<SeoHints>,

    #[serde(default)]
    pub required_links: Vec<RequiredLink>,

    /// Provider featured on this page (profiles, city pages)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,

    /// Providers listed on comparison and listing pages
    #[serde(default)]
    pub provider_ids: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<PriorityTier>,

    #[serde(default)]
    pub noindex: bool,

    #[serde(default)]
    pub content: serde_json::Value,
}

impl PageDescriptor {
    /// Create a bare descriptor with no hints or links
    pub fn new(id: &str, url: &str, page_type: PageType) -> Self {
        Self {
            id: id.to_string(),
            url: url.to_string(),
            page_type,
            seo: None,
            required_links: Vec::new(),
            provider_id: None,
            provider_ids: Vec::new(),
            priority: None,
            noindex: false,
            content: serde_json::Value::Null,
        }
    }

    /// Set the primary keyword hint
    pub fn with_keyword(mut self, keyword: &str) -> Self {
        self.seo.get_or_insert_with(SeoHints::default).primary_keyword = Some(keyword.to_string());
        self
    }

    /// Add a required outbound link
    pub fn with_required_link(mut self, target_id: &str, anchor_pattern: Option<&str>) -> Self {
        self.required_links.push(RequiredLink {
            target_id: target_id.to_string(),
            anchor_pattern: anchor_pattern.map(str::to_string),
        });
        self
    }

    /// Primary keyword, if one is set and non-blank
    pub fn primary_keyword(&self) -> Option<&str> {
        self.seo
            .as_ref()
            .and_then(|s| s.primary_keyword.as_deref())
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// A business listed on the site
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[serde(default)]
    pub review_count: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,

    #[serde(default)]
    pub body: String,
}

/// Editorial content produced upstream for one page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorialContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h1: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,

    /// Rendered body markup, if the content stage produced one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    #[serde(default)]
    pub sections: Vec<Section>,

    #[serde(default)]
    pub faqs: Vec<Faq>,
}

fn default_generated_at() -> String {
    "1970-01-01".to_string()
}

/// The generated site plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blueprint {
    pub brand_name: String,
    pub base_url: String,

    #[serde(default)]
    pub city: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default)]
    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Date stamped into sitemap entries
    #[serde(default = "default_generated_at")]
    pub generated_at: String,

    pub pages: Vec<PageDescriptor>,

    #[serde(default)]
    pub providers: Vec<Provider>,
}

/// Everything a run consumes: the blueprint plus optional enrichments
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteInput {
    pub blueprint: Blueprint,

    #[serde(default)]
    pub editorial: BTreeMap<String, EditorialContent>,

    #[serde(default)]
    pub comparisons: BTreeMap<String, serde_json::Value>,

    #[serde(default)]
    pub providers: BTreeMap<String, Provider>,
}

impl SiteInput {
    /// Wrap a blueprint with no enrichments
    pub fn new(blueprint: Blueprint) -> Self {
        Self {
            blueprint,
            editorial: BTreeMap::new(),
            comparisons: BTreeMap::new(),
            providers: BTreeMap::new(),
        }
    }

    /// Load input from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, OptimizeError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load input from a JSON string
    pub fn from_json(json: &str) -> Result<Self, OptimizeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Provider records by id; keyed enrichment records win over blueprint ones
    pub fn provider_index(&self) -> BTreeMap<String, Provider> {
        let mut index: BTreeMap<String, Provider> = self
            .blueprint
            .providers
            .iter()
            .map(|p| (p.id.clone(), p.clone()))
            .collect();
        for (id, provider) in &self.providers {
            index.insert(id.clone(), provider.clone());
        }
        index
    }
}

/// Site-wide facts shared by every stage of a run
#[derive(Debug, Clone)]
pub struct SiteContext {
    pub brand_name: String,
    pub base_url: Url,
    pub city: String,
    pub state: Option<String>,
    pub category: String,
    pub phone: Option<String>,
    pub generated_at: String,
}

impl SiteContext {
    /// Derive the context from a blueprint
    pub fn from_blueprint(blueprint: &Blueprint) -> Result<Self, OptimizeError> {
        let base_url =
            Url::parse(&blueprint.base_url).map_err(|source| OptimizeError::InvalidBaseUrl {
                url: blueprint.base_url.clone(),
                source,
            })?;

        Ok(Self {
            brand_name: blueprint.brand_name.clone(),
            base_url,
            city: blueprint.city.clone(),
            state: blueprint.state.clone(),
            category: blueprint.category.clone(),
            phone: blueprint.phone.clone(),
            generated_at: blueprint.generated_at.clone(),
        })
    }

    /// Absolute URL for a site-relative path
    pub fn absolute_url(&self, path: &str) -> String {
        crate::utils::join_url(&self.base_url, path)
    }
}

/// Reject page lists that cannot produce a package
pub fn check_pages(pages: &[PageDescriptor]) -> Result<(), OptimizeError> {
    if pages.is_empty() {
        return Err(OptimizeError::EmptyPageList);
    }

    let mut seen = HashSet::with_capacity(pages.len());
    for (index, page) in pages.iter().enumerate() {
        if page.id.trim().is_empty() {
            return Err(OptimizeError::BlankPageId { index });
        }
        if !seen.insert(page.id.as_str()) {
            return Err(OptimizeError::DuplicatePageId {
                id: page.id.clone(),
            });
        }
    }

    Ok(())
}
