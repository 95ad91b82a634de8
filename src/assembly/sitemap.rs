use super::{RobotsGenerator, SitemapGenerator};
use crate::pages::{PageDescriptor, PageType, PriorityTier, SiteContext};
use crate::results::SitemapEntry;

/// Change frequency advertised for a page type
pub fn change_frequency(page_type: PageType) -> &'static str {
    match page_type {
        PageType::Homepage => "daily",
        PageType::ProviderListing | PageType::Comparison | PageType::ProviderProfile => "weekly",
        PageType::Legal | PageType::Privacy | PageType::Terms => "yearly",
        _ => "monthly",
    }
}

/// Tier used when the descriptor does not set one
pub fn default_tier(page_type: PageType) -> PriorityTier {
    match page_type {
        PageType::Homepage
        | PageType::ServiceHub
        | PageType::ServicePage
        | PageType::CityServicePage
        | PageType::ProviderListing
        | PageType::Comparison => PriorityTier::High,
        PageType::About
        | PageType::Methodology
        | PageType::Contact
        | PageType::Legal
        | PageType::Privacy
        | PageType::Terms => PriorityTier::Low,
        _ => PriorityTier::Medium,
    }
}

pub fn tier_priority(tier: PriorityTier) -> f64 {
    match tier {
        PriorityTier::High => 0.8,
        PriorityTier::Medium => 0.6,
        PriorityTier::Low => 0.4,
    }
}

/// One entry per indexable page, prioritized by tier
#[derive(Debug, Clone, Copy, Default)]
pub struct TieredSitemap;

impl SitemapGenerator for TieredSitemap {
    fn generate(&self, pages: &[PageDescriptor], site: &SiteContext) -> Vec<SitemapEntry> {
        pages
            .iter()
            .filter(|page| !page.noindex)
            .map(|page| {
                let priority = if page.page_type == PageType::Homepage {
                    1.0
                } else {
                    tier_priority(page.priority.unwrap_or_else(|| default_tier(page.page_type)))
                };
                SitemapEntry {
                    url: site.absolute_url(&page.url),
                    last_modified: site.generated_at.clone(),
                    change_frequency: change_frequency(page.page_type).to_string(),
                    priority,
                }
            })
            .collect()
    }
}

/// Allow everything except the API and admin areas, and point at the sitemap
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRobots;

impl RobotsGenerator for StandardRobots {
    fn generate(&self, site: &SiteContext) -> String {
        format!(
            "User-agent: *\nAllow: /\nDisallow: /api/\nDisallow: /admin/\n\nSitemap: {}\n",
            site.absolute_url("/sitemap.xml")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::Blueprint;

    fn site() -> SiteContext {
        let blueprint: Blueprint = serde_json::from_str(
            r#"{"brandName": "Acme", "baseUrl": "https://acme.test/",
                "generatedAt": "2024-05-01", "pages": []}"#,
        )
        .unwrap();
        SiteContext::from_blueprint(&blueprint).unwrap()
    }

    #[test]
    fn test_sitemap_skips_noindex_and_applies_tiers() {
        let mut terms = PageDescriptor::new("terms", "/terms", PageType::Terms);
        terms.noindex = true;
        let mut guide = PageDescriptor::new("guide", "/guides/drains", PageType::DiyGuide);
        guide.priority = Some(PriorityTier::High);
        let pages = vec![
            PageDescriptor::new("home", "/", PageType::Homepage),
            PageDescriptor::new("about", "/about", PageType::About),
            guide,
            terms,
        ];

        let entries = TieredSitemap.generate(&pages, &site());
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0].url, "https://acme.test/");
        assert_eq!(entries[0].priority, 1.0);
        assert_eq!(entries[0].change_frequency, "daily");
        assert_eq!(entries[0].last_modified, "2024-05-01");

        assert_eq!(entries[1].priority, 0.4);
        assert_eq!(entries[2].priority, 0.8);
        assert_eq!(entries[2].change_frequency, "monthly");
    }

    #[test]
    fn test_robots() {
        let robots = StandardRobots.generate(&site());
        assert!(robots.starts_with("User-agent: *\nAllow: /\n"));
        assert!(robots.contains("Disallow: /api/\nDisallow: /admin/\n"));
        assert!(robots.contains("Sitemap: https://acme.test/sitemap.xml"));
    }
}
