//! Static lookup tables consumed by the link graph builder.
//!
//! Everything here is plain data keyed by [`PageType`] so it can be checked
//! on its own, independent of the graph algorithm.

use crate::pages::PageType;

/// Maximum number of keyword/relationship edges added per page
pub const CONTEXTUAL_LINK_CAP: usize = 5;

/// Floor for page types without a dedicated minimum
pub const DEFAULT_MIN_LINKS: usize = 5;

/// Minimum outbound links a page of the given type should carry
pub fn min_links(page_type: PageType) -> usize {
    match page_type {
        PageType::Homepage => 12,
        PageType::ServiceHub => 10,
        PageType::ServicePage | PageType::CityServicePage | PageType::ProviderListing => 8,
        PageType::Comparison
        | PageType::CostGuide
        | PageType::Troubleshooting
        | PageType::BuyingGuide
        | PageType::DiyGuide
        | PageType::Guide
        | PageType::LocalExpertise => 6,
        PageType::About | PageType::Methodology => 3,
        PageType::Contact => 2,
        PageType::Legal | PageType::Privacy | PageType::Terms => 1,
        _ => DEFAULT_MIN_LINKS,
    }
}

/// Page types a page naturally links to, in the order edges are considered
pub fn natural_targets(source: PageType) -> &'static [PageType] {
    use PageType::*;
    match source {
        Homepage => &[ServiceHub, About, ProviderListing, Comparison, Contact],
        ServiceHub => &[ServicePage, CityServicePage, CostGuide, Comparison, BuyingGuide],
        ServicePage => &[CostGuide, Troubleshooting, ProviderListing, ServiceHub, DiyGuide],
        CityServicePage => &[ServicePage, ProviderListing, LocalExpertise, CostGuide],
        ProviderProfile => &[ProviderListing, Comparison, ServicePage],
        ProviderListing => &[ProviderProfile, Comparison, CityServicePage],
        Comparison => &[ProviderProfile, ProviderListing, BuyingGuide, Methodology],
        CostGuide => &[ServicePage, BuyingGuide, Comparison],
        Troubleshooting => &[ServicePage, DiyGuide, ProviderListing],
        BuyingGuide => &[Comparison, CostGuide, Guide],
        DiyGuide => &[Troubleshooting, ServicePage, Guide],
        LocalExpertise => &[CityServicePage, ProviderListing, About],
        About => &[Methodology, Contact],
        Methodology => &[Comparison, About],
        Guide => &[Article, BuyingGuide, ServicePage],
        Article => &[Guide, ServicePage],
        Contact | Legal | Privacy | Terms => &[],
    }
}

/// Whether `(source, target)` is a natural relationship pair
pub fn is_natural_pair(source: PageType, target: PageType) -> bool {
    natural_targets(source).contains(&target)
}

/// Order in which density-fill candidates are taken
pub const DENSITY_PRIORITY: [PageType; 20] = [
    PageType::Homepage,
    PageType::ServiceHub,
    PageType::Comparison,
    PageType::CostGuide,
    PageType::BuyingGuide,
    PageType::DiyGuide,
    PageType::Guide,
    PageType::Troubleshooting,
    PageType::ProviderProfile,
    PageType::ProviderListing,
    PageType::About,
    PageType::Methodology,
    PageType::ServicePage,
    PageType::CityServicePage,
    PageType::LocalExpertise,
    PageType::Article,
    PageType::Contact,
    PageType::Legal,
    PageType::Privacy,
    PageType::Terms,
];

/// Position of a page type in [`DENSITY_PRIORITY`]
pub fn density_rank(page_type: PageType) -> usize {
    DENSITY_PRIORITY
        .iter()
        .position(|t| *t == page_type)
        .unwrap_or(DENSITY_PRIORITY.len())
}

/// Source types preferred when repairing an orphan of the given type.
///
/// An empty slice means only the homepage fallback applies.
pub fn preferred_linkers(orphan: PageType) -> &'static [PageType] {
    use PageType::*;
    match orphan {
        ServiceHub => &[Homepage],
        ServicePage => &[ServiceHub, CityServicePage],
        CityServicePage => &[ServicePage, ServiceHub, LocalExpertise],
        ProviderProfile => &[ProviderListing, Comparison, CityServicePage],
        ProviderListing => &[ServiceHub, CityServicePage],
        Comparison => &[ServiceHub, ProviderListing, BuyingGuide],
        CostGuide => &[ServiceHub, ServicePage, Comparison],
        Troubleshooting => &[ServicePage, DiyGuide],
        BuyingGuide => &[Comparison, CostGuide, ServiceHub],
        DiyGuide => &[Troubleshooting, ServicePage],
        LocalExpertise => &[CityServicePage, About],
        About => &[Homepage],
        Methodology => &[Comparison, About],
        Guide => &[ServiceHub, BuyingGuide],
        Article => &[Guide, ServiceHub],
        Homepage | Contact | Legal | Privacy | Terms => &[],
    }
}

/// Anchor phrase used when no pattern or keyword is available for a target
pub fn fallback_anchor(target: PageType) -> &'static str {
    match target {
        PageType::Homepage => "{brand}",
        PageType::ServiceHub => "{category} services",
        PageType::ServicePage => "{category} services in {city}",
        PageType::CityServicePage => "{category} in {city}",
        PageType::ProviderProfile => "{category} pro profile",
        PageType::ProviderListing => "top {category} pros in {city}",
        PageType::Comparison => "compare {category} companies",
        PageType::CostGuide => "{category} cost guide",
        PageType::Troubleshooting => "{category} troubleshooting tips",
        PageType::BuyingGuide => "{category} buying guide",
        PageType::DiyGuide => "DIY {category} guide",
        PageType::LocalExpertise => "{category} insights for {city}",
        PageType::About => "about {brand}",
        PageType::Methodology => "how we rate {category} pros",
        PageType::Contact => "contact {brand}",
        PageType::Legal => "legal information",
        PageType::Privacy => "privacy policy",
        PageType::Terms => "terms of service",
        PageType::Guide => "{category} guide",
        PageType::Article => "more about {category}",
    }
}
