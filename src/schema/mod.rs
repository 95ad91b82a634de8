//! Structured-data (schema.org JSON-LD) records for pages and the site.

pub mod validate;

pub use validate::validate_schema;

use crate::pages::{Faq, PageDescriptor, PageType, Provider, SiteContext};
use crate::results::Breadcrumb;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

pub const SCHEMA_CONTEXT: &str = "https://schema.org";

/// Keyword fragments mapped to the business type they imply, checked in order
const BUSINESS_TYPES: &[(&str, &str)] = &[
    ("plumb", "Plumber"),
    ("electric", "Electrician"),
    ("hvac", "HVACBusiness"),
    ("heating", "HVACBusiness"),
    ("air condition", "HVACBusiness"),
    ("roof", "RoofingContractor"),
    ("locksmith", "Locksmith"),
    ("moving", "MovingCompany"),
    ("movers", "MovingCompany"),
    ("paint", "HousePainter"),
    ("dentist", "Dentist"),
    ("dental", "Dentist"),
    ("mechanic", "AutoRepair"),
    ("auto repair", "AutoRepair"),
    ("lawyer", "Attorney"),
    ("attorney", "Attorney"),
    ("cleaning", "HousekeepingService"),
    ("contractor", "GeneralContractor"),
    ("remodel", "GeneralContractor"),
];

pub const DEFAULT_BUSINESS_TYPE: &str = "LocalBusiness";

/// One structured-data object attached to a page or the site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaRecord {
    #[serde(rename = "type")]
    pub schema_type: String,

    pub data: Value,

    pub valid: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl SchemaRecord {
    /// Wrap a payload; records start out valid until validated
    pub fn new(schema_type: &str, data: Value) -> Self {
        Self {
            schema_type: schema_type.to_string(),
            data,
            valid: true,
            errors: None,
        }
    }
}

/// Everything the generator needs to know about one page
#[derive(Debug, Clone, Copy)]
pub struct PageSchemaInput<'a> {
    pub page: &'a PageDescriptor,
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub provider: Option<&'a Provider>,
    pub listed_providers: &'a [Provider],
    pub faqs: &'a [Faq],
    pub breadcrumbs: &'a [Breadcrumb],
}

/// Schema.org business type for a category/keyword, `LocalBusiness` if nothing matches
pub fn business_type(category: &str, keyword: Option<&str>) -> &'static str {
    let text = format!("{} {}", category, keyword.unwrap_or("")).to_lowercase();
    BUSINESS_TYPES
        .iter()
        .find(|(fragment, _)| text.contains(fragment))
        .map(|(_, schema_type)| *schema_type)
        .unwrap_or(DEFAULT_BUSINESS_TYPE)
}

/// Whether a type belongs to the LocalBusiness family this crate emits
pub fn is_local_business_type(schema_type: &str) -> bool {
    schema_type == DEFAULT_BUSINESS_TYPE
        || BUSINESS_TYPES
            .iter()
            .any(|(_, business)| *business == schema_type)
}

/// Providers ordered best first: rating, then review count, then input order
pub fn rank_providers(providers: &[Provider]) -> Vec<&Provider> {
    let mut ranked: Vec<&Provider> = providers.iter().collect();
    ranked.sort_by(|a, b| {
        b.rating
            .unwrap_or(0.0)
            .total_cmp(&a.rating.unwrap_or(0.0))
            .then(b.review_count.cmp(&a.review_count))
    });
    ranked
}

/// Per-page schema records. A BreadcrumbList is always present.
pub fn generate_schema(input: &PageSchemaInput<'_>, site: &SiteContext) -> Vec<SchemaRecord> {
    let page = input.page;
    let page_url = site.absolute_url(&page.url);
    let business = business_type(&site.category, page.primary_keyword());
    let mut records = vec![breadcrumb_list(input.breadcrumbs)];

    if let Some(provider) = input.provider {
        records.push(provider_entity(provider, business, site));
        if provider.review_count > 0 {
            records.push(aggregate_rating(provider, business));
        }
    } else if matches!(
        page.page_type,
        PageType::Homepage
            | PageType::ServiceHub
            | PageType::ServicePage
            | PageType::CityServicePage
            | PageType::Contact
    ) {
        records.push(brand_entity(business, &page_url, site));
    }

    if page.page_type.is_article_like() {
        records.push(article(input, &page_url, site));
    }

    if !input.faqs.is_empty() {
        records.push(faq_page(input.faqs));
    }

    if page.page_type == PageType::Comparison && !input.listed_providers.is_empty() {
        records.push(item_list(input, business));
    }

    ::log::trace!("Generated {} schema records for {}", records.len(), page.id);
    records
}

/// Site-wide Organization and WebSite records
pub fn generate_site_schema(site: &SiteContext) -> Vec<SchemaRecord> {
    let home = site.absolute_url("/");

    let mut organization = Map::new();
    organization.insert("@context".into(), json!(SCHEMA_CONTEXT));
    organization.insert("@type".into(), json!("Organization"));
    organization.insert("name".into(), json!(site.brand_name));
    organization.insert("url".into(), json!(home));
    if let Some(phone) = &site.phone {
        organization.insert("telephone".into(), json!(phone));
    }

    let website = json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "WebSite",
        "name": site.brand_name,
        "url": home,
        "potentialAction": {
            "@type": "SearchAction",
            "target": format!("{}?q={{search_term_string}}", site.absolute_url("/search")),
            "query-input": "required name=search_term_string",
        },
    });

    vec![
        SchemaRecord::new("Organization", Value::Object(organization)),
        SchemaRecord::new("WebSite", website),
    ]
}

fn breadcrumb_list(breadcrumbs: &[Breadcrumb]) -> SchemaRecord {
    let items: Vec<Value> = breadcrumbs
        .iter()
        .enumerate()
        .map(|(i, crumb)| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "name": crumb.name,
                "item": crumb.url,
            })
        })
        .collect();

    SchemaRecord::new(
        "BreadcrumbList",
        json!({
            "@context": SCHEMA_CONTEXT,
            "@type": "BreadcrumbList",
            "itemListElement": items,
        }),
    )
}

fn postal_address(street: Option<&str>, site: &SiteContext) -> Value {
    let mut address = Map::new();
    address.insert("@type".into(), json!("PostalAddress"));
    if let Some(street) = street {
        address.insert("streetAddress".into(), json!(street));
    }
    address.insert("addressLocality".into(), json!(site.city));
    if let Some(state) = &site.state {
        address.insert("addressRegion".into(), json!(state));
    }
    Value::Object(address)
}

fn provider_entity(provider: &Provider, business: &str, site: &SiteContext) -> SchemaRecord {
    let mut data = Map::new();
    data.insert("@context".into(), json!(SCHEMA_CONTEXT));
    data.insert("@type".into(), json!(business));
    data.insert("name".into(), json!(provider.name));
    if let Some(url) = &provider.url {
        data.insert("url".into(), json!(url));
    }
    if let Some(phone) = &provider.phone {
        data.insert("telephone".into(), json!(phone));
    }
    data.insert(
        "address".into(),
        postal_address(provider.address.as_deref(), site),
    );
    data.insert("areaServed".into(), json!(site.city));

    SchemaRecord::new(business, Value::Object(data))
}

fn brand_entity(business: &str, page_url: &str, site: &SiteContext) -> SchemaRecord {
    let mut data = Map::new();
    data.insert("@context".into(), json!(SCHEMA_CONTEXT));
    data.insert("@type".into(), json!(business));
    data.insert("name".into(), json!(site.brand_name));
    data.insert("url".into(), json!(page_url));
    if let Some(phone) = &site.phone {
        data.insert("telephone".into(), json!(phone));
    }
    data.insert("address".into(), postal_address(None, site));
    data.insert("areaServed".into(), json!(site.city));

    SchemaRecord::new(business, Value::Object(data))
}

fn aggregate_rating(provider: &Provider, business: &str) -> SchemaRecord {
    let mut data = Map::new();
    data.insert("@context".into(), json!(SCHEMA_CONTEXT));
    data.insert("@type".into(), json!("AggregateRating"));
    data.insert(
        "itemReviewed".into(),
        json!({"@type": business, "name": provider.name}),
    );
    if let Some(rating) = provider.rating {
        data.insert("ratingValue".into(), json!(rating));
    }
    data.insert("reviewCount".into(), json!(provider.review_count));
    data.insert("bestRating".into(), json!(5));
    data.insert("worstRating".into(), json!(1));

    SchemaRecord::new("AggregateRating", Value::Object(data))
}

fn article(input: &PageSchemaInput<'_>, page_url: &str, site: &SiteContext) -> SchemaRecord {
    let organization = json!({
        "@type": "Organization",
        "name": site.brand_name,
        "url": site.absolute_url("/"),
    });

    let mut data = Map::new();
    data.insert("@context".into(), json!(SCHEMA_CONTEXT));
    data.insert("@type".into(), json!("Article"));
    if let Some(title) = input.title {
        data.insert("headline".into(), json!(title));
    }
    if let Some(description) = input.description {
        data.insert("description".into(), json!(description));
    }
    data.insert("author".into(), organization.clone());
    data.insert("publisher".into(), organization);
    data.insert("mainEntityOfPage".into(), json!(page_url));
    data.insert("dateModified".into(), json!(site.generated_at));

    SchemaRecord::new("Article", Value::Object(data))
}

fn faq_page(faqs: &[Faq]) -> SchemaRecord {
    let questions: Vec<Value> = faqs
        .iter()
        .map(|faq| {
            json!({
                "@type": "Question",
                "name": faq.question,
                "acceptedAnswer": {"@type": "Answer", "text": faq.answer},
            })
        })
        .collect();

    SchemaRecord::new(
        "FAQPage",
        json!({
            "@context": SCHEMA_CONTEXT,
            "@type": "FAQPage",
            "mainEntity": questions,
        }),
    )
}

fn item_list(input: &PageSchemaInput<'_>, business: &str) -> SchemaRecord {
    let ranked = rank_providers(input.listed_providers);
    let items: Vec<Value> = ranked
        .iter()
        .enumerate()
        .map(|(i, provider)| {
            let mut item = Map::new();
            item.insert("@type".into(), json!(business));
            item.insert("name".into(), json!(provider.name));
            if let (Some(rating), true) = (provider.rating, provider.review_count > 0) {
                item.insert(
                    "aggregateRating".into(),
                    json!({
                        "@type": "AggregateRating",
                        "ratingValue": rating,
                        "reviewCount": provider.review_count,
                    }),
                );
            }
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "item": Value::Object(item),
            })
        })
        .collect();

    let name = input
        .title
        .or(input.page.primary_keyword())
        .unwrap_or(input.page.id.as_str());

    SchemaRecord::new(
        "ItemList",
        json!({
            "@context": SCHEMA_CONTEXT,
            "@type": "ItemList",
            "name": name,
            "itemListOrder": "https://schema.org/ItemListOrderDescending",
            "numberOfItems": items.len(),
            "itemListElement": items,
        }),
    )
}
