//! Package-level cross-check.
//!
//! Every number here is recomputed from the assembled pages. Nothing is read
//! from the page issues or the link graph report.

use crate::results::{OptimizedPage, PackageValidation};
use crate::schema::SchemaRecord;
use std::collections::HashSet;

fn filled(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Validate an assembled package from its pages and site-wide schema
pub fn validate_package(pages: &[OptimizedPage], site_schema: &[SchemaRecord]) -> PackageValidation {
    let mut warnings = Vec::new();

    let mut title_coverage = true;
    let mut description_coverage = true;
    let mut canonical_coverage = true;
    let mut schema_coverage = true;

    for page in pages {
        if !filled(page.meta.title.as_deref()) {
            title_coverage = false;
            warnings.push(format!("{}: missing title", page.id));
        }
        if !filled(page.meta.description.as_deref()) {
            description_coverage = false;
            warnings.push(format!("{}: missing meta description", page.id));
        }
        if !filled(page.meta.canonical.as_deref()) {
            canonical_coverage = false;
            warnings.push(format!("{}: missing canonical URL", page.id));
        }
        if page.schema.is_empty() {
            schema_coverage = false;
            warnings.push(format!("{}: no structured data", page.id));
        }
    }

    let targeted: HashSet<&str> = pages
        .iter()
        .flat_map(|page| page.internal_links.iter())
        .map(|link| link.target_id.as_str())
        .collect();

    let linked_pages = pages
        .iter()
        .filter(|page| targeted.contains(page.id.as_str()))
        .count();
    let internal_link_coverage = if pages.is_empty() {
        0.0
    } else {
        linked_pages as f64 * 100.0 / pages.len() as f64
    };

    let orphan_pages: Vec<String> = pages
        .iter()
        .filter(|page| !page.page_type.is_orphan_exempt())
        .filter(|page| !targeted.contains(page.id.as_str()))
        .map(|page| page.id.clone())
        .collect();
    for orphan in &orphan_pages {
        warnings.push(format!("{}: no internal links point to this page", orphan));
    }

    let mut schema_errors = Vec::new();
    let owned = pages
        .iter()
        .flat_map(|page| page.schema.iter().map(move |record| (page.id.as_str(), record)));
    let site = site_schema.iter().map(|record| ("site", record));
    for (owner, record) in owned.chain(site) {
        if record.valid {
            continue;
        }
        match &record.errors {
            Some(errors) if !errors.is_empty() => {
                for error in errors {
                    schema_errors.push(format!("{}: {}: {}", owner, record.schema_type, error));
                }
            }
            _ => schema_errors.push(format!("{}: {}: invalid", owner, record.schema_type)),
        }
    }

    let valid = title_coverage
        && description_coverage
        && canonical_coverage
        && schema_coverage
        && orphan_pages.is_empty()
        && schema_errors.is_empty();

    ::log::debug!(
        "Package validation: {:.1}% link coverage, {} orphans, {} schema errors",
        internal_link_coverage,
        orphan_pages.len(),
        schema_errors.len()
    );

    PackageValidation {
        valid,
        title_coverage,
        description_coverage,
        canonical_coverage,
        schema_coverage,
        internal_link_coverage,
        orphan_pages,
        schema_errors,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{InternalLink, LinkContext, LinkOrigin};
    use crate::pages::PageType;
    use crate::results::{HeadingStructure, PageMeta};
    use serde_json::json;

    fn page(id: &str, page_type: PageType, targets: &[&str]) -> OptimizedPage {
        OptimizedPage {
            id: id.to_string(),
            url: format!("/{}", id),
            page_type,
            meta: PageMeta {
                title: Some(format!("{} title", id)),
                description: Some(format!("{} description", id)),
                canonical: Some(format!("https://acme.test/{}", id)),
                robots: "index, follow".to_string(),
                primary_keyword: None,
            },
            schema: vec![SchemaRecord::new("BreadcrumbList", json!({}))],
            headings: HeadingStructure::default(),
            internal_links: targets
                .iter()
                .map(|t| InternalLink {
                    target_id: t.to_string(),
                    target_url: format!("/{}", t),
                    anchor_text: t.to_string(),
                    context: LinkContext::Body,
                    origin: LinkOrigin::Contextual,
                })
                .collect(),
            breadcrumbs: Vec::new(),
            content: json!(null),
            score: 100.0,
            issues: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    #[test]
    fn test_fully_linked_package_is_valid() {
        let pages = vec![
            page("home", PageType::Homepage, &["about"]),
            page("about", PageType::About, &["home"]),
        ];
        let validation = validate_package(&pages, &[]);
        assert!(validation.valid);
        assert_eq!(validation.internal_link_coverage, 100.0);
        assert!(validation.orphan_pages.is_empty());
        assert!(validation.warnings.is_empty());
    }

    #[test]
    fn test_orphans_and_coverage_are_recomputed() {
        let pages = vec![
            page("home", PageType::Homepage, &["about"]),
            page("about", PageType::About, &[]),
            page("cost", PageType::CostGuide, &["about"]),
            page("terms", PageType::Terms, &[]),
        ];
        let validation = validate_package(&pages, &[]);

        assert!(!validation.valid);
        assert_eq!(validation.orphan_pages, vec!["cost"]);
        assert_eq!(validation.internal_link_coverage, 25.0);
    }

    #[test]
    fn test_missing_fields_and_schema_errors() {
        let mut broken = page("home", PageType::Homepage, &[]);
        broken.meta.description = None;
        broken.schema[0].valid = false;
        broken.schema[0].errors = Some(vec!["empty list".to_string()]);

        let mut site = SchemaRecord::new("WebSite", json!({}));
        site.valid = false;

        let validation = validate_package(&[broken], &[site]);
        assert!(!validation.description_coverage);
        assert!(validation.title_coverage);
        assert_eq!(
            validation.schema_errors,
            vec![
                "home: BreadcrumbList: empty list".to_string(),
                "site: WebSite: invalid".to_string()
            ]
        );
        assert_eq!(validation.warnings, vec!["home: missing meta description"]);
    }
}
