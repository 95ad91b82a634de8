use super::MetaGenerator;
use crate::pages::{PageDescriptor, SiteContext};
use crate::results::PageMeta;
use crate::utils::{Placeholders, fill_placeholders};

pub const INDEX_FOLLOW: &str = "index, follow";
pub const NOINDEX_FOLLOW: &str = "noindex, follow";

/// Metadata from the page's SEO templates
///
/// Without a title template the title falls back to `{keyword} | {brand}`, or
/// just the brand. There is no fallback description; the rules report it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateMeta;

impl MetaGenerator for TemplateMeta {
    fn generate(&self, page: &PageDescriptor, site: &SiteContext) -> PageMeta {
        let keyword = page.primary_keyword();
        let values = Placeholders {
            brand: &site.brand_name,
            city: &site.city,
            state: site.state.as_deref().unwrap_or(""),
            category: &site.category,
            keyword: keyword.unwrap_or(""),
        };
        let hints = page.seo.as_ref();

        let title = match hints.and_then(|h| h.title_template.as_deref()) {
            Some(template) => fill_placeholders(template, &values),
            None => match keyword {
                Some(keyword) => format!("{} | {}", keyword, site.brand_name),
                None => site.brand_name.clone(),
            },
        };

        let description = hints
            .and_then(|h| h.description_template.as_deref())
            .map(|template| fill_placeholders(template, &values));

        PageMeta {
            title: Some(title).filter(|t| !t.trim().is_empty()),
            description: description.filter(|d| !d.trim().is_empty()),
            canonical: Some(site.absolute_url(&page.url)),
            robots: if page.noindex { NOINDEX_FOLLOW } else { INDEX_FOLLOW }.to_string(),
            primary_keyword: keyword.map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::{Blueprint, PageType, SeoHints};

    fn site() -> SiteContext {
        let blueprint: Blueprint = serde_json::from_str(
            r#"{"brandName": "Acme Plumbing", "baseUrl": "https://acme.test",
                "city": "Austin", "state": "TX", "category": "plumbing", "pages": []}"#,
        )
        .unwrap();
        SiteContext::from_blueprint(&blueprint).unwrap()
    }

    #[test]
    fn test_templates_are_filled() {
        let mut page = PageDescriptor::new("drain", "/drain-cleaning", PageType::ServicePage)
            .with_keyword("drain cleaning");
        page.seo = Some(SeoHints {
            title_template: Some("{keyword} in {city}, {state} | {brand}".to_string()),
            description_template: Some("Fast {keyword} from {brand}.".to_string()),
            primary_keyword: Some("drain cleaning".to_string()),
        });

        let meta = TemplateMeta.generate(&page, &site());
        assert_eq!(
            meta.title.as_deref(),
            Some("drain cleaning in Austin, TX | Acme Plumbing")
        );
        assert_eq!(
            meta.description.as_deref(),
            Some("Fast drain cleaning from Acme Plumbing.")
        );
        assert_eq!(
            meta.canonical.as_deref(),
            Some("https://acme.test/drain-cleaning")
        );
        assert_eq!(meta.robots, INDEX_FOLLOW);
        assert_eq!(meta.primary_keyword.as_deref(), Some("drain cleaning"));
    }

    #[test]
    fn test_fallbacks() {
        let keyword_only =
            PageDescriptor::new("a", "/a", PageType::About).with_keyword("about us");
        let meta = TemplateMeta.generate(&keyword_only, &site());
        assert_eq!(meta.title.as_deref(), Some("about us | Acme Plumbing"));
        assert_eq!(meta.description, None);

        let mut bare = PageDescriptor::new("t", "/terms", PageType::Terms);
        bare.noindex = true;
        let meta = TemplateMeta.generate(&bare, &site());
        assert_eq!(meta.title.as_deref(), Some("Acme Plumbing"));
        assert_eq!(meta.robots, NOINDEX_FOLLOW);
    }
}
