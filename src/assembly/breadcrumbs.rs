use super::BreadcrumbGenerator;
use crate::pages::{PageDescriptor, SiteContext};
use crate::results::Breadcrumb;
use crate::utils::title_case_slug;

pub const HOME_CRUMB: &str = "Home";

/// Breadcrumbs following the URL path
///
/// Each cumulative path prefix becomes a crumb named after the page that
/// lives there (its keyword), or the title-cased segment when there is none.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathBreadcrumbs;

fn normalize(path: &str) -> String {
    format!("/{}", path.trim_matches('/'))
}

impl BreadcrumbGenerator for PathBreadcrumbs {
    fn generate(
        &self,
        page: &PageDescriptor,
        pages: &[PageDescriptor],
        site: &SiteContext,
    ) -> Vec<Breadcrumb> {
        let mut crumbs = vec![Breadcrumb {
            name: HOME_CRUMB.to_string(),
            url: site.absolute_url("/"),
        }];

        let mut prefix = String::new();
        for segment in page.url.split('/').filter(|s| !s.is_empty()) {
            prefix.push('/');
            prefix.push_str(segment);

            let name = pages
                .iter()
                .find(|p| normalize(&p.url) == prefix)
                .and_then(PageDescriptor::primary_keyword)
                .map(str::to_string)
                .unwrap_or_else(|| title_case_slug(segment));

            crumbs.push(Breadcrumb {
                name,
                url: site.absolute_url(&prefix),
            });
        }

        crumbs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::{Blueprint, PageType};

    fn site() -> SiteContext {
        let blueprint: Blueprint = serde_json::from_str(
            r#"{"brandName": "Acme", "baseUrl": "https://acme.test", "pages": []}"#,
        )
        .unwrap();
        SiteContext::from_blueprint(&blueprint).unwrap()
    }

    #[test]
    fn test_homepage_has_single_crumb() {
        let home = PageDescriptor::new("home", "/", PageType::Homepage);
        let crumbs = PathBreadcrumbs.generate(&home, std::slice::from_ref(&home), &site());
        assert_eq!(
            crumbs,
            vec![Breadcrumb {
                name: "Home".to_string(),
                url: "https://acme.test/".to_string()
            }]
        );
    }

    #[test]
    fn test_nested_path_uses_page_keywords() {
        let pages = vec![
            PageDescriptor::new("hub", "/plumbing/", PageType::ServiceHub)
                .with_keyword("Plumbing Services"),
            PageDescriptor::new("drain", "/plumbing/drain-cleaning", PageType::ServicePage),
        ];
        let crumbs = PathBreadcrumbs.generate(&pages[1], &pages, &site());
        let names: Vec<&str> = crumbs.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Home", "Plumbing Services", "Drain Cleaning"]);
        assert_eq!(crumbs[2].url, "https://acme.test/plumbing/drain-cleaning");
    }
}
