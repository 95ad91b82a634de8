use url::Url;

/// Values substituted into title, description and anchor templates
#[derive(Debug, Clone, Copy, Default)]
pub struct Placeholders<'a> {
    pub brand: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub category: &'a str,
    pub keyword: &'a str,
}

/// Replace `{brand}`, `{city}`, `{state}`, `{category}` and `{keyword}` in a template.
///
/// Unknown placeholders are left in place so the title rules can flag them.
pub fn fill_placeholders(template: &str, values: &Placeholders<'_>) -> String {
    let filled = template
        .replace("{brand}", values.brand)
        .replace("{city}", values.city)
        .replace("{state}", values.state)
        .replace("{category}", values.category)
        .replace("{keyword}", values.keyword);

    // Collapse the gaps left by empty substitutions
    filled.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Join a site-relative path onto the base URL, keeping any base path prefix
pub fn join_url(base: &Url, path: &str) -> String {
    let mut joined = base.clone();
    let prefix = base.path().trim_end_matches('/');
    joined.set_path(&format!("{}/{}", prefix, path.trim_start_matches('/')));
    joined.set_query(None);
    joined.set_fragment(None);
    joined.to_string()
}

/// Turn a URL slug such as `drain-cleaning` into `Drain Cleaning`
pub fn title_case_slug(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Case-insensitive substring test; empty needles never match
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    !needle.is_empty() && haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_placeholders() {
        let values = Placeholders {
            brand: "Acme",
            city: "Austin",
            category: "plumbing",
            keyword: "drain cleaning",
            ..Placeholders::default()
        };
        assert_eq!(
            fill_placeholders("{keyword} in {city} | {brand}", &values),
            "drain cleaning in Austin | Acme"
        );
        assert_eq!(
            fill_placeholders("{category} near {state} {year}", &values),
            "plumbing near {year}"
        );
    }

    #[test]
    fn test_join_url() {
        let base = Url::parse("https://acme.test").unwrap();
        assert_eq!(join_url(&base, "/"), "https://acme.test/");
        assert_eq!(join_url(&base, "/plumbing"), "https://acme.test/plumbing");

        let nested = Url::parse("https://acme.test/austin/").unwrap();
        assert_eq!(
            join_url(&nested, "/drains"),
            "https://acme.test/austin/drains"
        );
    }

    #[test]
    fn test_title_case_slug() {
        assert_eq!(title_case_slug("drain-cleaning"), "Drain Cleaning");
        assert_eq!(title_case_slug("water_heater--repair"), "Water Heater Repair");
        assert_eq!(title_case_slug(""), "");
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Emergency Drain Cleaning", "drain cleaning"));
        assert!(!contains_ignore_case("Emergency Drain Cleaning", "  "));
        assert!(!contains_ignore_case("Roofing", "drain"));
    }
}
