use super::{Issue, IssueType, Severity};
use crate::graph::tables;
use crate::pages::PageType;
use crate::results::HeadingStructure;
use crate::schema::{SchemaRecord, is_local_business_type};
use crate::utils::contains_ignore_case;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Thresholds and patterns for the page rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoRuleConfig {
    #[serde(default = "default_title_min_length")]
    pub title_min_length: usize,

    #[serde(default = "default_title_max_length")]
    pub title_max_length: usize,

    #[serde(default = "default_description_min_length")]
    pub description_min_length: usize,

    #[serde(default = "default_description_max_length")]
    pub description_max_length: usize,

    #[serde(default = "default_h1_max_length")]
    pub h1_max_length: usize,

    /// Regex patterns a title must not match
    #[serde(default = "default_forbidden_title_patterns")]
    pub forbidden_title_patterns: Vec<String>,

    /// Schema types every page needs
    #[serde(default = "default_required_schema")]
    pub required_schema: Vec<String>,

    /// Extra schema types for provider profiles. `LocalBusiness` matches any business type.
    #[serde(default = "default_provider_profile_schema")]
    pub provider_profile_schema: Vec<String>,

    /// Extra schema types for guides and articles
    #[serde(default = "default_article_schema")]
    pub article_schema: Vec<String>,
}

fn default_title_min_length() -> usize {
    30
}

fn default_title_max_length() -> usize {
    60
}

fn default_description_min_length() -> usize {
    120
}

fn default_description_max_length() -> usize {
    160
}

fn default_h1_max_length() -> usize {
    70
}

fn default_forbidden_title_patterns() -> Vec<String> {
    vec![
        // Placeholders that were never filled in
        r"\{[A-Za-z_]+\}".to_string(),
        r"(?i)lorem ipsum".to_string(),
        r"\|\s*\|".to_string(),
    ]
}

fn default_required_schema() -> Vec<String> {
    vec!["BreadcrumbList".to_string()]
}

fn default_provider_profile_schema() -> Vec<String> {
    vec!["LocalBusiness".to_string(), "AggregateRating".to_string()]
}

fn default_article_schema() -> Vec<String> {
    vec!["Article".to_string()]
}

impl Default for SeoRuleConfig {
    fn default() -> Self {
        Self {
            title_min_length: default_title_min_length(),
            title_max_length: default_title_max_length(),
            description_min_length: default_description_min_length(),
            description_max_length: default_description_max_length(),
            h1_max_length: default_h1_max_length(),
            forbidden_title_patterns: default_forbidden_title_patterns(),
            required_schema: default_required_schema(),
            provider_profile_schema: default_provider_profile_schema(),
            article_schema: default_article_schema(),
        }
    }
}

/// Rule configuration with its title patterns compiled
#[derive(Debug)]
pub struct SeoRules {
    config: SeoRuleConfig,
    forbidden_regexes: Vec<Regex>,
}

impl Default for SeoRules {
    fn default() -> Self {
        Self::new(SeoRuleConfig::default()).expect("Default title patterns should be valid")
    }
}

impl SeoRules {
    /// Compile the rule set
    pub fn new(config: SeoRuleConfig) -> Result<Self, regex::Error> {
        let mut forbidden_regexes = Vec::with_capacity(config.forbidden_title_patterns.len());
        for pattern in &config.forbidden_title_patterns {
            forbidden_regexes.push(Regex::new(pattern)?);
        }

        Ok(Self {
            config,
            forbidden_regexes,
        })
    }

    pub fn config(&self) -> &SeoRuleConfig {
        &self.config
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Title presence, length, keyword, location and forbidden patterns
pub fn check_title(
    title: Option<&str>,
    keyword: Option<&str>,
    city: Option<&str>,
    rules: &SeoRules,
) -> Vec<Issue> {
    let config = &rules.config;
    let Some(title) = title.filter(|t| !t.trim().is_empty()) else {
        return vec![
            Issue::new(
                IssueType::MissingTitle,
                Severity::Error,
                "title",
                "",
                "Page has no title",
            )
            .with_suggestion("Add a descriptive title with the primary keyword"),
        ];
    };

    let mut issues = Vec::new();
    let length = title.chars().count();

    if length < config.title_min_length {
        issues.push(
            Issue::new(
                IssueType::TitleTooShort,
                Severity::Warning,
                "title",
                title,
                format!(
                    "Title is {} characters, shorter than {}",
                    length, config.title_min_length
                ),
            )
            .with_suggestion("Expand the title with location or service details"),
        );
    }
    if length > config.title_max_length {
        issues.push(
            Issue::new(
                IssueType::TitleTooLong,
                Severity::Warning,
                "title",
                title,
                format!(
                    "Title is {} characters, longer than {}",
                    length, config.title_max_length
                ),
            )
            .with_suggestion("Trim the title so it is not truncated in search results"),
        );
    }

    if let Some(keyword) = keyword {
        if !contains_ignore_case(title, keyword) {
            issues.push(
                Issue::new(
                    IssueType::TitleMissingKeyword,
                    Severity::Warning,
                    "title",
                    title,
                    format!("Title does not contain the primary keyword \"{}\"", keyword),
                )
                .with_suggestion("Work the primary keyword into the title"),
            );
        }
    }

    if let Some(city) = city {
        if !contains_ignore_case(title, city) {
            issues.push(Issue::new(
                IssueType::TitleMissingLocation,
                Severity::Info,
                "title",
                title,
                format!("Title does not mention {}", city),
            ));
        }
    }

    for regex in &rules.forbidden_regexes {
        if regex.is_match(title) {
            issues.push(Issue::new(
                IssueType::TitleForbiddenPattern,
                Severity::Error,
                "title",
                title,
                format!("Title matches forbidden pattern {}", regex.as_str()),
            ));
        }
    }

    issues
}

/// Description presence, length and keyword
pub fn check_description(
    description: Option<&str>,
    keyword: Option<&str>,
    rules: &SeoRules,
) -> Vec<Issue> {
    let config = &rules.config;
    let Some(description) = description.filter(|d| !d.trim().is_empty()) else {
        return vec![
            Issue::new(
                IssueType::MissingDescription,
                Severity::Error,
                "description",
                "",
                "Page has no meta description",
            )
            .with_suggestion("Write a meta description that summarizes the page"),
        ];
    };

    let mut issues = Vec::new();
    let length = description.chars().count();

    if length < config.description_min_length {
        issues.push(Issue::new(
            IssueType::DescriptionTooShort,
            Severity::Warning,
            "description",
            description,
            format!(
                "Description is {} characters, shorter than {}",
                length, config.description_min_length
            ),
        ));
    }
    if length > config.description_max_length {
        issues.push(Issue::new(
            IssueType::DescriptionTooLong,
            Severity::Warning,
            "description",
            description,
            format!(
                "Description is {} characters, longer than {}",
                length, config.description_max_length
            ),
        ));
    }

    if let Some(keyword) = keyword {
        if !contains_ignore_case(description, keyword) {
            issues.push(Issue::new(
                IssueType::DescriptionMissingKeyword,
                Severity::Info,
                "description",
                description,
                format!(
                    "Description does not contain the primary keyword \"{}\"",
                    keyword
                ),
            ));
        }
    }

    issues
}

/// H1 presence, H1 keyword and length, and at least one H2
pub fn check_headings(
    headings: &HeadingStructure,
    keyword: Option<&str>,
    rules: &SeoRules,
) -> Vec<Issue> {
    let mut issues = Vec::new();

    match headings.h1.as_deref().filter(|h| !h.trim().is_empty()) {
        None => issues.push(
            Issue::new(
                IssueType::MissingH1,
                Severity::Error,
                "h1",
                "",
                "Page has no H1 heading",
            )
            .with_suggestion("Add a single H1 that states the page topic"),
        ),
        Some(h1) => {
            if let Some(keyword) = keyword {
                if !contains_ignore_case(h1, keyword) {
                    issues.push(Issue::new(
                        IssueType::H1MissingKeyword,
                        Severity::Info,
                        "h1",
                        h1,
                        format!("H1 does not contain the primary keyword \"{}\"", keyword),
                    ));
                }
            }
            let length = h1.chars().count();
            if length > rules.config.h1_max_length {
                issues.push(Issue::new(
                    IssueType::H1TooLong,
                    Severity::Info,
                    "h1",
                    h1,
                    format!(
                        "H1 is {} characters, longer than {}",
                        length, rules.config.h1_max_length
                    ),
                ));
            }
        }
    }

    if headings.h2.is_empty() {
        issues.push(Issue::new(
            IssueType::NoH2,
            Severity::Info,
            "h2",
            0,
            "Page has no H2 headings",
        ));
    }

    issues
}

/// Whether any record satisfies a required schema name
pub fn has_schema(schema: &[SchemaRecord], required: &str) -> bool {
    schema.iter().any(|record| {
        record.schema_type == required
            || (required == "LocalBusiness" && is_local_business_type(&record.schema_type))
    })
}

fn missing_schema(
    schema: &[SchemaRecord],
    required: &[String],
    severity: Severity,
    context: &str,
) -> Vec<Issue> {
    required
        .iter()
        .filter(|name| !has_schema(schema, name))
        .map(|name| {
            Issue::new(
                IssueType::MissingSchema,
                severity,
                "schema",
                name.as_str(),
                format!("Missing {} schema{}", name, context),
            )
        })
        .collect()
}

/// General required schema set, plus the provider-profile and article sets
pub fn check_schema_presence(
    page_type: PageType,
    schema: &[SchemaRecord],
    rules: &SeoRules,
) -> Vec<Issue> {
    let config = &rules.config;
    let mut issues = missing_schema(schema, &config.required_schema, Severity::Error, "");

    if page_type == PageType::ProviderProfile {
        issues.extend(missing_schema(
            schema,
            &config.provider_profile_schema,
            Severity::Warning,
            " for a provider profile",
        ));
    }
    if page_type.is_article_like() {
        issues.extend(missing_schema(
            schema,
            &config.article_schema,
            Severity::Info,
            " for an editorial page",
        ));
    }

    issues
}

/// Outbound link count against the per-type minimum
pub fn check_link_count(page_type: PageType, link_count: usize) -> Vec<Issue> {
    let minimum = tables::min_links(page_type);
    if link_count >= minimum {
        return Vec::new();
    }

    vec![
        Issue::new(
            IssueType::LowLinkCount,
            Severity::Warning,
            "internalLinks",
            link_count,
            format!(
                "Page has {} internal links, {} pages need at least {}",
                link_count, page_type, minimum
            ),
        )
        .with_suggestion("Link to related pages from the body copy"),
    ]
}

/// Canonical URL presence
pub fn check_canonical(canonical: Option<&str>) -> Vec<Issue> {
    if !is_blank(canonical) {
        return Vec::new();
    }

    vec![Issue::new(
        IssueType::MissingCanonical,
        Severity::Error,
        "canonical",
        "",
        "Page has no canonical URL",
    )]
}

/// One error per failure recorded on validated schema records
pub fn check_schema_validity(schema: &[SchemaRecord]) -> Vec<Issue> {
    schema
        .iter()
        .filter(|record| !record.valid)
        .flat_map(|record| {
            record.errors.iter().flatten().map(move |error| {
                Issue::new(
                    IssueType::InvalidSchema,
                    Severity::Error,
                    "schema",
                    record.schema_type.as_str(),
                    format!("{} schema is invalid: {}", record.schema_type, error),
                )
            })
        })
        .collect()
}
