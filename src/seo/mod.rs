//! Rule-based SEO checks.
//!
//! Page rules live in [`rules`] and are pure functions from observed fields
//! to issues. [`package::validate_package`] is a separate pass that
//! re-derives package invariants straight from the assembled output.

pub mod package;
pub mod rules;
pub mod suggest;

pub use package::validate_package;
pub use rules::{SeoRuleConfig, SeoRules};
pub use suggest::{IssueWeightScorer, suggestions};

use crate::pages::PageType;
use crate::results::{HeadingStructure, PageMeta};
use crate::schema::SchemaRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    MissingTitle,
    TitleTooShort,
    TitleTooLong,
    TitleMissingKeyword,
    TitleMissingLocation,
    TitleForbiddenPattern,
    MissingDescription,
    DescriptionTooShort,
    DescriptionTooLong,
    DescriptionMissingKeyword,
    MissingH1,
    H1MissingKeyword,
    H1TooLong,
    NoH2,
    MissingSchema,
    InvalidSchema,
    LowLinkCount,
    MissingCanonical,
}

/// A single validator finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub severity: Severity,
    pub message: String,
    pub field: String,
    pub value: serde_json::Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Issue {
    pub fn new(
        issue_type: IssueType,
        severity: Severity,
        field: &str,
        value: impl Into<serde_json::Value>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            issue_type,
            severity,
            message: message.into(),
            field: field.to_string(),
            value: value.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// The observed fields of one page that the rules look at
#[derive(Debug, Clone, Copy)]
pub struct PageFacts<'a> {
    pub page_type: PageType,
    pub meta: &'a PageMeta,
    pub headings: &'a HeadingStructure,
    pub schema: &'a [SchemaRecord],
    pub link_count: usize,
    pub city: &'a str,
}

/// All page rules, concatenated in a fixed order. Duplicates across rules are kept.
pub fn validate_page(facts: &PageFacts<'_>, rules: &SeoRules) -> Vec<Issue> {
    let keyword = facts.meta.primary_keyword.as_deref();
    let city = facts
        .page_type
        .is_location_bearing()
        .then_some(facts.city)
        .filter(|c| !c.trim().is_empty());

    let mut issues = Vec::new();
    issues.extend(rules::check_title(facts.meta.title.as_deref(), keyword, city, rules));
    issues.extend(rules::check_description(
        facts.meta.description.as_deref(),
        keyword,
        rules,
    ));
    issues.extend(rules::check_headings(facts.headings, keyword, rules));
    issues.extend(rules::check_schema_presence(facts.page_type, facts.schema, rules));
    issues.extend(rules::check_link_count(facts.page_type, facts.link_count));
    issues.extend(rules::check_canonical(facts.meta.canonical.as_deref()));
    issues
}
