use super::{Issue, PageFacts, SeoRules};
use crate::assembly::PageScorer;
use crate::graph::tables;
use crate::results::IssueCounts;

const MIN_SCHEMA_RECORDS: usize = 2;

/// Default scorer: start at 100 and subtract per issue by severity
#[derive(Debug, Clone, Copy)]
pub struct IssueWeightScorer {
    pub error_weight: f64,
    pub warning_weight: f64,
    pub info_weight: f64,
}

impl Default for IssueWeightScorer {
    fn default() -> Self {
        Self {
            error_weight: 15.0,
            warning_weight: 5.0,
            info_weight: 1.0,
        }
    }
}

impl PageScorer for IssueWeightScorer {
    fn score(&self, _facts: &PageFacts<'_>, issues: &[Issue]) -> f64 {
        let counts = IssueCounts::from_issues(issues);
        let penalty = counts.error as f64 * self.error_weight
            + counts.warning as f64 * self.warning_weight
            + counts.info as f64 * self.info_weight;
        (100.0 - penalty).clamp(0.0, 100.0)
    }
}

/// Suggestion strings for a scored page.
///
/// One line per non-empty severity, one for the score band, then structural
/// nudges for link count, schema count and title length.
pub fn suggestions(
    score: f64,
    issues: &[Issue],
    facts: &PageFacts<'_>,
    rules: &SeoRules,
) -> Vec<String> {
    let counts = IssueCounts::from_issues(issues);
    let config = rules.config();
    let mut out = Vec::new();

    if counts.error > 0 {
        out.push(format!("Fix {} critical SEO error(s)", counts.error));
    }
    if counts.warning > 0 {
        out.push(format!("Resolve {} SEO warning(s)", counts.warning));
    }
    if counts.info > 0 {
        out.push(format!("Review {} optimization note(s)", counts.info));
    }

    let band = if score >= 90.0 {
        "Page is well optimized; keep the content fresh"
    } else if score >= 75.0 {
        "Good optimization; clear the remaining warnings to reach excellent"
    } else if score >= 50.0 {
        "Moderate optimization; prioritize errors before warnings"
    } else {
        "Poor optimization; rework metadata, headings and structured data"
    };
    out.push(band.to_string());

    if facts.link_count < tables::min_links(facts.page_type) {
        out.push("Add more internal links to related pages".to_string());
    }
    if facts.schema.len() < MIN_SCHEMA_RECORDS {
        out.push("Add richer structured data such as FAQ or business markup".to_string());
    }
    if let Some(title) = facts.meta.title.as_deref() {
        let length = title.chars().count();
        if length < config.title_min_length {
            out.push("Lengthen the title with location or service details".to_string());
        } else if length > config.title_max_length {
            out.push("Shorten the title to avoid truncation".to_string());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::PageType;
    use crate::results::{HeadingStructure, PageMeta};
    use crate::seo::{IssueType, Severity};

    fn issue(severity: Severity) -> Issue {
        Issue::new(IssueType::NoH2, severity, "h2", 0, "test")
    }

    #[test]
    fn test_default_scorer_weights_and_clamp() {
        let meta = PageMeta::default();
        let headings = HeadingStructure::default();
        let facts = PageFacts {
            page_type: PageType::About,
            meta: &meta,
            headings: &headings,
            schema: &[],
            link_count: 0,
            city: "",
        };
        let scorer = IssueWeightScorer::default();

        assert_eq!(scorer.score(&facts, &[]), 100.0);
        let issues = vec![
            issue(Severity::Error),
            issue(Severity::Warning),
            issue(Severity::Info),
        ];
        assert_eq!(scorer.score(&facts, &issues), 79.0);

        let many: Vec<Issue> = (0..10).map(|_| issue(Severity::Error)).collect();
        assert_eq!(scorer.score(&facts, &many), 0.0);
    }

    #[test]
    fn test_suggestions_cover_counts_band_and_nudges() {
        let meta = PageMeta {
            title: Some("Short".to_string()),
            ..PageMeta::default()
        };
        let headings = HeadingStructure::default();
        let facts = PageFacts {
            page_type: PageType::ServicePage,
            meta: &meta,
            headings: &headings,
            schema: &[],
            link_count: 2,
            city: "Austin",
        };
        let issues = vec![issue(Severity::Error), issue(Severity::Error)];
        let out = suggestions(40.0, &issues, &facts, &SeoRules::default());

        assert_eq!(
            out,
            vec![
                "Fix 2 critical SEO error(s)",
                "Poor optimization; rework metadata, headings and structured data",
                "Add more internal links to related pages",
                "Add richer structured data such as FAQ or business markup",
                "Lengthen the title with location or service details",
            ]
        );
    }

    #[test]
    fn test_clean_page_gets_only_band() {
        let meta = PageMeta {
            title: Some("Drain Cleaning in Austin, TX | Acme Plumbing".to_string()),
            ..PageMeta::default()
        };
        let headings = HeadingStructure::default();
        let schema = vec![
            crate::schema::SchemaRecord::new("BreadcrumbList", serde_json::json!({})),
            crate::schema::SchemaRecord::new("Plumber", serde_json::json!({})),
        ];
        let facts = PageFacts {
            page_type: PageType::Legal,
            meta: &meta,
            headings: &headings,
            schema: &schema,
            link_count: 4,
            city: "Austin",
        };
        let out = suggestions(100.0, &[], &facts, &SeoRules::default());
        assert_eq!(out, vec!["Page is well optimized; keep the content fresh"]);
    }
}
