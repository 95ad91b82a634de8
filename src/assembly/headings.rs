use super::HeadingGenerator;
use crate::pages::{EditorialContent, PageDescriptor};
use crate::results::HeadingStructure;
use scraper::{Html, Selector};

pub const FAQ_HEADING: &str = "Frequently Asked Questions";

/// Headings from editorial content
///
/// Rendered editorial HTML is parsed for h1/h2/h3. Without markup, the H1 is
/// the editorial H1 or the primary keyword and the H2s are the section
/// headings, plus an FAQ heading when there are FAQs.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditorialHeadings;

impl HeadingGenerator for EditorialHeadings {
    fn generate(
        &self,
        page: &PageDescriptor,
        editorial: Option<&EditorialContent>,
    ) -> HeadingStructure {
        let fallback_h1 = editorial
            .and_then(|e| e.h1.as_deref())
            .or_else(|| page.primary_keyword())
            .map(str::to_string);

        if let Some(html) = editorial
            .and_then(|e| e.html.as_deref())
            .filter(|h| !h.trim().is_empty())
        {
            let mut headings = parse(html);
            if headings.h1.is_none() {
                headings.h1 = fallback_h1;
            }
            return headings;
        }

        let mut h2 = Vec::new();
        if let Some(editorial) = editorial {
            h2.extend(
                editorial
                    .sections
                    .iter()
                    .map(|s| s.heading.trim())
                    .filter(|h| !h.is_empty())
                    .map(str::to_string),
            );
            if !editorial.faqs.is_empty() {
                h2.push(FAQ_HEADING.to_string());
            }
        }

        HeadingStructure {
            h1: fallback_h1,
            h2,
            h3: Vec::new(),
        }
    }
}

/// Extract the heading outline of an HTML fragment or document
pub fn parse(html: &str) -> HeadingStructure {
    let doc = Html::parse_document(html);
    let mut headings = HeadingStructure::default();

    let Ok(selector) = Selector::parse("h1, h2, h3") else {
        return headings;
    };

    for element in doc.select(&selector) {
        let text = element
            .text()
            .collect::<Vec<_>>()
            .join(" ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        if text.is_empty() {
            continue;
        }

        match element.value().name() {
            "h1" if headings.h1.is_none() => headings.h1 = Some(text),
            "h2" => headings.h2.push(text),
            "h3" => headings.h3.push(text),
            _ => {}
        }
    }

    ::log::trace!(
        "Heading parser found h1={:?}, {} h2, {} h3",
        headings.h1,
        headings.h2.len(),
        headings.h3.len()
    );
    headings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::{Faq, PageType, Section};

    #[test]
    fn test_parse_html_headings() {
        let html = r#"
            <html><body>
                <h1>Drain   Cleaning <em>in Austin</em></h1>
                <p>Intro</p>
                <h2>Why it clogs</h2>
                <h3>Hair</h3>
                <h3>Grease</h3>
                <h2>Costs</h2>
                <h1>Second title is ignored</h1>
                <h2>   </h2>
            </body></html>
        "#;
        let headings = parse(html);
        assert_eq!(headings.h1.as_deref(), Some("Drain Cleaning in Austin"));
        assert_eq!(headings.h2, vec!["Why it clogs", "Costs"]);
        assert_eq!(headings.h3, vec!["Hair", "Grease"]);
    }

    #[test]
    fn test_html_without_h1_uses_fallback() {
        let page =
            PageDescriptor::new("p", "/p", PageType::ServicePage).with_keyword("drain cleaning");
        let editorial = EditorialContent {
            html: Some("<h2>Only a section</h2>".to_string()),
            ..EditorialContent::default()
        };
        let headings = EditorialHeadings.generate(&page, Some(&editorial));
        assert_eq!(headings.h1.as_deref(), Some("drain cleaning"));
        assert_eq!(headings.h2, vec!["Only a section"]);
    }

    #[test]
    fn test_structured_editorial() {
        let page = PageDescriptor::new("p", "/p", PageType::CostGuide);
        let editorial = EditorialContent {
            h1: Some("What drain cleaning costs".to_string()),
            sections: vec![
                Section {
                    heading: "Typical prices".to_string(),
                    body: String::new(),
                },
                Section {
                    heading: " ".to_string(),
                    body: String::new(),
                },
            ],
            faqs: vec![Faq {
                question: "Is it cheap?".to_string(),
                answer: "Usually.".to_string(),
            }],
            ..EditorialContent::default()
        };
        let headings = EditorialHeadings.generate(&page, Some(&editorial));
        assert_eq!(headings.h1.as_deref(), Some("What drain cleaning costs"));
        assert_eq!(headings.h2, vec!["Typical prices", FAQ_HEADING]);
        assert!(headings.h3.is_empty());
    }

    #[test]
    fn test_no_editorial_no_keyword() {
        let page = PageDescriptor::new("p", "/p", PageType::Legal);
        let headings = EditorialHeadings.generate(&page, None);
        assert_eq!(headings, HeadingStructure::default());
    }
}
