mod concurrency_tests;
mod progress_tests;

use crate::pages::SiteInput;

/// Homepage, hub, service page, cost guide and about page. The service page
/// carries a required link to a page that does not exist.
fn five_page_input() -> SiteInput {
    SiteInput::from_json(
        r#"{
            "blueprint": {
                "brandName": "Acme Plumbing",
                "baseUrl": "https://acme.test",
                "city": "Austin",
                "state": "TX",
                "category": "plumbing",
                "phone": "+1-512-555-0100",
                "generatedAt": "2024-05-01",
                "pages": [
                    {"id": "H", "url": "/", "type": "homepage",
                     "seo": {"titleTemplate": "{category} in {city}, {state} | {brand}",
                             "primaryKeyword": "Austin plumbing"}},
                    {"id": "S1", "url": "/plumbing", "type": "service_hub",
                     "seo": {"primaryKeyword": "plumbing services"}},
                    {"id": "S2", "url": "/plumbing/drain-cleaning", "type": "service_page",
                     "seo": {"primaryKeyword": "drain cleaning"},
                     "requiredLinks": [{"targetId": "ghost", "anchorPattern": "{keyword} near {city}"}]},
                    {"id": "S3", "url": "/plumbing/drain-cleaning-cost", "type": "cost_guide",
                     "seo": {"primaryKeyword": "drain cleaning cost"}},
                    {"id": "A1", "url": "/about", "type": "about"}
                ]
            },
            "editorial": {
                "S2": {
                    "h1": "Drain Cleaning in Austin",
                    "sections": [{"heading": "Common clogs", "body": "Hair and grease."}],
                    "faqs": [{"question": "How long does it take?", "answer": "About an hour."}]
                }
            }
        }"#,
    )
    .unwrap()
}

/// A provider profile whose provider record has no name
fn nameless_provider_input() -> SiteInput {
    SiteInput::from_json(
        r#"{
            "blueprint": {
                "brandName": "Acme Plumbing",
                "baseUrl": "https://acme.test",
                "city": "Austin",
                "category": "plumbing",
                "pages": [
                    {"id": "H", "url": "/", "type": "homepage"},
                    {"id": "P1", "url": "/pros/p-1", "type": "provider_profile", "providerId": "p-1"}
                ],
                "providers": [{"id": "p-1", "name": "", "rating": 4.5, "reviewCount": 0}]
            }
        }"#,
    )
    .unwrap()
}
