use super::{SchemaRecord, is_local_business_type};
use serde_json::Value;

/// Check structural completeness and overwrite the record's validity.
///
/// Invalid records are returned, never dropped; callers surface the errors.
pub fn validate_schema(mut record: SchemaRecord) -> SchemaRecord {
    let errors = schema_errors(&record);

    if errors.is_empty() {
        record.valid = true;
        record.errors = None;
    } else {
        ::log::debug!(
            "{} schema failed validation: {}",
            record.schema_type,
            errors.join("; ")
        );
        record.valid = false;
        record.errors = Some(errors);
    }

    record
}

fn schema_errors(record: &SchemaRecord) -> Vec<String> {
    let data = &record.data;
    let mut errors = Vec::new();

    if !is_present(&data["@context"]) {
        errors.push("missing @context".to_string());
    }
    if !is_present(&data["@type"]) {
        errors.push("missing @type".to_string());
    }

    let schema_type = data["@type"].as_str().unwrap_or(&record.schema_type);

    if is_local_business_type(schema_type) && !is_present(&data["name"]) {
        errors.push(format!("{} requires a name", schema_type));
    }

    match schema_type {
        "Article" => {
            if !is_present(&data["headline"]) {
                errors.push("Article requires a headline".to_string());
            }
            if !is_present(&data["author"]) {
                errors.push("Article requires an author".to_string());
            }
        }
        "FAQPage" => {
            if !is_non_empty_list(&data["mainEntity"]) {
                errors.push("FAQPage requires a non-empty mainEntity list".to_string());
            }
        }
        "BreadcrumbList" => {
            if !is_non_empty_list(&data["itemListElement"]) {
                errors.push("BreadcrumbList requires a non-empty itemListElement list".to_string());
            }
        }
        _ => {}
    }

    errors
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
        _ => true,
    }
}

fn is_non_empty_list(value: &Value) -> bool {
    value.as_array().is_some_and(|items| !items.is_empty())
}
