//! Documentation extractor.

use crate::assembler::SeedSet;
use crate::descriptor::{DescriptorValue, PropertyAssignment};
use crate::options::PluginOptions;
use tsmeta_common::DocComment;

/// Description, example(s) and deprecation from the property's doc comment.
/// Empty unless `introspectComments` is on.
pub fn documentation_assignments(
    leading_trivia: &str,
    seed: &SeedSet,
    options: &PluginOptions,
) -> Vec<PropertyAssignment> {
    let mut assignments = Vec::new();
    if !options.introspect_comments {
        return assignments;
    }
    let Some(doc) = DocComment::from_trivia(leading_trivia) else {
        return assignments;
    };

    let description_key = options.dto_key_of_comment.as_str();
    if let Some(description) = &doc.description {
        if !seed.contains(description_key) {
            assignments.push(PropertyAssignment::new(
                description_key,
                DescriptorValue::String(description.clone()),
            ));
        }
    }

    if !seed.contains("example") && !seed.contains("examples") {
        let mut examples: Vec<serde_json::Value> =
            doc.tag_values("example").map(example_value).collect();
        match examples.len() {
            0 => {}
            1 => assignments.push(PropertyAssignment::new(
                "example",
                DescriptorValue::Json(examples.remove(0)),
            )),
            _ => assignments.push(PropertyAssignment::new(
                "examples",
                DescriptorValue::Json(serde_json::Value::Array(examples)),
            )),
        }
    }

    if doc.has_tag("deprecated") && !seed.contains("deprecated") {
        assignments.push(PropertyAssignment::new(
            "deprecated",
            DescriptorValue::Bool(true),
        ));
    }
    assignments
}

/// `@example 42` is a number, `@example {"a": 1}` an object, anything that
/// is not JSON a string.
fn example_value(text: &str) -> serde_json::Value {
    let text = text.trim();
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::Value::String(text.to_string()))
}

#[cfg(test)]
#[path = "../tests/docs_tests.rs"]
mod tests;
