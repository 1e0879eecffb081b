//! Open-ended vendor extension data.
//!
//! [`AttributeData`] is a named value that domain composites can carry in
//! their `optional_data` list, enabling forward-compatible extensions without
//! schema changes. Values are primitives, non-empty lists of primitives, or
//! unique lists of nested attributes; nesting is strictly downward, so no
//! cycles are possible and every node uniquely owns its children.

use serde::{Deserialize, Serialize};

use crate::diagnostics::{check_unique, field, index, Diagnostics, Validate};

/// A single primitive attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimitiveValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// Value of an attribute: one primitive, a vector of primitives, or nested
/// attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Primitives(Vec<PrimitiveValue>),
    Nested(Vec<AttributeData>),
}

/// A named extension attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeData {
    /// Attribute key
    pub name: String,
    pub value: AttributeValue,
    pub description: Option<String>,
}

impl AttributeData {
    pub fn new(name: impl Into<String>, value: AttributeValue) -> Self {
        Self {
            name: name.into(),
            value,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Validate for AttributeData {
    fn validate(&self, path: &str, diag: &mut Diagnostics) {
        match &self.value {
            AttributeValue::Primitives(values) => {
                if values.is_empty() {
                    diag.add_error(
                        "domain",
                        &field(path, "value"),
                        "at least one entry is required",
                    );
                }
            }
            AttributeValue::Nested(children) => {
                if children.is_empty() {
                    diag.add_error(
                        "domain",
                        &field(path, "value"),
                        "at least one entry is required",
                    );
                }
                check_unique(children, &field(path, "value"), diag);
                for (i, child) in children.iter().enumerate() {
                    child.validate(&index(&field(path, "value"), i), diag);
                }
            }
            _ => {}
        }
    }
}

/// Validate an `optional_data` list hanging off a composite at `path`.
pub(crate) fn validate_optional_data(
    data: &[AttributeData],
    path: &str,
    diag: &mut Diagnostics,
) {
    let path = field(path, "optional_data");
    if data.is_empty() {
        diag.add_error("domain", &path, "at least one entry is required");
    }
    check_unique(data, &path, diag);
    for (i, attr) in data.iter().enumerate() {
        attr.validate(&index(&path, i), diag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_shapes() {
        let a: AttributeValue = serde_json::from_str("true").unwrap();
        assert_eq!(a, AttributeValue::Bool(true));

        let a: AttributeValue = serde_json::from_str("3").unwrap();
        assert_eq!(a, AttributeValue::Int(3));

        let a: AttributeValue = serde_json::from_str("3.5").unwrap();
        assert_eq!(a, AttributeValue::Float(3.5));

        let a: AttributeValue = serde_json::from_str("[1, 2, 3]").unwrap();
        assert!(matches!(a, AttributeValue::Primitives(_)));

        let a: AttributeValue =
            serde_json::from_str(r#"[{"name": "inner", "value": 1, "description": null}]"#)
                .unwrap();
        assert!(matches!(a, AttributeValue::Nested(_)));
    }

    #[test]
    fn test_nested_round_trip() {
        let attr = AttributeData::new(
            "ratings",
            AttributeValue::Nested(vec![
                AttributeData::new("summer", AttributeValue::Float(100.0)),
                AttributeData::new("winter", AttributeValue::Float(120.0)),
            ]),
        )
        .with_description("seasonal ratings");

        let json = serde_json::to_string(&attr).unwrap();
        let back: AttributeData = serde_json::from_str(&json).unwrap();
        assert_eq!(attr, back);
    }

    #[test]
    fn test_empty_and_duplicate_lists_rejected() {
        let empty = AttributeData::new("xs", AttributeValue::Primitives(vec![]));
        assert!(empty.validated().is_err());

        let dup = AttributeData::new(
            "xs",
            AttributeValue::Nested(vec![
                AttributeData::new("a", AttributeValue::Int(1)),
                AttributeData::new("a", AttributeValue::Int(1)),
            ]),
        );
        assert!(dup.validated().is_err());
    }
}
