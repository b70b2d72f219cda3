//! Export records
//!
//! Each input line holds one self-contained JSON object describing either a
//! node or a relationship. The record kind is decided once here; everything
//! downstream matches on [`InputRecord`].

use super::property::{PropertyMap, PropertyValue};
use crate::error::{ConvertError, ConvertResult};
use serde::Deserialize;
use serde_json::Value;

/// A node of the exported graph
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub id: String,
    pub labels: Vec<String>,
    pub properties: PropertyMap,
}

/// A relationship of the exported graph
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipRecord {
    pub id: String,
    /// Relationship type
    pub label: String,
    pub start_id: String,
    pub end_id: String,
    pub properties: PropertyMap,
}

/// One decoded export line
#[derive(Debug, Clone, PartialEq)]
pub enum InputRecord {
    Node(NodeRecord),
    Relationship(RelationshipRecord),
}

impl InputRecord {
    /// Record id
    pub fn id(&self) -> &str {
        match self {
            InputRecord::Node(n) => &n.id,
            InputRecord::Relationship(r) => &r.id,
        }
    }

    /// `node` or `relationship`
    pub fn kind(&self) -> &'static str {
        match self {
            InputRecord::Node(_) => "node",
            InputRecord::Relationship(_) => "relationship",
        }
    }

    /// Decode one export line. `line` is the 1-based line number used in errors.
    pub fn from_json_line(line: usize, text: &str) -> ConvertResult<Self> {
        let value: Value =
            serde_json::from_str(text).map_err(|source| ConvertError::Decode { line, source })?;
        if !value.is_object() {
            return Err(ConvertError::InvalidField {
                line,
                field: "record",
                expected: "a JSON object",
            });
        }
        let raw = RawRecord::deserialize(value)
            .map_err(|source| ConvertError::Decode { line, source })?;
        let fields = FieldCheck { line };

        let id = fields.id("id", raw.id)?;
        let kind = fields.string("type", raw.kind)?;

        match kind.as_str() {
            "node" => Ok(InputRecord::Node(NodeRecord {
                id,
                labels: fields.labels(raw.labels)?,
                properties: fields.properties(raw.properties)?,
            })),
            "relationship" => Ok(InputRecord::Relationship(RelationshipRecord {
                id,
                label: fields.string("label", raw.label)?,
                start_id: fields.endpoint("start", "start.id", raw.start)?,
                end_id: fields.endpoint("end", "end.id", raw.end)?,
                properties: fields.properties(raw.properties)?,
            })),
            _ => Err(ConvertError::UnknownRecordKind { line, kind }),
        }
    }
}

/// Shape of an export line. Fields stay loosely typed here; [`FieldCheck`]
/// validates them so errors can name the field and the line.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRecord {
    id: Option<Value>,
    #[serde(rename = "type")]
    kind: Option<Value>,
    labels: Option<Value>,
    label: Option<Value>,
    start: Option<Value>,
    end: Option<Value>,
    properties: Option<Value>,
}

/// Field validation for one line. JSON `null` counts as absent.
struct FieldCheck {
    line: usize,
}

impl FieldCheck {
    fn required(&self, field: &'static str, value: Option<Value>) -> ConvertResult<Value> {
        value.ok_or(ConvertError::MissingRequiredField {
            line: self.line,
            field,
        })
    }

    fn invalid(&self, field: &'static str, expected: &'static str) -> ConvertError {
        ConvertError::InvalidField {
            line: self.line,
            field,
            expected,
        }
    }

    fn string(&self, field: &'static str, value: Option<Value>) -> ConvertResult<String> {
        match self.required(field, value)? {
            Value::String(s) => Ok(s),
            _ => Err(self.invalid(field, "a string")),
        }
    }

    /// Ids are strings in most exports; integer ids are accepted as well.
    fn id(&self, field: &'static str, value: Option<Value>) -> ConvertResult<String> {
        id_string(self.required(field, value)?)
            .ok_or_else(|| self.invalid(field, "a string or integer"))
    }

    fn endpoint(
        &self,
        field: &'static str,
        id_field: &'static str,
        value: Option<Value>,
    ) -> ConvertResult<String> {
        match self.required(field, value)? {
            Value::Object(mut endpoint) => {
                let id = endpoint.remove("id").filter(|id| !id.is_null());
                self.id(id_field, id)
            }
            _ => Err(self.invalid(field, "an object")),
        }
    }

    fn labels(&self, value: Option<Value>) -> ConvertResult<Vec<String>> {
        match value {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    _ => Err(self.invalid("labels", "an array of strings")),
                })
                .collect(),
            Some(_) => Err(self.invalid("labels", "an array of strings")),
        }
    }

    fn properties(&self, value: Option<Value>) -> ConvertResult<PropertyMap> {
        match value {
            None => Ok(PropertyMap::new()),
            Some(Value::Object(map)) => Ok(map
                .into_iter()
                .map(|(k, v)| (k, PropertyValue::from(v)))
                .collect()),
            Some(_) => Err(self.invalid("properties", "an object")),
        }
    }
}

fn id_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_node() {
        let line = r#"{"id":"1","type":"node","labels":["Animal","Mammal"],"properties":{"name":"Wolf","legs":4}}"#;
        let record = InputRecord::from_json_line(1, line).unwrap();

        let InputRecord::Node(node) = record else {
            panic!("expected a node");
        };
        assert_eq!(node.id, "1");
        assert_eq!(node.labels, vec!["Animal", "Mammal"]);
        assert_eq!(node.properties.get("legs"), Some(&PropertyValue::Integer(4)));
        // export order is kept
        assert_eq!(node.properties.keys().next().map(String::as_str), Some("name"));
    }

    #[test]
    fn test_properties_keep_line_order() {
        let line = r#"{"id":"1","type":"node","properties":{"zeta":1,"alpha":2,"mid":{"b":1,"a":2}}}"#;
        let InputRecord::Node(node) = InputRecord::from_json_line(1, line).unwrap() else {
            panic!("expected a node");
        };

        let keys: Vec<&str> = node.properties.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        let Some(PropertyValue::Map(nested)) = node.properties.get("mid") else {
            panic!("expected a map");
        };
        assert_eq!(nested.keys().next().map(String::as_str), Some("b"));
    }

    #[test]
    fn test_null_fields_count_as_missing() {
        let err = InputRecord::from_json_line(1, r#"{"id":null,"type":"node"}"#).unwrap_err();
        assert!(matches!(err, ConvertError::MissingRequiredField { field: "id", .. }));

        let err = InputRecord::from_json_line(
            1,
            r#"{"id":"9","type":"relationship","label":"X","start":{"id":null},"end":{"id":"2"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::MissingRequiredField { field: "start.id", .. }));

        let record =
            InputRecord::from_json_line(1, r#"{"id":1,"type":"node","labels":null,"properties":null}"#)
                .unwrap();
        assert_eq!(record.id(), "1");
    }

    #[test]
    fn test_wrong_endpoint_types() {
        let err = InputRecord::from_json_line(
            1,
            r#"{"id":"9","type":"relationship","label":"X","start":"1","end":{"id":"2"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::InvalidField { field: "start", .. }));

        let err = InputRecord::from_json_line(
            1,
            r#"{"id":"9","type":"relationship","label":"X","start":{"id":"1"},"end":{"id":true}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::InvalidField { field: "end.id", .. }));
    }

    #[test]
    fn test_decode_relationship() {
        let line = r#"{"id":"7","type":"relationship","label":"HUNTS","start":{"id":"1","labels":["Animal"]},"end":{"id":2},"properties":{"since":"2020-05-01"}}"#;
        let record = InputRecord::from_json_line(3, line).unwrap();

        assert_eq!(record.kind(), "relationship");
        assert_eq!(record.id(), "7");
        let InputRecord::Relationship(rel) = record else {
            panic!("expected a relationship");
        };
        assert_eq!(rel.label, "HUNTS");
        assert_eq!(rel.start_id, "1");
        assert_eq!(rel.end_id, "2");
    }

    #[test]
    fn test_optional_fields_default_to_empty() {
        let record = InputRecord::from_json_line(1, r#"{"id":"1","type":"node"}"#).unwrap();
        let InputRecord::Node(node) = record else {
            panic!("expected a node");
        };
        assert!(node.labels.is_empty());
        assert!(node.properties.is_empty());
    }

    #[test]
    fn test_malformed_json_is_decode_error() {
        let err = InputRecord::from_json_line(5, r#"{"id":"1","#).unwrap_err();
        assert!(matches!(err, ConvertError::Decode { line: 5, .. }));
        assert_eq!(err.line(), Some(5));
    }

    #[test]
    fn test_missing_required_fields() {
        let err = InputRecord::from_json_line(1, r#"{"type":"node"}"#).unwrap_err();
        assert!(matches!(err, ConvertError::MissingRequiredField { field: "id", .. }));

        let err = InputRecord::from_json_line(1, r#"{"id":"1"}"#).unwrap_err();
        assert!(matches!(err, ConvertError::MissingRequiredField { field: "type", .. }));

        let err = InputRecord::from_json_line(
            2,
            r#"{"id":"9","type":"relationship","label":"X","end":{"id":"2"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::MissingRequiredField { line: 2, field: "start" }));

        let err = InputRecord::from_json_line(
            2,
            r#"{"id":"9","type":"relationship","label":"X","start":{"id":"1"},"end":{}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::MissingRequiredField { field: "end.id", .. }));
    }

    #[test]
    fn test_wrong_field_types() {
        let err = InputRecord::from_json_line(1, r#"{"id":"1","type":"node","labels":"Animal"}"#)
            .unwrap_err();
        assert!(matches!(err, ConvertError::InvalidField { field: "labels", .. }));

        let err = InputRecord::from_json_line(1, r#"["not","an","object"]"#).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidField { field: "record", .. }));
    }

    #[test]
    fn test_unknown_kind() {
        let err = InputRecord::from_json_line(4, r#"{"id":"1","type":"path"}"#).unwrap_err();
        assert!(matches!(err, ConvertError::UnknownRecordKind { line: 4, ref kind } if kind == "path"));
    }
}
