//! Property graph → RDF mapping
//!
//! # Mapping Strategy
//!
//! - Node → one property triple per mapped property, then `rdf:type` for each label
//! - Relationship → the direct edge triple plus an `rdf:Statement` reification
//!   whose subject is the relationship id; mapped properties hang off that
//!   statement
//!
//! Which properties are emitted, under which predicate and with which
//! datatype is decided by a [`RuleSet`]. Properties without a rule are
//! skipped. A property that cannot be mapped yields a
//! [`PropertyMappingError`]; it is logged and the rest of the record is still
//! emitted.

use super::builder::GraphBuilder;
use super::datatype::check_lexical_form;
use super::namespace::NamespaceContext;
use super::types::{Literal, NamedNode, RdfObject, RdfResult, Triple};
use crate::graph::{InputRecord, NodeRecord, PropertyMap, PropertyValue, RelationshipRecord};
use indexmap::IndexMap;
use oxrdf::vocab::{rdf, rdfs, xsd};
use oxrdf::NamedNodeRef;
use thiserror::Error;
use tracing::{debug, warn};

/// Rule `type` value marking a property whose value is itself an IRI
pub const IRI_SENTINEL: &str = "IRI";

/// A property that could not be turned into a triple
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertyMappingError {
    /// The property is null
    #[error("property `{key}` has no value")]
    MissingValue { key: String },

    /// The property is not a scalar
    #[error("property `{key}` holds a {value_type} value, expected a scalar")]
    UnsupportedValue {
        key: String,
        value_type: &'static str,
    },

    /// The value is outside the lexical space of the datatype
    #[error("property `{key}`: `{value}` is not a valid <{datatype}> literal, expected {expected}")]
    InvalidLexicalForm {
        key: String,
        value: String,
        datatype: String,
        expected: &'static str,
    },

    /// An IRI-typed value is not an absolute IRI
    #[error("property `{key}`: `{value}` is not an absolute IRI: {reason}")]
    InvalidIri {
        key: String,
        value: String,
        reason: String,
    },

    /// The rule has no `iri` and the key does not resolve in the base namespace
    #[error("property `{key}` cannot be used as a predicate: {reason}")]
    InvalidPredicate { key: String, reason: String },
}

impl PropertyMappingError {
    /// Mapping key of the failed property
    pub fn key(&self) -> &str {
        match self {
            PropertyMappingError::MissingValue { key }
            | PropertyMappingError::UnsupportedValue { key, .. }
            | PropertyMappingError::InvalidLexicalForm { key, .. }
            | PropertyMappingError::InvalidIri { key, .. }
            | PropertyMappingError::InvalidPredicate { key, .. } => key,
        }
    }
}

/// How a mapped property value becomes an object
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleType {
    /// The value is an absolute IRI, used verbatim
    Iri,
    /// The value is a literal of this datatype
    Datatype(NamedNode),
}

/// Rule for one property key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRule {
    pub rule_type: RuleType,
    /// Predicate; when absent the property key is resolved in the base namespace
    pub iri: Option<NamedNode>,
}

impl MappingRule {
    /// Literal-valued rule
    pub fn literal(datatype: impl Into<NamedNode>) -> Self {
        Self {
            rule_type: RuleType::Datatype(datatype.into()),
            iri: None,
        }
    }

    /// IRI-valued rule
    pub fn resource() -> Self {
        Self {
            rule_type: RuleType::Iri,
            iri: None,
        }
    }

    /// Set an explicit predicate
    pub fn with_predicate(mut self, iri: impl Into<NamedNode>) -> Self {
        self.iri = Some(iri.into());
        self
    }
}

/// Property key → rule, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: IndexMap<String, MappingRule>,
}

impl RuleSet {
    /// Create an empty rule set
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules used when no configuration file is given: node names become
    /// `rdfs:label`, and relationships carry a multimedia link, dates and
    /// observation times.
    pub fn builtin() -> Self {
        let mut rules = Self::new();
        rules.insert(
            "name",
            MappingRule::literal(xsd::STRING).with_predicate(rdfs::LABEL),
        );
        rules.insert(
            "multimedia",
            MappingRule::resource()
                .with_predicate(NamedNodeRef::new_unchecked("https://schema.org/subjectOf")),
        );
        rules.insert(
            "dates",
            MappingRule::literal(xsd::DATE_TIME)
                .with_predicate(NamedNodeRef::new_unchecked("http://purl.org/dc/terms/date")),
        );
        rules.insert("observed_times", MappingRule::literal(xsd::DATE_TIME));
        rules
    }

    /// Add or replace the rule for `key`
    pub fn insert(&mut self, key: impl Into<String>, rule: MappingRule) {
        self.rules.insert(key.into(), rule);
    }

    /// Get the rule for `key`
    pub fn get(&self, key: &str) -> Option<&MappingRule> {
        self.rules.get(key)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate rules in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MappingRule)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// What a property triple hangs off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyTarget {
    /// A node. Line breaks are stripped from values.
    Node,
    /// A reified relationship. Rules with an explicit `iri` and an
    /// `xsd:dateTime` type tag calendar dates as `xsd:date`.
    Statement,
}

/// Result of mapping one record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingOutcome {
    /// Triples appended to the output
    pub emitted: usize,
    /// Properties that were skipped
    pub failures: Vec<PropertyMappingError>,
}

/// Maps decoded records to triples under a rule set
#[derive(Debug, Clone)]
pub struct MappingEngine {
    rules: RuleSet,
}

impl MappingEngine {
    /// Create an engine for a rule set
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Rule set in use
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Map one record into `out`.
    ///
    /// Fails only when an id or label cannot be resolved; in that case nothing
    /// from the record has been appended.
    pub fn map_record(
        &self,
        record: &InputRecord,
        namespace: &NamespaceContext,
        out: &mut GraphBuilder,
    ) -> RdfResult<MappingOutcome> {
        debug!("Mapping {} {}", record.kind(), record.id());
        match record {
            InputRecord::Node(node) => self.map_node(node, namespace, out),
            InputRecord::Relationship(rel) => self.map_relationship(rel, namespace, out),
        }
    }

    /// Map a node: property triples first, then one `rdf:type` per label
    pub fn map_node(
        &self,
        node: &NodeRecord,
        namespace: &NamespaceContext,
        out: &mut GraphBuilder,
    ) -> RdfResult<MappingOutcome> {
        let subject = namespace.resolve(&node.id)?;
        let types = node
            .labels
            .iter()
            .map(|label| namespace.resolve(label))
            .collect::<RdfResult<Vec<_>>>()?;

        let mut outcome = self.map_properties(&subject, &node.properties, namespace, PropertyTarget::Node, out);

        for class in types {
            out.add(Triple::new(subject.clone(), rdf::TYPE.into(), class));
            outcome.emitted += 1;
        }

        Ok(outcome)
    }

    /// Map a relationship: the edge triple, its reification, then the
    /// properties attached to the reified statement
    pub fn map_relationship(
        &self,
        rel: &RelationshipRecord,
        namespace: &NamespaceContext,
        out: &mut GraphBuilder,
    ) -> RdfResult<MappingOutcome> {
        let statement = namespace.resolve(&rel.id)?;
        let start = namespace.resolve(&rel.start_id)?;
        let predicate = namespace.resolve(&rel.label)?;
        let end = namespace.resolve(&rel.end_id)?;

        out.extend([
            Triple::new(start.clone(), predicate.clone(), end.clone()),
            Triple::new(statement.clone(), rdf::SUBJECT.into(), start),
            Triple::new(statement.clone(), rdf::PREDICATE.into(), predicate),
            Triple::new(statement.clone(), rdf::OBJECT.into(), end),
            Triple::new(statement.clone(), rdf::TYPE.into(), NamedNode::from(rdf::STATEMENT)),
        ]);

        let mut outcome = self.map_properties(
            &statement,
            &rel.properties,
            namespace,
            PropertyTarget::Statement,
            out,
        );
        outcome.emitted += 5;
        Ok(outcome)
    }

    /// Apply every rule whose key is present in `properties`. Failures are
    /// logged and collected; successful triples are appended in rule order.
    fn map_properties(
        &self,
        subject: &NamedNode,
        properties: &PropertyMap,
        namespace: &NamespaceContext,
        target: PropertyTarget,
        out: &mut GraphBuilder,
    ) -> MappingOutcome {
        self.rules
            .iter()
            .filter_map(|(key, rule)| properties.get(key).map(|value| (key, rule, value)))
            .fold(MappingOutcome::default(), |mut outcome, (key, rule, value)| {
                match self.map_property(subject, key, rule, value, namespace, target) {
                    Ok(triple) => {
                        out.add(triple);
                        outcome.emitted += 1;
                    }
                    Err(err) => {
                        warn!(
                            "Skipping property of {}: {} (value: {}, value type: {})",
                            subject,
                            err,
                            value,
                            value.type_name()
                        );
                        outcome.failures.push(err);
                    }
                }
                outcome
            })
    }

    /// Build the triple for one property under its rule.
    ///
    /// - predicate: the rule's `iri`, else the rule's own key in the base namespace
    /// - IRI rules: the value is an absolute IRI and is not namespace-resolved
    /// - statement rules with an `iri` and type `xsd:dateTime`: values without
    ///   a `T` separator are typed `xsd:date`
    /// - otherwise: a literal of the rule's datatype
    pub fn map_property(
        &self,
        subject: &NamedNode,
        key: &str,
        rule: &MappingRule,
        value: &PropertyValue,
        namespace: &NamespaceContext,
        target: PropertyTarget,
    ) -> Result<Triple, PropertyMappingError> {
        let predicate = match &rule.iri {
            Some(iri) => iri.clone(),
            None => namespace
                .resolve(key)
                .map_err(|e| PropertyMappingError::InvalidPredicate {
                    key: key.to_string(),
                    reason: e.to_string(),
                })?,
        };

        let mut lexical = match value {
            PropertyValue::Null => {
                return Err(PropertyMappingError::MissingValue {
                    key: key.to_string(),
                })
            }
            other => other
                .lexical_form()
                .ok_or_else(|| PropertyMappingError::UnsupportedValue {
                    key: key.to_string(),
                    value_type: other.type_name(),
                })?,
        };
        if target == PropertyTarget::Node {
            lexical.retain(|c| c != '\n' && c != '\r');
        }

        let split_dates = target == PropertyTarget::Statement && rule.iri.is_some();
        let object = object_for(key, &rule.rule_type, lexical, split_dates)?;
        Ok(Triple::new(subject.clone(), predicate, object))
    }
}

fn object_for(
    key: &str,
    rule_type: &RuleType,
    lexical: String,
    split_dates: bool,
) -> Result<RdfObject, PropertyMappingError> {
    match rule_type {
        RuleType::Iri => NamedNode::new(lexical.as_str())
            .map(RdfObject::from)
            .map_err(|e| PropertyMappingError::InvalidIri {
                key: key.to_string(),
                value: lexical,
                reason: e.to_string(),
            }),
        RuleType::Datatype(declared) => {
            let date_only = declared.as_str() == xsd::DATE_TIME.as_str() && !lexical.contains('T');
            // a calendar date under a dateTime rule is checked as a date
            let checked_as = if date_only {
                NamedNode::from(xsd::DATE)
            } else {
                declared.clone()
            };
            if let Err(expected) = check_lexical_form(&lexical, checked_as.as_str()) {
                return Err(PropertyMappingError::InvalidLexicalForm {
                    key: key.to_string(),
                    value: lexical,
                    datatype: checked_as.as_str().to_string(),
                    expected,
                });
            }

            let datatype = if date_only && split_dates {
                checked_as
            } else {
                declared.clone()
            };
            Ok(Literal::new_typed(lexical, &datatype).into())
        }
    }
}
