//! RDF side of the exporter
//!
//! This module turns decoded property graph records into RDF:
//! - RDF terms and triples (IRIs and typed literals)
//! - Identifier resolution against the run's base namespace
//! - Rule-driven property mapping with reified relationships
//! - Serialization (Turtle, N-Triples, RDF/XML, JSON-LD)
//!
//! # Example
//!
//! ```rust
//! use pg2rdf::graph::InputRecord;
//! use pg2rdf::rdf::{GraphBuilder, MappingEngine, MappingRule, NamespaceContext, RuleSet};
//! use oxrdf::vocab::{rdfs, xsd};
//!
//! let namespace = NamespaceContext::new("http://example.org/zoo/", "zoo").unwrap();
//! let mut rules = RuleSet::new();
//! rules.insert("name", MappingRule::literal(xsd::STRING).with_predicate(rdfs::LABEL));
//!
//! let engine = MappingEngine::new(rules);
//! let mut graph = GraphBuilder::new();
//!
//! let line = r#"{"id":"1","type":"node","labels":["Animal"],"properties":{"name":"Wolf"}}"#;
//! let record = InputRecord::from_json_line(1, line).unwrap();
//! engine.map_record(&record, &namespace, &mut graph).unwrap();
//!
//! assert_eq!(graph.len(), 2);
//! ```

mod builder;
mod datatype;
mod mapping;
mod namespace;
mod serialization;
mod types;

pub use types::{Literal, NamedNode, RdfError, RdfObject, RdfResult, Triple};

pub use builder::GraphBuilder;

pub use datatype::check_lexical_form;

pub use mapping::{
    MappingEngine, MappingOutcome, MappingRule, PropertyMappingError, PropertyTarget, RuleSet,
    RuleType, IRI_SENTINEL,
};

pub use namespace::{Namespace, NamespaceContext, NamespaceManager, PrefixError, PrefixResult};

pub use serialization::{RdfFormat, RdfSerializer, SerializeError, SerializeResult};
