//! pg2rdf
//!
//! Converts a line-delimited JSON property graph export into an RDF graph.
//!
//! # Pipeline
//!
//! - Each input line decodes into a node or relationship record
//! - Ids and labels resolve to IRIs in the run's base namespace
//! - Nodes become typed resources with rule-mapped property triples
//! - Relationships become an edge triple plus an `rdf:Statement`
//!   reification that carries the relationship's properties
//! - The resulting triples serialize as Turtle, N-Triples, RDF/XML or JSON-LD
//!
//! ## Example Usage
//!
//! ```rust
//! use pg2rdf::{Config, Converter};
//! use std::io::Cursor;
//!
//! let config = Config::builtin("http://example.org/zoo/", "zoo");
//! let converter = Converter::from_config(&config).unwrap();
//!
//! let input = r#"{"id":"1","type":"node","labels":["Animal"],"properties":{"name":"Wolf"}}"#;
//! let (graph, stats) = converter.convert_reader(Cursor::new(input)).unwrap();
//!
//! assert_eq!(stats.nodes, 1);
//! assert_eq!(graph.len(), 2);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod convert;
pub mod error;
pub mod graph;
pub mod rdf;

// Re-export main types for convenience
pub use config::{Config, ConfigError, ConfigResult};

pub use convert::{ConversionStats, Converter};

pub use error::{ConvertError, ConvertResult};

pub use graph::{InputRecord, NodeRecord, PropertyMap, PropertyValue, RelationshipRecord};

pub use rdf::{
    GraphBuilder, MappingEngine, MappingRule, NamedNode, NamespaceContext, NamespaceManager,
    RdfFormat, RdfSerializer, RuleSet, Triple,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
