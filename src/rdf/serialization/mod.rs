//! RDF serialization formats
//!
//! Supports:
//! - Turtle (TTL)
//! - N-Triples (NT)
//! - RDF/XML
//! - JSON-LD
//!
//! The encoders are off-the-shelf (`rio_turtle`, `rio_xml`, `serde_json`);
//! this module only adapts [`Triple`] values and the prefix table to them.

mod jsonld;
mod rdfxml;
mod turtle;

use super::namespace::NamespaceManager;
use super::types::{RdfObject, Triple};
use oxrdf::vocab::xsd;
use rio_api::formatter::TriplesFormatter;
use rio_api::model::{
    Literal as RioLiteral, NamedNode as RioNamedNode, Subject as RioSubject, Term as RioTerm,
    Triple as RioTriple,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// RDF serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RdfFormat {
    /// Turtle format (.ttl)
    #[default]
    Turtle,
    /// N-Triples format (.nt)
    NTriples,
    /// RDF/XML format (.rdf)
    RdfXml,
    /// JSON-LD format (.jsonld)
    JsonLd,
}

impl RdfFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "ttl" | "turtle" => Some(RdfFormat::Turtle),
            "nt" => Some(RdfFormat::NTriples),
            "rdf" | "xml" | "owl" => Some(RdfFormat::RdfXml),
            "jsonld" | "json" => Some(RdfFormat::JsonLd),
            _ => None,
        }
    }
}

/// Serialization errors
#[derive(Error, Debug)]
pub enum SerializeError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),
}

pub type SerializeResult<T> = Result<T, SerializeError>;

/// RDF serializer
pub struct RdfSerializer;

impl RdfSerializer {
    /// Render triples into `out` and hand the writer back
    pub fn write<W: Write>(
        triples: &[Triple],
        namespaces: &NamespaceManager,
        format: RdfFormat,
        out: W,
    ) -> SerializeResult<W> {
        match format {
            RdfFormat::Turtle => turtle::write_turtle(triples, namespaces, out),
            RdfFormat::NTriples => turtle::write_ntriples(triples, out),
            RdfFormat::RdfXml => rdfxml::write(triples, out),
            RdfFormat::JsonLd => jsonld::write(triples, namespaces, out),
        }
    }

    /// Serialize triples to a string
    pub fn serialize(
        triples: &[Triple],
        namespaces: &NamespaceManager,
        format: RdfFormat,
    ) -> SerializeResult<String> {
        let bytes = Self::write(triples, namespaces, format, Vec::new())?;
        String::from_utf8(bytes).map_err(|e| SerializeError::Serialize(e.to_string()))
    }

    /// Serialize triples to a file, replacing it if it exists
    pub fn serialize_file(
        triples: &[Triple],
        namespaces: &NamespaceManager,
        path: &Path,
        format: RdfFormat,
    ) -> SerializeResult<()> {
        let file = File::create(path)?;
        let mut writer = Self::write(triples, namespaces, format, BufWriter::new(file))?;
        writer.flush()?;
        Ok(())
    }
}

/// Feed one triple to a rio formatter
fn format_triple<F: TriplesFormatter>(formatter: &mut F, triple: &Triple) -> Result<(), F::Error> {
    let datatype;
    let object = match &triple.object {
        RdfObject::NamedNode(n) => RioTerm::NamedNode(RioNamedNode { iri: n.as_str() }),
        RdfObject::Literal(l) => {
            datatype = l.datatype();
            if datatype.as_str() == xsd::STRING.as_str() {
                RioTerm::Literal(RioLiteral::Simple { value: l.value() })
            } else {
                RioTerm::Literal(RioLiteral::Typed {
                    value: l.value(),
                    datatype: RioNamedNode {
                        iri: datatype.as_str(),
                    },
                })
            }
        }
    };

    formatter.format(&RioTriple {
        subject: RioSubject::NamedNode(RioNamedNode {
            iri: triple.subject.as_str(),
        }),
        predicate: RioNamedNode {
            iri: triple.predicate.as_str(),
        },
        object,
    })
}
