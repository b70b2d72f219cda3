//! RDF/XML output

use super::{format_triple, SerializeError, SerializeResult};
use crate::rdf::Triple;
use rio_xml::RdfXmlFormatter;
use std::io::Write;

pub(super) fn write<W: Write>(triples: &[Triple], out: W) -> SerializeResult<W> {
    let mut formatter = RdfXmlFormatter::with_indentation(out, 2)?;
    for triple in triples {
        // Predicates need a namespace/local-name split to become XML elements
        format_triple(&mut formatter, triple).map_err(|e| {
            SerializeError::Serialize(format!("cannot write {} as RDF/XML: {}", triple.predicate, e))
        })?;
    }
    Ok(formatter.finish()?)
}
