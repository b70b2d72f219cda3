//! Turtle and N-Triples output

use super::{format_triple, SerializeResult};
use crate::rdf::{NamespaceManager, Triple};
use rio_turtle::{NTriplesFormatter, TurtleFormatter};
use std::io::Write;

/// Write `@prefix` declarations followed by the triples
pub(super) fn write_turtle<W: Write>(
    triples: &[Triple],
    namespaces: &NamespaceManager,
    mut out: W,
) -> SerializeResult<W> {
    for ns in namespaces.prefixes() {
        writeln!(out, "@prefix {}: <{}> .", ns.prefix, ns.iri)?;
    }
    writeln!(out)?;

    let mut formatter = TurtleFormatter::new(out);
    for triple in triples {
        format_triple(&mut formatter, triple)?;
    }
    Ok(formatter.finish()?)
}

pub(super) fn write_ntriples<W: Write>(triples: &[Triple], out: W) -> SerializeResult<W> {
    let mut formatter = NTriplesFormatter::new(out);
    for triple in triples {
        format_triple(&mut formatter, triple)?;
    }
    Ok(formatter.finish()?)
}
