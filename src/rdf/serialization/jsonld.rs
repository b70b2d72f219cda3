//! JSON-LD output (expanded node objects)

use super::{SerializeError, SerializeResult};
use crate::rdf::{NamespaceManager, RdfObject, Triple};
use indexmap::IndexMap;
use oxrdf::vocab::xsd;
use serde_json::{json, Map, Value};
use std::io::Write;

/// Group triples by subject into `@graph` node objects. Prefix bindings go
/// into `@context`; keys stay full IRIs.
pub(super) fn write<W: Write>(
    triples: &[Triple],
    namespaces: &NamespaceManager,
    mut out: W,
) -> SerializeResult<W> {
    let mut subjects: IndexMap<&str, IndexMap<&str, Vec<Value>>> = IndexMap::new();

    for triple in triples {
        let object = match &triple.object {
            RdfObject::NamedNode(n) => json!({ "@id": n.as_str() }),
            RdfObject::Literal(l) => {
                let dt = l.datatype();
                if dt.as_str() == xsd::STRING.as_str() {
                    json!({ "@value": l.value() })
                } else {
                    json!({ "@value": l.value(), "@type": dt.as_str() })
                }
            }
        };

        subjects
            .entry(triple.subject.as_str())
            .or_default()
            .entry(triple.predicate.as_str())
            .or_default()
            .push(object);
    }

    let graph: Vec<Value> = subjects
        .into_iter()
        .map(|(subject, props)| {
            let mut node = Map::new();
            node.insert("@id".to_string(), json!(subject));
            for (predicate, objects) in props {
                node.insert(predicate.to_string(), Value::Array(objects));
            }
            Value::Object(node)
        })
        .collect();

    let context: Map<String, Value> = namespaces
        .prefixes()
        .into_iter()
        .map(|ns| (ns.prefix, Value::String(ns.iri)))
        .collect();

    let document = json!({ "@context": context, "@graph": graph });
    serde_json::to_writer_pretty(&mut out, &document)
        .map_err(|e| SerializeError::Serialize(e.to_string()))?;
    writeln!(out)?;
    Ok(out)
}
