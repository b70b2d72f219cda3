//! Output triple collection
//!
//! The mapping engine appends into a [`GraphBuilder`] that the conversion
//! run owns. Triples are kept in insertion order and duplicates are kept:
//! the serializer receives exactly what the mapping produced.

use super::types::{NamedNode, RdfObject, Triple};

/// Append-only triple accumulator
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    triples: Vec<Triple>,
}

impl GraphBuilder {
    /// Create a new empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a triple
    pub fn add(&mut self, triple: Triple) {
        self.triples.push(triple);
    }

    /// Check if a triple has been emitted
    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// Get the total number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check if the builder is empty
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterate over triples in emission order
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Borrow the triples as a slice
    pub fn as_slice(&self) -> &[Triple] {
        &self.triples
    }

    /// Get triples with a specific subject
    pub fn triples_with_subject(&self, subject: &NamedNode) -> Vec<&Triple> {
        self.triples
            .iter()
            .filter(|triple| &triple.subject == subject)
            .collect()
    }

    /// Get triples with a specific predicate
    pub fn triples_with_predicate(&self, predicate: &NamedNode) -> Vec<&Triple> {
        self.triples
            .iter()
            .filter(|triple| &triple.predicate == predicate)
            .collect()
    }

    /// Get the objects of all triples matching subject and predicate
    pub fn objects(&self, subject: &NamedNode, predicate: &NamedNode) -> Vec<&RdfObject> {
        self.triples
            .iter()
            .filter(|triple| &triple.subject == subject && &triple.predicate == predicate)
            .map(|triple| &triple.object)
            .collect()
    }

    /// Hand the collection over
    pub fn into_triples(self) -> Vec<Triple> {
        self.triples
    }
}

impl Extend<Triple> for GraphBuilder {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        self.triples.extend(iter);
    }
}

impl IntoIterator for GraphBuilder {
    type Item = Triple;
    type IntoIter = std::vec::IntoIter<Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(iri: &str) -> NamedNode {
        NamedNode::new(iri).unwrap()
    }

    fn knows(a: &str, b: &str) -> Triple {
        Triple::new(node(a), node("http://example.org/knows"), node(b))
    }

    #[test]
    fn test_add_keeps_order_and_duplicates() {
        let mut graph = GraphBuilder::new();
        assert!(graph.is_empty());

        graph.add(knows("http://example.org/1", "http://example.org/2"));
        graph.add(knows("http://example.org/2", "http://example.org/3"));
        graph.add(knows("http://example.org/1", "http://example.org/2"));

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.as_slice()[1], knows("http://example.org/2", "http://example.org/3"));
        assert_eq!(graph.as_slice()[0], graph.as_slice()[2]);
    }

    #[test]
    fn test_query_by_subject_and_predicate() {
        let mut graph = GraphBuilder::new();
        graph.extend([
            knows("http://example.org/1", "http://example.org/2"),
            knows("http://example.org/1", "http://example.org/3"),
            knows("http://example.org/2", "http://example.org/3"),
        ]);

        assert_eq!(graph.triples_with_subject(&node("http://example.org/1")).len(), 2);
        assert_eq!(
            graph.triples_with_predicate(&node("http://example.org/knows")).len(),
            3
        );
        let objects = graph.objects(&node("http://example.org/2"), &node("http://example.org/knows"));
        assert_eq!(objects, vec![&RdfObject::NamedNode(node("http://example.org/3"))]);
        assert!(graph.contains(&knows("http://example.org/2", "http://example.org/3")));
    }

    #[test]
    fn test_into_triples() {
        let mut graph = GraphBuilder::new();
        graph.add(knows("http://example.org/1", "http://example.org/2"));
        let triples = graph.into_triples();
        assert_eq!(triples.len(), 1);
    }
}
