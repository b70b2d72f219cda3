use pg2rdf::{Config, ConfigError, ConvertError, Converter, RdfFormat};
use rio_api::parser::TriplesParser;
use rio_turtle::{TurtleError, TurtleParser};
use std::path::Path;

const RDF_TYPE: &str = "<http://www.w3.org/1999/02/22-rdf-syntax-ns#type>";

const ZOO_CONFIG: &str = r#"
base:
  iri: http://example.org/zoo/
  prefix: zoo
prefixes:
  schema: https://schema.org/
mappings:
  name:
    type: xsd:string
    iri: rdfs:label
  legs:
    type: xsd:integer
  homepage:
    type: IRI
    iri: schema:url
  since:
    type: xsd:dateTime
    iri: dcterms:date
  observed:
    type: xsd:dateTime
"#;

const ZOO_EXPORT: &str = concat!(
    r#"{"id":"1","type":"node","labels":["Animal"],"properties":{"name":"Wolf","legs":4,"homepage":"https://en.wikipedia.org/wiki/Wolf"}}"#,
    "\n",
    r#"{"id":"2","type":"node","labels":["Animal","Prey"],"properties":{"name":"Deer\nRed","legs":"four"}}"#,
    "\n",
    "\n",
    r#"{"id":"10","type":"relationship","label":"HUNTS","start":{"id":"1"},"end":{"id":"2"},"properties":{"since":"2020-01-01","observed":"2020-01-02"}}"#,
    "\n",
);

/// Parse a Turtle/N-Triples document into N-Triples statements (`s p o .`)
fn parse_turtle(path: &Path) -> Vec<String> {
    let text = std::fs::read_to_string(path).unwrap();
    let mut triples = Vec::new();
    let res: Result<(), TurtleError> =
        TurtleParser::new(text.as_bytes(), None).parse_all(&mut |t| {
            triples.push(format!("{} .", t));
            Ok(())
        });
    res.unwrap();
    triples
}

fn zoo(s: &str) -> String {
    format!("<http://example.org/zoo/{}>", s)
}

fn write_inputs(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let input = dir.join("zoo.json");
    let conf = dir.join("zoo.yaml");
    std::fs::write(&input, ZOO_EXPORT).unwrap();
    std::fs::write(&conf, ZOO_CONFIG).unwrap();
    (input, conf)
}

#[test]
fn test_single_node_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("wolf.json");
    let output = dir.path().join("wolf.ttl");
    std::fs::write(
        &input,
        r#"{"id":"1","type":"node","labels":["Animal"],"properties":{"name":"Wolf"}}"#,
    )
    .unwrap();

    let config = Config::builtin("http://example.org/zoo/", "zoo");
    let stats = Converter::from_config(&config)
        .unwrap()
        .run(&input, &output, RdfFormat::Turtle)
        .unwrap();
    assert_eq!(stats.triples, 2);

    let triples = parse_turtle(&output);
    assert_eq!(triples.len(), 2);
    assert!(triples.contains(&format!("{} {} {} .", zoo("1"), RDF_TYPE, zoo("Animal"))));
    assert!(triples.contains(&format!(
        "{} <http://www.w3.org/2000/01/rdf-schema#label> \"Wolf\" .",
        zoo("1")
    )));

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.contains("@prefix zoo: <http://example.org/zoo/> ."));
}

#[test]
fn test_configured_conversion() {
    let dir = tempfile::tempdir().unwrap();
    let (input, conf) = write_inputs(dir.path());
    let output = dir.path().join("zoo.nt");

    let config = Config::from_path(&conf).unwrap();
    let converter = Converter::from_config(&config).unwrap();
    let stats = converter.run(&input, &output, RdfFormat::NTriples).unwrap();

    assert_eq!(stats.nodes, 2);
    assert_eq!(stats.relationships, 1);
    // "four" is not an xsd:integer
    assert_eq!(stats.skipped_properties, 1);

    let triples = parse_turtle(&output);
    assert_eq!(triples.len(), stats.triples);

    // node 1: name, legs, homepage, type
    assert!(triples.contains(&format!(
        "{} {} \"4\"^^<http://www.w3.org/2001/XMLSchema#integer> .",
        zoo("1"),
        zoo("legs")
    )));
    assert!(triples.contains(&format!(
        "{} <https://schema.org/url> <https://en.wikipedia.org/wiki/Wolf> .",
        zoo("1")
    )));

    // newlines are stripped from node properties
    assert!(triples.contains(&format!(
        "{} <http://www.w3.org/2000/01/rdf-schema#label> \"DeerRed\" .",
        zoo("2")
    )));
    assert!(triples.contains(&format!("{} {} {} .", zoo("2"), RDF_TYPE, zoo("Prey"))));

    // relationship: edge, reification, property on the statement
    assert!(triples.contains(&format!("{} {} {} .", zoo("1"), zoo("HUNTS"), zoo("2"))));
    assert!(triples.contains(&format!(
        "{} {} <http://www.w3.org/1999/02/22-rdf-syntax-ns#Statement> .",
        zoo("10"),
        RDF_TYPE
    )));
    assert!(triples.contains(&format!(
        "{} <http://www.w3.org/1999/02/22-rdf-syntax-ns#subject> {} .",
        zoo("10"),
        zoo("1")
    )));
    // explicit predicate: calendar dates are typed xsd:date
    assert!(triples.contains(&format!(
        "{} <http://purl.org/dc/terms/date> \"2020-01-01\"^^<http://www.w3.org/2001/XMLSchema#date> .",
        zoo("10")
    )));
    // key as predicate: the declared xsd:dateTime is kept
    assert!(triples.contains(&format!(
        "{} {} \"2020-01-02\"^^<http://www.w3.org/2001/XMLSchema#dateTime> .",
        zoo("10"),
        zoo("observed")
    )));

    assert_eq!(triples.len(), 4 + 3 + 5 + 2);
}

#[test]
fn test_output_formats() {
    let dir = tempfile::tempdir().unwrap();
    let (input, conf) = write_inputs(dir.path());
    let converter = Converter::from_config(&Config::from_path(&conf).unwrap()).unwrap();

    let xml = dir.path().join("zoo.rdf");
    converter.run(&input, &xml, RdfFormat::RdfXml).unwrap();
    let text = std::fs::read_to_string(&xml).unwrap();
    assert!(text.contains("rdf:RDF"));
    assert!(text.contains("http://example.org/zoo/1"));

    let jsonld = dir.path().join("zoo.jsonld");
    converter.run(&input, &jsonld, RdfFormat::JsonLd).unwrap();
    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&jsonld).unwrap()).unwrap();
    assert_eq!(doc["@context"]["zoo"], "http://example.org/zoo/");
    let subjects: Vec<&str> = doc["@graph"]
        .as_array()
        .unwrap()
        .iter()
        .map(|node| node["@id"].as_str().unwrap())
        .collect();
    assert_eq!(
        subjects,
        vec![
            "http://example.org/zoo/1",
            "http://example.org/zoo/2",
            "http://example.org/zoo/10"
        ]
    );
}

#[test]
fn test_output_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let (input, conf) = write_inputs(dir.path());
    let converter = Converter::from_config(&Config::from_path(&conf).unwrap()).unwrap();

    let first = dir.path().join("a.ttl");
    let second = dir.path().join("b.ttl");
    converter.run(&input, &first, RdfFormat::Turtle).unwrap();
    converter.run(&input, &second, RdfFormat::Turtle).unwrap();

    assert_eq!(
        std::fs::read_to_string(&first).unwrap(),
        std::fs::read_to_string(&second).unwrap()
    );
}

#[test]
fn test_malformed_line_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.json");
    let output = dir.path().join("broken.ttl");
    std::fs::write(
        &input,
        "{\"id\":\"1\",\"type\":\"node\",\"labels\":[\"Animal\"]}\n{\"id\":\"2\",\n",
    )
    .unwrap();

    let converter = Converter::from_config(&Config::builtin("http://example.org/", "ex")).unwrap();
    let err = converter.run(&input, &output, RdfFormat::Turtle).unwrap_err();

    assert!(matches!(err, ConvertError::Decode { line: 2, .. }));
    assert_eq!(err.line(), Some(2));
    assert!(!output.exists());
}

#[test]
fn test_missing_endpoint_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("edge.json");
    std::fs::write(
        &input,
        r#"{"id":"10","type":"relationship","label":"HUNTS","start":{"id":"1"}}"#,
    )
    .unwrap();

    let converter = Converter::from_config(&Config::builtin("http://example.org/", "ex")).unwrap();
    let err = converter.convert_file(&input).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::MissingRequiredField { line: 1, field: "end" }
    ));
}

#[test]
fn test_invalid_config_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let conf = dir.path().join("bad.yaml");
    std::fs::write(&conf, "base:\n  iri: not-absolute\n  prefix: ex\nmappings: {}\n").unwrap();

    let config = Config::from_path(&conf).unwrap();
    let err = Converter::from_config(&config).unwrap_err();
    assert!(matches!(err, ConvertError::Config(_)));
}

#[test]
fn test_config_without_mappings_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let conf = dir.path().join("partial.yaml");
    std::fs::write(&conf, "base:\n  iri: http://example.org/\n  prefix: ex\n").unwrap();

    let err = Config::from_path(&conf).unwrap_err();
    assert!(matches!(err, ConfigError::Yaml(_)));
}
