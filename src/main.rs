//! pg2rdf — convert a line-delimited property graph export into RDF

use anyhow::{Context, Result};
use clap::Parser;
use pg2rdf::{Config, Converter, RdfFormat};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "pg2rdf",
    version,
    about = "Convert a property graph export (one JSON record per line) into RDF"
)]
struct Cli {
    /// Export file, one JSON node or relationship per line
    #[arg(short, long)]
    input: PathBuf,

    /// YAML mapping configuration; the built-in rules are used without one
    #[arg(short, long)]
    conf: Option<PathBuf>,

    /// Output file
    #[arg(short, long)]
    output: PathBuf,

    /// Output format; guessed from the output extension when omitted
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Base namespace when no configuration file is given
    #[arg(long, default_value = "http://example.org/")]
    base_iri: String,

    /// Prefix bound to the base namespace when no configuration file is given
    #[arg(long, default_value = "ex")]
    prefix: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Turtle,
    Ntriples,
    Rdfxml,
    Jsonld,
}

impl From<OutputFormat> for RdfFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Turtle => RdfFormat::Turtle,
            OutputFormat::Ntriples => RdfFormat::NTriples,
            OutputFormat::Rdfxml => RdfFormat::RdfXml,
            OutputFormat::Jsonld => RdfFormat::JsonLd,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.conf {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => Config::builtin(cli.base_iri.as_str(), cli.prefix.as_str()),
    };

    let format = cli
        .format
        .map(RdfFormat::from)
        .or_else(|| RdfFormat::from_path(&cli.output))
        .unwrap_or_default();

    let converter = Converter::from_config(&config)?;
    converter
        .run(&cli.input, &cli.output, format)
        .with_context(|| format!("converting {}", cli.input.display()))?;
    Ok(())
}
