//! Command-line interface for xmlschema-parser

#[cfg(feature = "cli")]
use clap::{ArgAction, Parser, Subcommand};

#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
use xmlschema_parser::model::{SchemaTop, XsdComponent};
#[cfg(feature = "cli")]
use xmlschema_parser::{Error, XsdSchema};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "xmlschema-parser")]
#[command(author, version, about = "XML Schema document parser", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse an XSD schema and display its top-level structure
    Inspect {
        /// Path to the XSD schema file
        #[arg(value_name = "SCHEMA")]
        schema: PathBuf,

        /// Dump the whole parsed model as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Parse XSD schema files and report the first error in each
    Check {
        /// Paths to the XSD schema files
        #[arg(value_name = "SCHEMA", required = true)]
        schemas: Vec<PathBuf>,
    },
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Inspect { schema, json } => cmd_inspect(schema, json),
        Commands::Check { schemas } => cmd_check(schemas),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the verbosity flag
#[cfg(feature = "cli")]
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn cmd_inspect(schema_path: PathBuf, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let schema = XsdSchema::from_file(&schema_path)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    print_schema_summary(&schema);

    println!("\n=== Top-level Components ===");
    for item in &schema.content {
        if let SchemaTop::Annotation(_) = item {
            continue;
        }
        println!(
            "  {:<16} {}",
            component_tag(item),
            item.name().unwrap_or("(anonymous)")
        );
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn component_tag(item: &SchemaTop) -> &'static str {
    match item {
        SchemaTop::SimpleType(t) => t.tag(),
        SchemaTop::ComplexType(t) => t.tag(),
        SchemaTop::Group(g) => g.tag(),
        SchemaTop::AttributeGroup(g) => g.tag(),
        SchemaTop::Element(e) => e.tag(),
        SchemaTop::Attribute(a) => a.tag(),
        SchemaTop::Notation(n) => n.tag(),
        SchemaTop::Annotation(a) => a.tag(),
    }
}

#[cfg(feature = "cli")]
fn print_schema_summary(schema: &XsdSchema) {
    println!("xmlschema-parser v{}", xmlschema_parser::VERSION);
    println!();
    println!("Schema Information:");
    match &schema.target_namespace {
        Some(ns) => println!("  Target Namespace: {}", ns),
        None => println!("  Target Namespace: (none)"),
    }
    if let Some(version) = &schema.version {
        println!("  Version: {}", version);
    }
    if let Some(lang) = &schema.lang {
        println!("  Language: {}", lang);
    }
    println!();
    println!("Statistics:");
    println!("  Includes: {}", schema.includes().len());
    println!("  Imports: {}", schema.imports().len());
    println!("  Redefines: {}", schema.redefines().len());
    println!("  Global Elements: {}", schema.elements().len());
    println!("  Global Attributes: {}", schema.attributes().len());
    println!("  Simple Types: {}", schema.simple_types().len());
    println!("  Complex Types: {}", schema.complex_types().len());
    println!("  Model Groups: {}", schema.groups().len());
    println!("  Attribute Groups: {}", schema.attribute_groups().len());
    println!("  Notations: {}", schema.notations().len());
}

#[cfg(feature = "cli")]
fn cmd_check(schemas: Vec<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let mut failed = 0usize;

    for path in &schemas {
        match XsdSchema::from_file(path) {
            Ok(_) => println!("ok      {}", path.display()),
            Err(e) => {
                failed += 1;
                println!("FAILED  {}", path.display());
                match e {
                    Error::Parse(error) => {
                        println!("  - {}", error.kind);
                        println!("    context: {}", error.context);
                        if let Some(location) = &error.location {
                            println!("    at: {}", location);
                        }
                    }
                    other => println!("  - {}", other),
                }
            }
        }
    }

    if failed > 0 {
        return Err(format!("{} of {} schema(s) failed to parse", failed, schemas.len()).into());
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
