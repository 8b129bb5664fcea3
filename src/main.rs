//! Command-line interface for ormxml

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::io::Read;

#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
use ormxml::documents::Document;
#[cfg(feature = "cli")]
use ormxml::loaders::OpenStream;
#[cfg(feature = "cli")]
use ormxml::{
    BindingContext, Limits, Loader, Location, MappingReader, ValidationMode, VariantId,
    SCHEMA_VARIANTS,
};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "ormxml")]
#[command(author, version, about = "ORM mapping file reader and validator", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Allow http(s) locations
    #[arg(long, global = true)]
    allow_remote: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Read a mapping file through the variant fallback chain and print it as JSON
    Read {
        /// Path or URL of the mapping file
        #[arg(value_name = "LOCATION")]
        location: String,

        /// Pretty print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Validate a mapping file against the schema of one or all variants
    Validate {
        /// Path or URL of the mapping file
        #[arg(value_name = "LOCATION")]
        location: String,

        /// Variant to validate against: orm-2.0, orm-1.0, eclipselink-1.1
        #[arg(long)]
        variant: Option<VariantId>,

        /// Validation mode: strict or lax
        #[arg(short, long, default_value = "strict")]
        mode: ValidationMode,
    },

    /// List the known schema variants in order of preference
    Variants,
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let loader = Loader::new().with_allow_remote(cli.allow_remote);
    let result = match cli.command {
        Commands::Read { location, pretty } => cmd_read(loader, &location, pretty),
        Commands::Validate {
            location,
            variant,
            mode,
        } => cmd_validate(&loader, &location, variant, mode),
        Commands::Variants => cmd_variants(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let mut source = std::error::Error::source(e.as_ref());
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(feature = "cli")]
fn cmd_read(loader: Loader, location: &str, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    let reader = MappingReader::new().with_opener(std::sync::Arc::new(loader));
    let mappings = reader.read_location(location)?;

    let json = if pretty {
        serde_json::to_string_pretty(&mappings)?
    } else {
        serde_json::to_string(&mappings)?
    };
    println!("{}", json);

    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_validate(
    loader: &Loader,
    location: &str,
    variant: Option<VariantId>,
    mode: ValidationMode,
) -> Result<(), Box<dyn std::error::Error>> {
    if !mode.is_validating() {
        return Err(format!("Unknown validation mode: {}. Use: strict, lax", mode.as_str()).into());
    }

    let url = Location::parse(location)?.to_url()?;
    let mut stream = OpenStream::open(loader, &url)?;
    let mut xml = String::new();
    let read = stream.read_to_string(&mut xml);
    stream.close()?;
    read?;

    let doc = Document::parse(&xml, &Limits::default())?;

    let variants: Vec<_> = match variant {
        Some(id) => vec![id.variant()],
        None => SCHEMA_VARIANTS.iter().collect(),
    };

    let mut any_valid = false;
    for variant in variants {
        let schema = BindingContext::load_schema(variant)?;
        let result = schema.validate(&doc);

        if result.valid {
            any_valid = true;
            println!("✓ Document is valid against {}", variant.id);
        } else {
            println!("✗ Document is invalid against {}", variant.id);
            for error in &result.errors {
                println!("  - {}", error);
            }
        }
        for warning in &result.warnings {
            println!("  ! {}", warning);
        }
    }

    if !any_valid && mode == ValidationMode::Strict {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_variants() -> Result<(), Box<dyn std::error::Error>> {
    for (position, variant) in SCHEMA_VARIANTS.iter().enumerate() {
        println!(
            "{}. {:<16} {}  ({})",
            position + 1,
            variant.id.as_str(),
            variant.namespace_uri,
            variant.schema_resource_path
        );
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
