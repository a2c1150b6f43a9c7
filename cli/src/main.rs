//! # magidoc-gen CLI
//!
//! Command-line interface for generating and checking the descriptors a
//! GraphQL documentation generator reads at startup.
//!
//! ## Usage
//!
//! - `magidoc-gen generate --schema schema.json --scalar gomap_string_string` - Write `magidoc.mjs`
//! - `magidoc-gen check magidoc.mjs --require-schema` - Validate a descriptor
//! - `magidoc-gen show magidoc.mjs` - Print a descriptor as JSON
//! - `magidoc-gen convert magidoc.mjs magidoc.json` - Convert between formats

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;

use commands::{
    check_command, convert_command, generate_command, parse_factory, show_command, GenerateArgs,
};
use config::CliConfigLoader;

/// magidoc-gen - GraphQL documentation descriptor tool
#[derive(Parser)]
#[command(name = "magidoc-gen")]
#[command(version = magidoc_core::VERSION)]
#[command(about = "Generate and check GraphQL documentation descriptors")]
#[command(long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a descriptor derived from scalar names
    Generate {
        /// Settings file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Introspection file location, relative to the descriptor
        #[arg(long)]
        schema: Option<String>,

        /// Documentation site template
        #[arg(long)]
        template: Option<String>,

        /// Scalar name exposed by the schema (repeatable)
        #[arg(long = "scalar")]
        scalars: Vec<String>,

        /// Explicit placeholder as NAME=VALUE (repeatable)
        #[arg(long = "factory", value_parser = parse_factory)]
        factories: Vec<(String, String)>,

        /// Descriptor output path (.mjs or .json)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Existing introspection JSON to copy next to the descriptor
        #[arg(long)]
        introspection_dump: Option<PathBuf>,
    },

    /// Validate a descriptor
    Check {
        /// Descriptor file
        file: PathBuf,

        /// Also require the introspection file to exist
        #[arg(long)]
        require_schema: bool,
    },

    /// Print a descriptor as JSON
    Show {
        /// Descriptor file
        file: PathBuf,
    },

    /// Convert a descriptor between .mjs and .json
    Convert {
        /// Input descriptor
        input: PathBuf,

        /// Output descriptor
        output: PathBuf,
    },
}

/// Build a settings loader from `generate` arguments
fn build_config_loader(config: &Option<PathBuf>) -> CliConfigLoader {
    let mut loader = CliConfigLoader::new();

    if let Some(config_path) = config {
        loader = loader.with_config_override(config_path.clone());
    }

    loader
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG wins when set
    if std::env::var_os("RUST_LOG").is_some() {
        magidoc_core::init_tracing();
    } else {
        magidoc_core::init_tracing_with_debug(cli.verbose);
    }

    match cli.command {
        Commands::Generate {
            ref config,
            ref schema,
            ref template,
            ref scalars,
            ref factories,
            ref out,
            ref introspection_dump,
        } => {
            let settings = build_config_loader(config).load()?;
            let args = GenerateArgs {
                schema: schema.clone(),
                template: template.clone(),
                scalars: scalars.clone(),
                factories: factories.clone(),
                out: out.clone(),
                introspection_dump: introspection_dump.clone(),
            };
            generate_command(args, settings).await
        }
        Commands::Check {
            ref file,
            require_schema,
        } => check_command(file, require_schema).await,
        Commands::Show { ref file } => show_command(file).await,
        Commands::Convert {
            ref input,
            ref output,
        } => convert_command(input, output).await,
    }
}
