//! Jetstream block schema tool.
//!
//! Exports picker lists, validates and renders populated content, and cleans
//! pasted embed markup.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use jetstream_kernel::cli;
use jetstream_kernel::config::Config;
use jetstream_kernel::content::BlockRenderer;
use jetstream_kernel::registry::SchemaRegistry;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the blocks offered by the page body (or a layout column).
    Export {
        /// Site whose features filter the list.
        #[arg(long)]
        site: Option<String>,

        /// List a top-level layout column instead of the page body.
        #[arg(long)]
        column: bool,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Validate a JSON content stream and print its cleaned form.
    Validate {
        file: PathBuf,

        #[arg(long)]
        site: Option<String>,
    },
    /// Render a JSON content stream to HTML.
    Render {
        file: PathBuf,

        #[arg(long)]
        site: Option<String>,
    },
    /// Clean pasted iframe markup.
    CleanEmbed { markup: String },
    /// List default and special features.
    Features,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Args::parse();
    let config = Config::from_env().context("failed to load configuration")?;

    let registry =
        SchemaRegistry::standard(&config.schema_settings()).context("failed to build block schema")?;
    let table = config.load_features()?;
    let default_site = config.site.as_deref();

    match args.command {
        Command::Export { site, column, json } => {
            cli::cmd_export(&registry, &table, site.as_deref().or(default_site), column, json)
        }
        Command::Validate { file, site } => {
            cli::cmd_validate(&registry, &table, site.as_deref().or(default_site), &file)
        }
        Command::Render { file, site } => {
            let renderer = if config.templates_dir.is_dir() {
                BlockRenderer::new(&config.templates_dir)?
            } else {
                info!(
                    dir = %config.templates_dir.display(),
                    "template directory not found; rendering block structure only"
                );
                BlockRenderer::empty()
            };
            cli::cmd_render(
                &registry,
                &renderer,
                &table,
                site.as_deref().or(default_site),
                &file,
            )
        }
        Command::CleanEmbed { markup } => cli::cmd_clean_embed(&markup),
        Command::Features => cli::cmd_features(&registry, &table),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
