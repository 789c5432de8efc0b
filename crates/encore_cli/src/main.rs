//! Encore CLI
//!
//! Format news dates, build contact mailto links, inspect configuration, and
//! run the bundled demo page.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod demo;

use encore_core::SiteConfig;
use encore_site::{mailto_uri, validate, ContactFields};

#[derive(Parser)]
#[command(name = "encore")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Encore site interactions CLI", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Site configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the display label of each ISO date (YYYY-MM-DD)
    Date {
        /// Dates to format
        #[arg(required = true)]
        dates: Vec<String>,
    },

    /// Validate contact details and print the mailto link
    Mailto {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        message: String,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Configuration file to read instead of --config
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Run a scripted session on the demo page, one JSON snapshot per step
    Demo {
        /// Pretty-print each snapshot
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Date { dates } => cmd_date(cli.config.as_deref(), &dates),

        Commands::Mailto {
            name,
            email,
            message,
        } => cmd_mailto(cli.config.as_deref(), name, email, message),

        Commands::Config { path } => cmd_config(path.as_deref().or(cli.config.as_deref())),

        Commands::Demo { pretty } => demo::run(load_config(cli.config.as_deref())?, pretty),
    }
}

/// Defaults when no file is given; the file must exist and validate otherwise
fn load_config(path: Option<&Path>) -> Result<SiteConfig> {
    let config = match path {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            SiteConfig::load(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => SiteConfig::default(),
    };
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn cmd_date(config: Option<&Path>, dates: &[String]) -> Result<()> {
    let config = load_config(config)?;
    let tz = config.news.display_timezone()?;

    for iso in dates {
        let label = encore_site::format_news_date(iso, tz)
            .with_context(|| format!("Cannot format '{}'", iso))?;
        println!("{label}");
    }
    Ok(())
}

fn cmd_mailto(config: Option<&Path>, name: String, email: String, message: String) -> Result<()> {
    let config = load_config(config)?;
    let fields = ContactFields {
        name,
        email,
        message,
    };

    match validate(&fields) {
        Ok(contact) => {
            println!("{}", mailto_uri(&config.contact.recipient, &contact));
            Ok(())
        }
        Err(err) => anyhow::bail!("{}", err),
    }
}

fn cmd_config(path: Option<&Path>) -> Result<()> {
    let config = load_config(path)?;
    if path.is_none() {
        info!("No configuration file given, showing defaults");
    }
    print!("{}", config.to_toml_string()?);
    Ok(())
}
