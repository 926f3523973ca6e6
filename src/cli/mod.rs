//! Command-line interface for maa-scan.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **scan**: Resolve scanned barcodes and classify pregnancy safety
//! - **catalog**: List, show, or export products from the catalog
//! - **rules**: List or export the ingredient rule table
//! - **serve**: Start the HTTP API
//!
//! ## Usage
//!
//! ```text
//! # Scan a barcode against the embedded catalog
//! maa-scan scan 8901030895567
//!
//! # Pipe codes from a scanner, one per line
//! cat codes.txt | maa-scan scan -
//!
//! # JSON output for scripting
//! maa-scan scan 8901030895567 --format json
//!
//! # Use a custom catalog and rule table
//! maa-scan scan 8901030895567 --catalog products.json --rules rules.json
//!
//! # Start the HTTP API
//! maa-scan serve --port 8080
//! ```

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::catalog::store::ProductCatalog;
use crate::core::types::{RiskTier, SafetyStatus};
use crate::matching::rules::RuleTable;

pub mod catalog;
pub mod rules;
pub mod scan;

#[derive(Parser)]
#[command(name = "maa-scan")]
#[command(author = "MaaCare")]
#[command(version)]
#[command(about = "Identify scanned products and check their pregnancy safety")]
#[command(
    long_about = "maa-scan looks up a scanned product barcode in a product catalog and checks its ingredients and additives for terms that are unsafe or call for caution during pregnancy.\n\nScanned codes are matched with fallbacks for scanner noise:\n- Exact code\n- Leading zeros stripped\n- Catalog code as a suffix or substring of a longer scanned code"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve scanned codes and classify each product
    Scan(scan::ScanArgs),

    /// Inspect the product catalog
    Catalog(catalog::CatalogArgs),

    /// Inspect the ingredient rule table
    Rules(rules::RulesArgs),

    /// Start the HTTP API
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Path to custom catalog file
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Path to custom rule table file
    #[arg(long)]
    pub rules: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum StatusArg {
    Safe,
    Caution,
    Unsafe,
}

impl From<StatusArg> for SafetyStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Safe => Self::Safe,
            StatusArg::Caution => Self::Caution,
            StatusArg::Unsafe => Self::Unsafe,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum TierArg {
    Unsafe,
    Caution,
}

impl From<TierArg> for RiskTier {
    fn from(arg: TierArg) -> Self {
        match arg {
            TierArg::Unsafe => Self::Unsafe,
            TierArg::Caution => Self::Caution,
        }
    }
}

/// Load a custom catalog, or the embedded one when no path is given
///
/// # Errors
///
/// Returns an error if the catalog file cannot be read or parsed.
pub fn load_catalog(path: Option<&Path>) -> anyhow::Result<ProductCatalog> {
    let catalog = match path {
        Some(path) => ProductCatalog::load_from_file(path)?,
        None => ProductCatalog::load_embedded()?,
    };
    Ok(catalog)
}

/// Load a custom rule table, or the built-in one when no path is given
///
/// # Errors
///
/// Returns an error if the rules file cannot be read, parsed, or validated.
pub fn load_rules(path: Option<&Path>) -> anyhow::Result<RuleTable> {
    let rules = match path {
        Some(path) => RuleTable::load_from_file(path)?,
        None => RuleTable::builtin(),
    };
    Ok(rules)
}

/// Make dataset text safe for a single TSV cell.
///
/// Tabs and line breaks in scraped product text would otherwise split the
/// row, so each is replaced with a space.
pub(crate) fn tsv_cell(text: &str) -> Cow<'_, str> {
    if text.contains(['\t', '\n', '\r']) {
        Cow::Owned(text.replace(['\t', '\n', '\r'], " "))
    } else {
        Cow::Borrowed(text)
    }
}
