use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::catalog::store::ProductCatalog;
use crate::cli::{load_catalog, load_rules, tsv_cell, OutputFormat, StatusArg};
use crate::core::types::SafetyStatus;
use crate::matching::classifier::SafetyClassifier;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List all products in the catalog with their safety status
    List {
        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Path to custom rule table file
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Only list products with this status
        #[arg(long, value_enum)]
        status: Option<StatusArg>,

        /// Filter by brand (case-insensitive substring)
        #[arg(long)]
        brand: Option<String>,
    },

    /// Show details of a product by its stored code
    Show {
        /// Product code, exactly as stored in the catalog
        #[arg(required = true)]
        code: String,

        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Export the catalog to a file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        /// Path to custom catalog file to export (defaults to embedded)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

/// Execute catalog subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the product is not
/// found, or the export file cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List {
            catalog,
            rules,
            status,
            brand,
        } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let classifier = SafetyClassifier::new(load_rules(rules.as_deref())?);
            if verbose {
                eprintln!("Loaded catalog with {} products", catalog.len());
            }
            list_products(
                &catalog,
                &classifier,
                status.map(SafetyStatus::from),
                brand.as_deref(),
                format,
            )
        }
        CatalogCommands::Show { code, catalog } => {
            let catalog = load_catalog(catalog.as_deref())?;
            show_product(&catalog, &code, format)
        }
        CatalogCommands::Export { output, catalog } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let json = catalog.to_json()?;
            std::fs::write(&output, json)?;
            eprintln!(
                "Exported {} products to {}",
                catalog.len(),
                output.display()
            );
            Ok(())
        }
    }
}

fn list_products(
    catalog: &ProductCatalog,
    classifier: &SafetyClassifier,
    status: Option<SafetyStatus>,
    brand: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let brand = brand.map(str::to_lowercase);

    let rows: Vec<_> = catalog
        .products
        .iter()
        .filter(|p| {
            brand
                .as_deref()
                .map_or(true, |b| p.brand.to_lowercase().contains(b))
        })
        .map(|p| (p, classifier.classify(p)))
        .filter(|(_, verdict)| status.map_or(true, |s| verdict.status == s))
        .collect();

    match format {
        OutputFormat::Text => {
            println!("{:<16} {:<8} {:<30} BRAND", "CODE", "STATUS", "NAME");
            println!("{}", "-".repeat(70));
            for (product, verdict) in &rows {
                println!(
                    "{:<16} {:<8} {:<30} {}",
                    product.code,
                    verdict.status.to_string(),
                    product.display_name(),
                    product.brand
                );
            }
            println!("\nTotal: {} products", rows.len());
        }
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = rows
                .iter()
                .map(|(product, verdict)| {
                    serde_json::json!({
                        "code": product.code,
                        "name": product.name,
                        "brand": product.brand,
                        "status": verdict.status,
                        "has_ingredient_data": verdict.has_ingredient_data,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("code\tstatus\tname\tbrand");
            for (product, verdict) in &rows {
                println!(
                    "{}\t{}\t{}\t{}",
                    tsv_cell(&product.code),
                    verdict.status,
                    tsv_cell(&product.name),
                    tsv_cell(&product.brand)
                );
            }
        }
    }

    Ok(())
}

fn show_product(catalog: &ProductCatalog, code: &str, format: OutputFormat) -> anyhow::Result<()> {
    let product = catalog
        .get(code)
        .ok_or_else(|| anyhow::anyhow!("Product '{code}' not found in catalog"))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(product)?);
        }
        OutputFormat::Text | OutputFormat::Tsv => {
            println!("Code: {}", product.code);
            println!("Name: {}", product.display_name());
            println!("Brand: {}", product.brand);
            println!(
                "Ingredients: {}",
                product.ingredients_text().unwrap_or("(none)")
            );
            if !product.additive_tags().is_empty() {
                println!("Additives: {}", product.additive_tags());
            }
            if let Some(grade) = &product.nutri_score_grade {
                println!("Nutri-Score: {}", grade.to_uppercase());
            }
            if let Some(nova) = &product.nova_group {
                println!("NOVA group: {nova}");
            }
            if let Some(alert) = &product.alert_note {
                println!("Alert: {alert}");
            }
            if let Some(note) = &product.recommended_note {
                println!("Recommended: {note}");
            }
        }
    }

    Ok(())
}
