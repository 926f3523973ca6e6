use std::path::PathBuf;

use clap::Args;

use crate::cli::{load_catalog, load_rules, tsv_cell, OutputFormat};
use crate::core::product::ProductRecord;
use crate::matching::classifier::{SafetyClassifier, SafetyVerdict};
use crate::matching::resolver::ResolverConfig;
use crate::matching::scanner::{headline, ProductScanner, ScanOutcome};

#[derive(Args)]
pub struct ScanArgs {
    /// Scanned code(s)
    /// Use '-' to read one code per line from stdin
    #[arg(required = true)]
    pub codes: Vec<String>,

    /// Path to custom catalog file
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Path to custom rule table file
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Only accept exact or zero-stripped code matches
    #[arg(long)]
    pub exact_only: bool,
}

/// Execute scan subcommand
///
/// A code that is not in the catalog is reported, not treated as an error.
///
/// # Errors
///
/// Returns an error if the catalog or rules cannot be loaded, or stdin cannot be read.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ScanArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let codes = collect_codes(&args.codes)?;

    let catalog = load_catalog(args.catalog.as_deref())?;
    let rules = load_rules(args.rules.as_deref())?;

    if verbose {
        eprintln!(
            "Loaded catalog with {} products and {} rules",
            catalog.len(),
            rules.len()
        );
    }

    if catalog.is_empty() {
        eprintln!("Warning: Catalog is empty, no products to match against.");
    }

    let config = if args.exact_only {
        ResolverConfig::strict()
    } else {
        ResolverConfig::default()
    };

    let classifier = SafetyClassifier::new(rules);
    let scanner = ProductScanner::with_config(&catalog, &classifier, config);
    let outcomes: Vec<ScanOutcome<'_>> = codes.iter().map(|code| scanner.scan(code)).collect();

    match format {
        OutputFormat::Text => print_text_results(&outcomes, verbose),
        OutputFormat::Json => print_json_results(&outcomes)?,
        OutputFormat::Tsv => print_tsv_results(&outcomes),
    }

    Ok(())
}

fn collect_codes(codes: &[String]) -> anyhow::Result<Vec<String>> {
    use std::io::{self, BufRead};

    if codes.len() == 1 && codes[0] == "-" {
        let mut from_stdin = Vec::new();
        for line in io::stdin().lock().lines() {
            let line = line?;
            if !line.trim().is_empty() {
                from_stdin.push(line);
            }
        }
        return Ok(from_stdin);
    }

    Ok(codes.to_vec())
}

fn print_text_results(outcomes: &[ScanOutcome<'_>], verbose: bool) {
    for (i, outcome) in outcomes.iter().enumerate() {
        if i > 0 {
            println!("\n{}", "─".repeat(60));
        }

        println!("\nScanned Code: {}", outcome.scanned_code);

        let Some(found) = &outcome.found else {
            println!("   Product not found in catalog");
            continue;
        };

        let record = found.resolution.record;
        print_product(record);
        println!(
            "   Matched: {} ({} match)",
            record.code, found.resolution.strategy
        );

        println!("\n   {}", headline(&found.verdict));
        print_verdict_terms(&found.verdict);

        if verbose {
            println!("   Catalog position: {}", found.resolution.index);
        }
    }

    println!();
}

fn print_product(record: &ProductRecord) {
    if record.brand.is_empty() {
        println!("   Product: {}", record.display_name());
    } else {
        println!("   Product: {} ({})", record.display_name(), record.brand);
    }

    if let Some(grade) = &record.nutri_score_grade {
        println!("   Nutri-Score: {}", grade.to_uppercase());
    }
    if let Some(nova) = &record.nova_group {
        println!("   NOVA group: {nova}");
    }
    if let Some(alert) = record.alert_note.as_deref().filter(|s| !s.is_empty()) {
        println!("   Alert: {alert}");
    }
    if let Some(note) = record.recommended_note.as_deref().filter(|s| !s.is_empty()) {
        println!("   Recommended: {note}");
    }
    if let Some(text) = record.ingredients_text().filter(|s| !s.trim().is_empty()) {
        println!("   Ingredients: {text}");
    }
    if !record.additive_tags().is_empty() {
        println!("   Additives: {}", record.additive_tags());
    }
}

fn print_verdict_terms(verdict: &SafetyVerdict) {
    if !verdict.matched_unsafe_terms.is_empty() {
        println!(
            "   Contains unsafe ingredients: {}",
            verdict.matched_unsafe_terms.join(", ")
        );
    }
    if !verdict.matched_caution_terms.is_empty() {
        println!(
            "   Contains ingredients to limit: {}",
            verdict.matched_caution_terms.join(", ")
        );
    }
}

fn print_json_results(outcomes: &[ScanOutcome<'_>]) -> anyhow::Result<()> {
    let reports: Vec<_> = outcomes.iter().map(ScanOutcome::to_report).collect();
    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}

fn print_tsv_results(outcomes: &[ScanOutcome<'_>]) {
    println!(
        "scanned_code\tfound\tmatched_code\tstrategy\tname\tbrand\tstatus\tunsafe_terms\tcaution_terms\thas_ingredient_data"
    );
    for outcome in outcomes {
        match &outcome.found {
            Some(found) => {
                let record = found.resolution.record;
                let verdict = &found.verdict;
                println!(
                    "{}\ttrue\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    tsv_cell(&outcome.scanned_code),
                    tsv_cell(&record.code),
                    found.resolution.strategy,
                    tsv_cell(&record.name),
                    tsv_cell(&record.brand),
                    verdict.status,
                    tsv_cell(&verdict.matched_unsafe_terms.join(",")),
                    tsv_cell(&verdict.matched_caution_terms.join(",")),
                    verdict.has_ingredient_data,
                );
            }
            None => println!("{}\tfalse\t\t\t\t\t\t\t\t", tsv_cell(&outcome.scanned_code)),
        }
    }
}
