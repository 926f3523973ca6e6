use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::{load_rules, tsv_cell, OutputFormat, TierArg};
use crate::core::types::RiskTier;
use crate::matching::rules::{RuleTable, TermRule};

#[derive(Args)]
pub struct RulesArgs {
    #[command(subcommand)]
    pub command: RulesCommands,
}

#[derive(Subcommand)]
pub enum RulesCommands {
    /// List the terms checked during classification
    List {
        /// Path to custom rule table file
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Only list terms of this tier
        #[arg(long, value_enum)]
        tier: Option<TierArg>,
    },

    /// Export the rule table to a file (a starting point for custom rules)
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        /// Path to custom rule table file to export (defaults to built-in)
        #[arg(long)]
        rules: Option<PathBuf>,
    },
}

/// Execute rules subcommand
///
/// # Errors
///
/// Returns an error if the rules cannot be loaded or the export file cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: RulesArgs, format: OutputFormat, _verbose: bool) -> anyhow::Result<()> {
    match args.command {
        RulesCommands::List { rules, tier } => {
            let table = load_rules(rules.as_deref())?;
            list_rules(&table, tier.map(RiskTier::from), format)
        }
        RulesCommands::Export { output, rules } => {
            let table = load_rules(rules.as_deref())?;
            std::fs::write(&output, table.to_json()?)?;
            eprintln!("Exported {} rules to {}", table.len(), output.display());
            Ok(())
        }
    }
}

fn list_rules(table: &RuleTable, tier: Option<RiskTier>, format: OutputFormat) -> anyhow::Result<()> {
    let rules: Vec<&TermRule> = table
        .rules()
        .iter()
        .filter(|rule| tier.map_or(true, |t| rule.tier == t))
        .collect();

    match format {
        OutputFormat::Text => {
            for t in [RiskTier::Unsafe, RiskTier::Caution] {
                let terms: Vec<&str> = rules
                    .iter()
                    .filter(|rule| rule.tier == t)
                    .map(|rule| rule.term())
                    .collect();
                if terms.is_empty() {
                    continue;
                }
                println!("{} ({} terms):", t.to_string().to_uppercase(), terms.len());
                for term in terms {
                    println!("   {term}");
                }
                println!();
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rules)?);
        }
        OutputFormat::Tsv => {
            println!("term\ttier\tnormalized");
            for rule in rules {
                println!(
                    "{}\t{}\t{}",
                    tsv_cell(rule.term()),
                    rule.tier,
                    rule.normalized_term()
                );
            }
        }
    }

    Ok(())
}
