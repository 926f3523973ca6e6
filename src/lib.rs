//! # maa-scan
//!
//! A library for identifying scanned grocery and pharmacy products and
//! checking whether they are safe during pregnancy.
//!
//! Barcode scanners are noisy: they report symbology prefixes, extra check
//! digits, or leading zero padding that the product catalog does not store.
//! `maa-scan` resolves the raw scanned string against a static catalog with a
//! cascade of increasingly loose strategies, then inspects the product's
//! ingredient text and additive tags for terms that are unsafe or call for
//! caution during pregnancy.
//!
//! ## Features
//!
//! - **Resolution cascade**: exact, zero-stripped, suffix, then substring matching
//! - **Format-insensitive terms**: "E-621", "e621" and "e 621" all match
//! - **Tri-state verdicts**: `Safe`, `Caution`, `Unsafe`, with the matched terms
//! - **Rule tables as data**: the built-in term lists can be replaced from JSON
//! - **Forgiving catalog loading**: list, string or missing additive tags
//!
//! ## Example
//!
//! ```rust,no_run
//! use maa_scan::{ProductCatalog, ProductScanner, SafetyClassifier};
//!
//! // Load the embedded product catalog
//! let catalog = ProductCatalog::load_embedded().unwrap();
//! let classifier = SafetyClassifier::default();
//! let scanner = ProductScanner::new(&catalog, &classifier);
//!
//! // A scanner reporting the code with a symbology prefix
//! let outcome = scanner.scan("]E08901030895567");
//!
//! if let Some(found) = &outcome.found {
//!     println!("{} via {}", found.resolution.record.display_name(), found.resolution.strategy);
//!     println!("{:?}: {:?}", found.verdict.status, found.verdict.matched_unsafe_terms);
//! }
//! ```
//!
//! A `Safe` verdict means no listed term was found. Check
//! [`SafetyVerdict::has_ingredient_data`] before presenting it as confirmed
//! safety: a product with no ingredient text is also `Safe`.
//!
//! ## Modules
//!
//! - [`catalog`]: Product catalog storage
//! - [`core`]: Product records and verdict tiers
//! - [`matching`]: Resolver, classifier, rule table and scan pipeline
//! - [`utils`]: Text normalization
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: HTTP API

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use catalog::store::ProductCatalog;
pub use core::product::{AdditiveTags, ProductRecord};
pub use core::types::*;
pub use matching::classifier::{SafetyClassifier, SafetyVerdict};
pub use matching::resolver::{CatalogResolver, MatchStrategy, Resolution, ResolverConfig};
pub use matching::rules::{RuleTable, TermRule};
pub use matching::scanner::{ProductScanner, ScanOutcome, ScanReport};
