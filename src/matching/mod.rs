//! Barcode resolution and pregnancy-safety classification.
//!
//! This module provides the core scanning functionality:
//!
//! - [`CatalogResolver`]: resolves a noisy scanned code to a catalog record
//! - [`SafetyClassifier`]: derives a [`SafetyVerdict`] from ingredient text
//! - [`ProductScanner`]: runs resolve-then-classify for one scan
//!
//! ## Resolution Cascade
//!
//! Strategies are tried in order and the first one that yields a match wins:
//!
//! 1. **Exact**: stored code equals the trimmed scanned code
//! 2. **Zero-stripped**: leading zeros removed from the scanned code
//! 3. **Suffix**: scanned code (over 3 chars) ends with the stored code
//! 4. **Substring**: scanned code (over 6 chars) contains the stored code
//!
//! Within a tier the first record in catalog order wins.
//!
//! ## Classification
//!
//! Ingredient text and additive tags are normalized (lower-cased, whitespace,
//! `-`, `_` and `.` removed) and searched for every term of a [`RuleTable`].
//! Any unsafe term makes the product `Unsafe`; otherwise any caution term makes
//! it `Caution`; otherwise it is `Safe`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use maa_scan::{ProductCatalog, ProductScanner, SafetyClassifier};
//!
//! let catalog = ProductCatalog::load_embedded().unwrap();
//! let classifier = SafetyClassifier::default();
//! let scanner = ProductScanner::new(&catalog, &classifier);
//!
//! let outcome = scanner.scan("8901030895567");
//! match &outcome.found {
//!     Some(found) => println!(
//!         "{}: {:?} {:?}",
//!         found.resolution.record.display_name(),
//!         found.verdict.status,
//!         found.verdict.matched_unsafe_terms
//!     ),
//!     None => println!("Product not found in catalog"),
//! }
//! ```

pub mod classifier;
pub mod resolver;
pub mod rules;
pub mod scanner;

pub use classifier::{SafetyClassifier, SafetyVerdict};
pub use resolver::{CatalogResolver, MatchStrategy, Resolution, ResolverConfig};
pub use rules::{RuleTable, TermRule};
pub use scanner::{ProductScanner, ScanOutcome, ScanReport};
