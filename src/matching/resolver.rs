use serde::{Deserialize, Serialize};

use crate::catalog::store::ProductCatalog;
use crate::core::product::ProductRecord;
use crate::utils::text::{char_len, strip_leading_zeros};

/// Minimum stored-code length for the loose (suffix / substring) tiers
pub const MIN_LOOSE_CODE_LEN: usize = 3;

/// Scanned codes must be longer than this for the suffix tier
pub const SUFFIX_MIN_INPUT_LEN: usize = 3;

/// Scanned codes must be longer than this for the substring tier
pub const SUBSTRING_MIN_INPUT_LEN: usize = 6;

/// One step of the resolution cascade.
///
/// Each strategy scans the whole catalog and takes the first record in
/// catalog order that matches. The loose tiers do not disambiguate between
/// several matching records: two unrelated products sharing a short numeric
/// suffix resolve to whichever comes first in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Stored code equals the scanned code
    Exact,
    /// Stored code equals the scanned code without leading zeros
    ZeroStripped,
    /// Scanned code ends with the trimmed stored code
    Suffix,
    /// Scanned code contains the trimmed stored code
    Substring,
}

impl MatchStrategy {
    /// The full cascade, tightest first
    pub const CASCADE: [Self; 4] = [Self::Exact, Self::ZeroStripped, Self::Suffix, Self::Substring];

    /// Whether this strategy is allowed to run for a scanned code.
    ///
    /// Lengths are counted in Unicode scalar values (`chars`), not bytes or
    /// UTF-16 code units. Input containing characters outside the Basic
    /// Multilingual Plane therefore counts shorter here than it would as a
    /// UTF-16 length; barcode payloads are ASCII in practice.
    #[must_use]
    pub fn applies_to(self, code: &str) -> bool {
        match self {
            Self::Exact | Self::ZeroStripped => true,
            Self::Suffix => char_len(code) > SUFFIX_MIN_INPUT_LEN,
            Self::Substring => char_len(code) > SUBSTRING_MIN_INPUT_LEN,
        }
    }

    /// Whether `record` matches the (already trimmed) scanned code
    #[must_use]
    pub fn matches(self, code: &str, record: &ProductRecord) -> bool {
        match self {
            Self::Exact => record.code == code,
            Self::ZeroStripped => record.code == strip_leading_zeros(code),
            Self::Suffix => {
                let short = record.code.trim();
                char_len(short) >= MIN_LOOSE_CODE_LEN && code.ends_with(short)
            }
            Self::Substring => {
                let short = record.code.trim();
                char_len(short) >= MIN_LOOSE_CODE_LEN && code.contains(short)
            }
        }
    }
}

impl std::fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::ZeroStripped => write!(f, "zero-stripped"),
            Self::Suffix => write!(f, "suffix"),
            Self::Substring => write!(f, "substring"),
        }
    }
}

/// Configuration for the resolver
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Strategies to try, in order
    pub strategies: Vec<MatchStrategy>,
}

impl ResolverConfig {
    /// Only the exact and zero-stripped tiers
    #[must_use]
    pub fn strict() -> Self {
        Self {
            strategies: vec![MatchStrategy::Exact, MatchStrategy::ZeroStripped],
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            strategies: MatchStrategy::CASCADE.to_vec(),
        }
    }
}

/// A scanned code resolved to a catalog record
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    /// The matched product
    pub record: &'a ProductRecord,

    /// Strategy that produced the match
    pub strategy: MatchStrategy,

    /// Position of the record in the catalog
    pub index: usize,
}

/// Resolves raw scanned codes against the catalog
pub struct CatalogResolver<'a> {
    catalog: &'a ProductCatalog,
    config: ResolverConfig,
}

impl<'a> CatalogResolver<'a> {
    /// Create a resolver running the full cascade
    pub fn new(catalog: &'a ProductCatalog) -> Self {
        Self {
            catalog,
            config: ResolverConfig::default(),
        }
    }

    /// Create a resolver with a custom strategy list
    pub fn with_config(catalog: &'a ProductCatalog, config: ResolverConfig) -> Self {
        Self { catalog, config }
    }

    /// Resolve a raw scanned code; the first strategy that yields any match wins.
    ///
    /// Returns `None` when the cascade is exhausted, which is an ordinary
    /// outcome ("product not in catalog"), not a failure.
    pub fn resolve(&self, raw_code: &str) -> Option<Resolution<'a>> {
        let code = raw_code.trim();

        let found = self
            .config
            .strategies
            .iter()
            .find_map(|&strategy| self.resolve_trimmed(strategy, code));

        match &found {
            Some(resolution) => tracing::debug!(
                scanned = code,
                matched = %resolution.record.code,
                strategy = %resolution.strategy,
                "resolved scanned code"
            ),
            None => tracing::debug!(scanned = code, "no catalog match"),
        }

        found
    }

    /// Run a single strategy against the catalog, ignoring the configured cascade
    pub fn resolve_with(&self, strategy: MatchStrategy, raw_code: &str) -> Option<Resolution<'a>> {
        self.resolve_trimmed(strategy, raw_code.trim())
    }

    fn resolve_trimmed(&self, strategy: MatchStrategy, code: &str) -> Option<Resolution<'a>> {
        if !strategy.applies_to(code) {
            return None;
        }

        let catalog: &'a ProductCatalog = self.catalog;
        catalog
            .products
            .iter()
            .enumerate()
            .find(|(_, record)| strategy.matches(code, record))
            .map(|(index, record)| Resolution {
                record,
                strategy,
                index,
            })
    }

    /// Strategies this resolver tries, in order
    #[must_use]
    pub fn strategies(&self) -> &[MatchStrategy] {
        &self.config.strategies
    }
}
