use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::types::RiskTier;
use crate::utils::text::normalize;

/// Terms that make a product unsafe during pregnancy
pub const UNSAFE_TERMS: &[&str] = &[
    "ibuprofen",
    "isotretinoin",
    "combiflam",
    "isotroin",
    "aspirin",
    "naproxen",
    "warfarin",
    "misoprostol",
    "methotrexate",
    "tetracycline",
    "doxycycline",
    "ciprofloxacin",
    "alcohol",
    "msg",
    "monosodium glutamate",
    "e621",
    "e627",
    "e631",
    "e110",
    "e102",
    "e133",
];

/// Terms that call for limited consumption during pregnancy
pub const CAUTION_TERMS: &[&str] = &[
    "caffeine",
    "aspartame",
    "sodium benzoate",
    "citric acid",
    "e330",
    "331",
    "high fructose corn syrup",
    "palm oil",
    "sorbitol",
    "xylitol",
    "trans fat",
    "hydrogenated oil",
    "partially hydrogenated oil",
    "stabilizer 440",
    "artificial flavouring",
    "rose flavour",
    "active culture",
    "acidity regulators",
    "e211",
];

/// Rule file version for compatibility checking
pub const RULES_VERSION: &str = "1.0.0";

#[derive(Error, Debug)]
pub enum RuleError {
    #[error("Failed to read rules: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse rules: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Rule {index} ('{term}') is empty after normalization and would match every product")]
    EmptyTerm { index: usize, term: String },
}

/// A single term and the tier it assigns when found
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawTermRule")]
pub struct TermRule {
    term: String,
    pub tier: RiskTier,

    #[serde(skip)]
    normalized: String,
}

/// Wire form of a rule; normalization happens on conversion
#[derive(Deserialize)]
struct RawTermRule {
    term: String,
    tier: RiskTier,
}

impl From<RawTermRule> for TermRule {
    fn from(raw: RawTermRule) -> Self {
        Self::new(raw.term, raw.tier)
    }
}

impl TermRule {
    pub fn new(term: impl Into<String>, tier: RiskTier) -> Self {
        let term = term.into();
        let normalized = normalize(&term);
        Self {
            term,
            tier,
            normalized,
        }
    }

    /// The term as written in the rule table
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    #[must_use]
    pub fn normalized_term(&self) -> &str {
        &self.normalized
    }

    /// Whether the normalized term occurs anywhere in a normalized corpus
    #[must_use]
    pub fn matches(&self, corpus: &str) -> bool {
        corpus.contains(self.normalized.as_str())
    }
}

/// Serializable rule file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleTableData {
    pub version: String,
    pub rules: Vec<TermRule>,
}

/// Ordered table mapping terms to risk tiers.
///
/// Order matters: matched terms are reported in table order within each tier.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<TermRule>,
}

impl RuleTable {
    /// The built-in pregnancy rule table: all unsafe terms, then all caution terms
    #[must_use]
    pub fn builtin() -> Self {
        let unsafe_rules = UNSAFE_TERMS
            .iter()
            .map(|term| TermRule::new(*term, RiskTier::Unsafe));
        let caution_rules = CAUTION_TERMS
            .iter()
            .map(|term| TermRule::new(*term, RiskTier::Caution));
        Self {
            rules: unsafe_rules.chain(caution_rules).collect(),
        }
    }

    /// Build a table from rules.
    ///
    /// # Errors
    ///
    /// Returns `RuleError::EmptyTerm` if a term normalizes to the empty string.
    pub fn from_rules(rules: impl IntoIterator<Item = TermRule>) -> Result<Self, RuleError> {
        let mut table = Vec::new();
        for (index, rule) in rules.into_iter().enumerate() {
            if rule.normalized.is_empty() {
                return Err(RuleError::EmptyTerm {
                    index,
                    term: rule.term,
                });
            }
            table.push(rule);
        }
        Ok(Self { rules: table })
    }

    /// Load a rule table from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, RuleError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a rule table from a JSON string
    pub fn from_json(json: &str) -> Result<Self, RuleError> {
        let data: RuleTableData = serde_json::from_str(json)?;

        if data.version != RULES_VERSION {
            tracing::warn!(
                "Rules version mismatch (expected {}, found {})",
                RULES_VERSION,
                data.version
            );
        }

        Self::from_rules(data.rules)
    }

    /// Export the table to JSON
    pub fn to_json(&self) -> Result<String, RuleError> {
        let data = RuleTableData {
            version: RULES_VERSION.to_string(),
            rules: self.rules.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    #[must_use]
    pub fn rules(&self) -> &[TermRule] {
        &self.rules
    }

    /// Rules of one tier, in table order
    pub fn tier(&self, tier: RiskTier) -> impl Iterator<Item = &TermRule> {
        self.rules.iter().filter(move |rule| rule.tier == tier)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::builtin()
    }
}
