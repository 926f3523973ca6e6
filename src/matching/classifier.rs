use serde::{Deserialize, Serialize};

use crate::core::product::ProductRecord;
use crate::core::types::{RiskTier, SafetyStatus};
use crate::matching::rules::RuleTable;

/// Pregnancy-safety verdict for a resolved product.
///
/// A `Safe` status means no rule term was found in the product's text. When
/// `has_ingredient_data` is false there was no text to inspect, so `Safe`
/// only says that nothing unsafe was found, not that the product is confirmed
/// safe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyVerdict {
    /// Dominant tier among the matched terms
    pub status: SafetyStatus,

    /// Unsafe-tier terms found, in rule-table order
    pub matched_unsafe_terms: Vec<String>,

    /// Caution-tier terms found, in rule-table order
    pub matched_caution_terms: Vec<String>,

    /// Whether the product had any ingredient or additive text
    pub has_ingredient_data: bool,
}

impl SafetyVerdict {
    /// Terms that determined the status (unsafe terms for `Unsafe`, etc.)
    #[must_use]
    pub fn rationale(&self) -> &[String] {
        match self.status {
            SafetyStatus::Unsafe => &self.matched_unsafe_terms,
            SafetyStatus::Caution => &self.matched_caution_terms,
            SafetyStatus::Safe => &[],
        }
    }
}

/// Classifies products against a term rule table
#[derive(Debug, Clone, Default)]
pub struct SafetyClassifier {
    rules: RuleTable,
}

impl SafetyClassifier {
    pub fn new(rules: RuleTable) -> Self {
        Self { rules }
    }

    /// Classify a product from its ingredient text and additive tags
    #[must_use]
    pub fn classify(&self, record: &ProductRecord) -> SafetyVerdict {
        self.classify_corpus(&record.search_corpus())
    }

    /// Classify an already-normalized search corpus
    #[must_use]
    pub fn classify_corpus(&self, corpus: &str) -> SafetyVerdict {
        let matched_unsafe_terms = self.matched_terms(corpus, RiskTier::Unsafe);
        let matched_caution_terms = self.matched_terms(corpus, RiskTier::Caution);

        let status = if !matched_unsafe_terms.is_empty() {
            SafetyStatus::Unsafe
        } else if !matched_caution_terms.is_empty() {
            SafetyStatus::Caution
        } else {
            SafetyStatus::Safe
        };

        SafetyVerdict {
            status,
            matched_unsafe_terms,
            matched_caution_terms,
            has_ingredient_data: corpus.chars().any(|c| !c.is_whitespace()),
        }
    }

    fn matched_terms(&self, corpus: &str, tier: RiskTier) -> Vec<String> {
        self.rules
            .tier(tier)
            .filter(|rule| rule.matches(corpus))
            .map(|rule| rule.term().to_string())
            .collect()
    }

    #[must_use]
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }
}
