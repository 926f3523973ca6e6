use serde::Serialize;

use crate::catalog::store::ProductCatalog;
use crate::core::product::ProductRecord;
use crate::core::types::SafetyStatus;
use crate::matching::classifier::{SafetyClassifier, SafetyVerdict};
use crate::matching::resolver::{CatalogResolver, MatchStrategy, Resolution, ResolverConfig};

/// A resolved product together with its verdict
#[derive(Debug, Clone)]
pub struct IdentifiedProduct<'a> {
    pub resolution: Resolution<'a>,
    pub verdict: SafetyVerdict,
}

/// Result of one scan.
///
/// A verdict exists exactly when a product was resolved; `found: None` means
/// the product is not in the catalog, which is different from a `Safe` verdict.
#[derive(Debug, Clone)]
pub struct ScanOutcome<'a> {
    /// The scanned code after trimming
    pub scanned_code: String,
    pub found: Option<IdentifiedProduct<'a>>,
}

impl ScanOutcome<'_> {
    #[must_use]
    pub fn is_found(&self) -> bool {
        self.found.is_some()
    }

    #[must_use]
    pub fn verdict(&self) -> Option<&SafetyVerdict> {
        self.found.as_ref().map(|f| &f.verdict)
    }

    /// Owned, serializable form of this outcome
    #[must_use]
    pub fn to_report(&self) -> ScanReport {
        let found = self.found.as_ref();
        ScanReport {
            scanned_code: self.scanned_code.clone(),
            found: found.is_some(),
            match_strategy: found.map(|f| f.resolution.strategy),
            headline: found.map(|f| headline(&f.verdict)),
            product: found.map(|f| f.resolution.record.clone()),
            verdict: found.map(|f| f.verdict.clone()),
        }
    }
}

/// Headline for a verdict, qualifying `Safe` when there was nothing to inspect
#[must_use]
pub fn headline(verdict: &SafetyVerdict) -> String {
    if verdict.status == SafetyStatus::Safe && !verdict.has_ingredient_data {
        "No ingredient data; nothing unsafe found".to_string()
    } else {
        verdict.status.headline().to_string()
    }
}

/// Serializable scan result shared by the CLI and the HTTP API
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub scanned_code: String,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_strategy: Option<MatchStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<SafetyVerdict>,
}

/// Resolve-then-classify pipeline
pub struct ProductScanner<'a> {
    resolver: CatalogResolver<'a>,
    classifier: &'a SafetyClassifier,
}

impl<'a> ProductScanner<'a> {
    pub fn new(catalog: &'a ProductCatalog, classifier: &'a SafetyClassifier) -> Self {
        Self {
            resolver: CatalogResolver::new(catalog),
            classifier,
        }
    }

    pub fn with_config(
        catalog: &'a ProductCatalog,
        classifier: &'a SafetyClassifier,
        config: ResolverConfig,
    ) -> Self {
        Self {
            resolver: CatalogResolver::with_config(catalog, config),
            classifier,
        }
    }

    /// Scan one raw code
    pub fn scan(&self, raw_code: &str) -> ScanOutcome<'a> {
        let scanned_code = raw_code.trim().to_string();
        let found = self.resolver.resolve(&scanned_code).map(|resolution| {
            let verdict = self.classifier.classify(resolution.record);
            tracing::debug!(
                code = %resolution.record.code,
                status = %verdict.status,
                "classified product"
            );
            IdentifiedProduct {
                resolution,
                verdict,
            }
        });

        ScanOutcome {
            scanned_code,
            found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embedded() -> ProductCatalog {
        ProductCatalog::load_embedded().unwrap()
    }

    #[test]
    fn test_scan_found_has_verdict() {
        let catalog = embedded();
        let classifier = SafetyClassifier::default();
        let scanner = ProductScanner::new(&catalog, &classifier);

        let outcome = scanner.scan(" 8901030895567 ");
        assert_eq!(outcome.scanned_code, "8901030895567");
        let found = outcome.found.as_ref().unwrap();
        assert_eq!(found.resolution.strategy, MatchStrategy::Exact);
        assert_eq!(found.verdict.status, SafetyStatus::Unsafe);
        assert_eq!(found.verdict.matched_unsafe_terms, vec!["msg", "e621"]);
    }

    #[test]
    fn test_scan_not_found_has_no_verdict() {
        let catalog = embedded();
        let classifier = SafetyClassifier::default();
        let scanner = ProductScanner::new(&catalog, &classifier);

        let outcome = scanner.scan("12");
        assert!(!outcome.is_found());
        assert!(outcome.verdict().is_none());

        let report = outcome.to_report();
        assert!(!report.found);
        assert!(report.verdict.is_none());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json, serde_json::json!({"scanned_code": "12", "found": false}));
    }

    #[test]
    fn test_scan_with_symbology_prefix() {
        let catalog = embedded();
        let classifier = SafetyClassifier::default();
        let scanner = ProductScanner::new(&catalog, &classifier);

        let outcome = scanner.scan("]E08901764012273");
        let found = outcome.found.unwrap();
        assert_eq!(found.resolution.strategy, MatchStrategy::Suffix);
        assert_eq!(found.resolution.record.brand, "Coca-Cola");
        assert_eq!(found.verdict.status, SafetyStatus::Caution);
    }

    #[test]
    fn test_report_json_shape() {
        let catalog = embedded();
        let classifier = SafetyClassifier::default();
        let scanner = ProductScanner::new(&catalog, &classifier);

        let report = scanner.scan("8901058851298").to_report();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["found"], true);
        assert_eq!(json["match_strategy"], "exact");
        assert_eq!(json["headline"], "Consume with caution during pregnancy");
        assert_eq!(json["product"]["brands"], "Maggi");
        assert_eq!(json["verdict"]["status"], "caution");
        assert_eq!(
            json["verdict"]["matched_caution_terms"],
            serde_json::json!(["palm oil", "acidity regulators"])
        );
    }

    #[test]
    fn test_headline_for_missing_data() {
        let catalog = embedded();
        let classifier = SafetyClassifier::default();
        let scanner = ProductScanner::new(&catalog, &classifier);

        let report = scanner.scan("8906017290016").to_report();
        assert_eq!(
            report.headline.as_deref(),
            Some("No ingredient data; nothing unsafe found")
        );
        assert_eq!(report.verdict.unwrap().status, SafetyStatus::Safe);
    }

    #[test]
    fn test_strict_scanner() {
        let catalog = embedded();
        let classifier = SafetyClassifier::default();
        let scanner = ProductScanner::with_config(&catalog, &classifier, ResolverConfig::strict());

        assert!(!scanner.scan("]E08901764012273").is_found());
        assert!(scanner.scan("008901764012273").is_found());
    }
}
