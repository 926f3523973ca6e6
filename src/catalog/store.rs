use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::product::ProductRecord;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Catalog root must be an array of products or an object with a 'products' array")]
    InvalidLayout,
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Serializable catalog format used for exports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    #[serde(default)]
    pub created_at: String,
    pub products: Vec<ProductRecord>,
}

/// The static product catalog.
///
/// Products are kept in dataset order and searched linearly; there is no index
/// by code because codes are neither unique nor consistently padded.
#[derive(Debug, Default)]
pub struct ProductCatalog {
    /// All known products, in catalog order
    pub products: Vec<ProductRecord>,
}

impl ProductCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the embedded default catalog
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Validated at compile time by build.rs
        const EMBEDDED_CATALOG: &str = include_str!("../../catalogs/products.json");
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load catalog from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse catalog from JSON string.
    ///
    /// Accepts either a bare array of products (the dataset layout) or the
    /// versioned object written by [`ProductCatalog::to_json`].
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let value: serde_json::Value = serde_json::from_str(json)?;

        let products: Vec<ProductRecord> = match value {
            serde_json::Value::Array(_) => serde_json::from_value(value)?,
            serde_json::Value::Object(_) => {
                let data: CatalogData = serde_json::from_value(value)?;
                // Version check (warn but don't fail)
                if data.version != CATALOG_VERSION {
                    tracing::warn!(
                        "Catalog version mismatch (expected {}, found {})",
                        CATALOG_VERSION,
                        data.version
                    );
                }
                data.products
            }
            _ => return Err(CatalogError::InvalidLayout),
        };

        let mut catalog = Self::new();
        for product in products {
            catalog.add_product(product);
        }
        Ok(catalog)
    }

    /// Add a product to the end of the catalog
    pub fn add_product(&mut self, mut product: ProductRecord) {
        product.rebuild_corpus();
        self.products.push(product);
    }

    /// First product whose stored code equals `code` exactly
    pub fn get(&self, code: &str) -> Option<&ProductRecord> {
        self.products.iter().find(|p| p.code == code)
    }

    /// Export catalog to JSON
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            products: self.products.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of products in catalog
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl FromIterator<ProductRecord> for ProductCatalog {
    fn from_iter<I: IntoIterator<Item = ProductRecord>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for product in iter {
            catalog.add_product(product);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::product::AdditiveTags;

    #[test]
    fn test_load_embedded_catalog() {
        let catalog = ProductCatalog::load_embedded().unwrap();
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_catalog_get_by_code() {
        let catalog = ProductCatalog::load_embedded().unwrap();

        let soup = catalog.get("8901030895567");
        assert!(soup.is_some());
        let soup = soup.unwrap();
        assert_eq!(soup.brand, "Knorr");
        assert!(soup.ingredients_text().is_some());
    }

    #[test]
    fn test_catalog_get_nonexistent() {
        let catalog = ProductCatalog::load_embedded().unwrap();
        assert!(catalog.get("0000000000000").is_none());
    }

    #[test]
    fn test_from_json_bare_array() {
        let catalog = ProductCatalog::from_json(
            r#"[
                {"code": "111", "product_name": "A", "ingredients_text": "Caffeine"},
                {"code": 222, "product_name": "B", "additives_tags": "en:e621"}
            ]"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.products[1].code, "222");
        assert_eq!(catalog.products[0].search_corpus(), "caffeine ");
    }

    #[test]
    fn test_from_json_versioned_object() {
        let catalog = ProductCatalog::from_json(
            r#"{"version": "1.0.0", "created_at": "2025-01-01T00:00:00Z",
                "products": [{"code": "111", "product_name": "A"}]}"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_from_json_rejects_scalar_root() {
        let result = ProductCatalog::from_json("42");
        assert!(matches!(result, Err(CatalogError::InvalidLayout)));
    }

    #[test]
    fn test_from_json_rejects_invalid_json() {
        let result = ProductCatalog::from_json("[{\"code\": ");
        assert!(matches!(result, Err(CatalogError::ParseError(_))));
    }

    #[test]
    fn test_catalog_to_json_round_trips() {
        let catalog: ProductCatalog = vec![ProductRecord::new("123", "Cola")
            .with_ingredients("water, caffeine")
            .with_additive_tags(AdditiveTags::Sequence(vec!["en:e150d".to_string()]))]
        .into_iter()
        .collect();
        let json = catalog.to_json().unwrap();

        assert!(json.contains("\"version\""));
        assert!(json.contains("\"products\""));

        let reloaded = ProductCatalog::from_json(&json).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(
            reloaded.products[0].search_corpus(),
            catalog.products[0].search_corpus()
        );
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"code": "999", "product_name": "Water"}}]"#).unwrap();

        let catalog = ProductCatalog::load_from_file(file.path()).unwrap();
        assert_eq!(catalog.get("999").unwrap().name, "Water");
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = ProductCatalog::load_from_file(Path::new("/nonexistent/catalog.json"));
        assert!(matches!(result, Err(CatalogError::ReadError(_))));
    }
}
