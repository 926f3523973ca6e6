//! Product catalog storage.
//!
//! The catalog is a static list of products with barcodes, names, ingredient
//! text and additive tags. An embedded catalog is compiled into the binary,
//! but custom catalogs can also be loaded from JSON files.
//!
//! ## Example
//!
//! ```rust,no_run
//! use maa_scan::ProductCatalog;
//!
//! // Load embedded catalog
//! let catalog = ProductCatalog::load_embedded().unwrap();
//!
//! for product in &catalog.products {
//!     println!("{} {}", product.code, product.display_name());
//! }
//!
//! // Exact lookup by stored code
//! let soup = catalog.get("8901030895567");
//! ```
//!
//! ## Custom Catalogs
//!
//! A custom catalog is either a bare JSON array of products, or the versioned
//! object produced by exporting:
//!
//! ```rust,no_run
//! use maa_scan::ProductCatalog;
//! use std::path::Path;
//!
//! let catalog = ProductCatalog::load_embedded().unwrap();
//! let json = catalog.to_json().unwrap();
//!
//! let custom = ProductCatalog::load_from_file(Path::new("my_products.json")).unwrap();
//! ```

pub mod store;
