//! Core data types for product resolution and safety classification.
//!
//! - [`ProductRecord`]: a catalog entry with its ingredient and additive data
//! - [`AdditiveTags`]: the list / string / absent shapes additive data comes in
//! - [`SafetyStatus`], [`RiskTier`]: verdict and rule tiers
//!
//! ## Catalog Data
//!
//! Catalog records come from a scraped product dataset with no schema
//! guarantees. Deserialization is forgiving:
//!
//! | Field | Accepted |
//! |-------|----------|
//! | `code` | string or number |
//! | `product_name`, `brands` | string, number or `null` |
//! | `additives_tags` | list of strings, single string, anything else = absent |
//! | `nova_group`, `nutriscore_grade` | string or number |

pub mod product;
pub mod types;

pub use product::{AdditiveTags, ProductRecord};
pub use types::{RiskTier, SafetyStatus};
