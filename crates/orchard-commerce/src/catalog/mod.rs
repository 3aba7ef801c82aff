//! Product catalog module.
//!
//! Contains the product, variant, category and nutrition types the backend
//! serves from its product listing, plus the in-memory catalog snapshot.

mod category;
mod nutrition;
mod product;
mod snapshot;

pub use category::CategoryRef;
pub use nutrition::{Nutrient, NutrientValue, NutritionFacts};
pub use product::{Product, ProductVariant, Promotion};
pub use snapshot::Catalog;
