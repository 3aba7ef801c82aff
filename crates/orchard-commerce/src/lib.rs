//! Catalog filtering and combo pricing for the Orchard storefront.
//!
//! This crate works over a product list already fetched from the backend's
//! listing endpoint and held in memory:
//!
//! - **Catalog**: Products, variants, categories, nutrition facts
//! - **Search**: Facet derivation, filter state, predicate engine, sorting
//! - **Combo**: Custom combo selection, tiered discount, creation payload
//!
//! Everything here is synchronous and side-effect free apart from `tracing`
//! events; callers own the mutable references to filter state and selections.
//!
//! # Example
//!
//! ```rust
//! use orchard_commerce::prelude::*;
//!
//! let catalog = Catalog::from_json_str(r#"[
//!     {"id": "p1", "name": "Xoài sấy dẻo", "variant": [
//!         {"productVariantId": "v1", "packageType": "Zip bag", "netWeight": 250,
//!          "price": 100000, "stockQuantity": 8}
//!     ]}
//! ]"#).unwrap();
//!
//! let facets = build_facets(catalog.products());
//! let filters = FilterState::from_facets(&facets).with_search("xoai");
//! let matched = apply_filters(catalog.products(), &filters, SortKey::Popular);
//! assert_eq!(matched.len(), 1);
//!
//! let mut combo = ComboSelection::new();
//! for _ in 0..5 {
//!     combo.add(matched[0], &VariantId::new("v1")).unwrap();
//! }
//! let pricing = combo.pricing();
//! assert_eq!(pricing.discount_percentage, 6);
//! assert_eq!(pricing.total.display(), "470.000 \u{20ab}");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod combo;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{
        Catalog, CategoryRef, Nutrient, NutrientValue, NutritionFacts, Product, ProductVariant,
        Promotion,
    };

    // Search
    pub use crate::search::{
        apply_filters, build_facets, count_active_filters, Facets, FilterAction, FilterState,
        SortKey, ValueRange,
    };

    // Combo
    pub use crate::combo::{
        price, ComboAction, ComboLineItem, ComboPricingResult, ComboSelection, CreateComboPayload,
        DiscountTier, DiscountTiers,
    };
}
