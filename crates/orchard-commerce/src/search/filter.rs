//! Filter state edited by the storefront sidebar.

use crate::catalog::Nutrient;
use crate::money::Money;
use crate::search::{Facets, ValueRange};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Slider extents the sidebar offers for each nutrient, per 100 g.
///
/// A constrained nutrient counts as an active filter only when it is narrower
/// than its baseline. Nutrients without a baseline never count.
pub const NUTRITION_BASELINE: [(Nutrient, ValueRange<f64>); 2] = [
    (Nutrient::Protein, ValueRange { min: 0.0, max: 5.0 }),
    (
        Nutrient::Carbs,
        ValueRange {
            min: 0.0,
            max: 40.0,
        },
    ),
];

/// The complete set of sidebar selections.
///
/// A plain value: every edit produces a new state through
/// [`FilterState::reduce`] or the `with_*` builders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Selected category names (match any).
    pub categories: BTreeSet<String>,
    /// Selected tags (match any).
    pub tags: BTreeSet<String>,
    /// Selected package types (a variant must match one).
    pub package_types: BTreeSet<String>,
    /// Inclusive variant price window.
    pub price_range: ValueRange<Money>,
    /// Inclusive variant weight window, in grams.
    pub weight_range: ValueRange<f64>,
    /// Only variants with an active promotion.
    pub has_promotion: bool,
    /// Only variants with stock on hand.
    pub in_stock: bool,
    /// Free-text query over names and package types.
    pub search_query: String,
    /// Per-nutrient windows. Nutrients absent from the map are unconstrained.
    pub nutrition_range: BTreeMap<Nutrient, ValueRange<f64>>,
}

/// One discrete sidebar edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterAction {
    ToggleCategory(String),
    ToggleTag(String),
    TogglePackageType(String),
    SetPriceRange(Money, Money),
    SetWeightRange(f64, f64),
    SetHasPromotion(bool),
    SetInStock(bool),
    SetSearchQuery(String),
    SetNutritionRange(Nutrient, f64, f64),
    ClearNutritionRange(Nutrient),
    /// Back to the defaults derived from the facets.
    Reset,
}

impl FilterState {
    /// The do-nothing state for a catalog: empty selections, full observed
    /// ranges, flags off.
    pub fn from_facets(facets: &Facets) -> Self {
        Self {
            categories: BTreeSet::new(),
            tags: BTreeSet::new(),
            package_types: BTreeSet::new(),
            price_range: facets.price_range,
            weight_range: facets.weight_range,
            has_promotion: false,
            in_stock: false,
            search_query: String::new(),
            nutrition_range: BTreeMap::new(),
        }
    }

    /// Apply one edit, returning the new state. `facets` supplies the
    /// defaults for [`FilterAction::Reset`].
    pub fn reduce(&self, action: FilterAction, facets: &Facets) -> FilterState {
        let mut next = self.clone();
        match action {
            FilterAction::ToggleCategory(name) => toggle(&mut next.categories, name),
            FilterAction::ToggleTag(tag) => toggle(&mut next.tags, tag),
            FilterAction::TogglePackageType(package) => toggle(&mut next.package_types, package),
            FilterAction::SetPriceRange(a, b) => next.price_range = ValueRange::ordered(a, b),
            FilterAction::SetWeightRange(a, b) => next.weight_range = ValueRange::ordered(a, b),
            FilterAction::SetHasPromotion(on) => next.has_promotion = on,
            FilterAction::SetInStock(on) => next.in_stock = on,
            FilterAction::SetSearchQuery(query) => next.search_query = query,
            FilterAction::SetNutritionRange(nutrient, a, b) => {
                next.nutrition_range
                    .insert(nutrient, ValueRange::ordered(a, b));
            }
            FilterAction::ClearNutritionRange(nutrient) => {
                next.nutrition_range.remove(&nutrient);
            }
            FilterAction::Reset => next = FilterState::from_facets(facets),
        }
        next
    }

    /// Add a category to the selection.
    pub fn with_category(mut self, name: impl Into<String>) -> Self {
        self.categories.insert(name.into());
        self
    }

    /// Add a tag to the selection.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Add a package type to the selection.
    pub fn with_package_type(mut self, package: impl Into<String>) -> Self {
        self.package_types.insert(package.into());
        self
    }

    pub fn with_price_range(mut self, min: Money, max: Money) -> Self {
        self.price_range = ValueRange::ordered(min, max);
        self
    }

    pub fn with_weight_range(mut self, min: f64, max: f64) -> Self {
        self.weight_range = ValueRange::ordered(min, max);
        self
    }

    pub fn with_promotion_only(mut self) -> Self {
        self.has_promotion = true;
        self
    }

    pub fn with_in_stock_only(mut self) -> Self {
        self.in_stock = true;
        self
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    pub fn with_nutrition_range(mut self, nutrient: Nutrient, min: f64, max: f64) -> Self {
        self.nutrition_range
            .insert(nutrient, ValueRange::ordered(min, max));
        self
    }

    /// The query as matched: surrounding whitespace removed.
    pub fn effective_query(&self) -> &str {
        self.search_query.trim()
    }
}

fn toggle(set: &mut BTreeSet<String>, value: String) {
    if !set.remove(&value) {
        set.insert(value);
    }
}
