//! Facet derivation over the full catalog.

use crate::catalog::Product;
use crate::money::Money;
use crate::search::ValueRange;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Filter dimensions observed in a product list.
///
/// Term lists keep first-encounter order. Ranges span every variant of every
/// product and collapse to `[0, 0]` when there are no variants at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    pub categories: Vec<String>,
    pub package_types: Vec<String>,
    pub tags: Vec<String>,
    pub price_range: ValueRange<Money>,
    pub weight_range: ValueRange<f64>,
}

impl Facets {
    /// Whether the catalog exposed any variant to derive ranges from.
    pub fn has_ranges(&self) -> bool {
        !(self.price_range == ValueRange::default() && self.weight_range == ValueRange::default())
    }
}

/// Collects distinct terms in first-seen order.
#[derive(Default)]
struct TermCollector {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl TermCollector {
    fn push(&mut self, term: &str) {
        if !self.seen.contains(term) {
            self.seen.insert(term.to_string());
            self.ordered.push(term.to_string());
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

/// Derive facets from `products` in a single pass over products and variants.
pub fn build_facets(products: &[Product]) -> Facets {
    let mut categories = TermCollector::default();
    let mut package_types = TermCollector::default();
    let mut tags = TermCollector::default();
    let mut price_range: Option<ValueRange<Money>> = None;
    let mut weight_range: Option<ValueRange<f64>> = None;

    for product in products {
        for category in &product.categories {
            categories.push(&category.name);
        }
        for tag in product.tags.iter().flatten() {
            tags.push(tag);
        }
        for variant in &product.variant {
            package_types.push(&variant.package_type);

            match price_range.as_mut() {
                Some(range) => range.include(variant.price),
                None => price_range = Some(ValueRange::point(variant.price)),
            }

            // NaN weights would poison the fold.
            if variant.net_weight.is_finite() {
                match weight_range.as_mut() {
                    Some(range) => range.include(variant.net_weight),
                    None => weight_range = Some(ValueRange::point(variant.net_weight)),
                }
            }
        }
    }

    let facets = Facets {
        categories: categories.into_vec(),
        package_types: package_types.into_vec(),
        tags: tags.into_vec(),
        price_range: price_range.unwrap_or_default(),
        weight_range: weight_range.unwrap_or_default(),
    };

    tracing::debug!(
        products = products.len(),
        categories = facets.categories.len(),
        package_types = facets.package_types.len(),
        tags = facets.tags.len(),
        "facets built"
    );

    facets
}
