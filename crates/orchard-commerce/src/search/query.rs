//! Filter predicate evaluation and result ordering.

use crate::catalog::{Product, ProductVariant};
use crate::money::Money;
use crate::search::{normalize_search_text, Facets, FilterState, NUTRITION_BASELINE};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort options for the product grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Most units sold first.
    #[default]
    Popular,
    /// Listing order. The catalog carries no creation timestamp.
    Newest,
    /// Sort by first-variant price, low to high.
    #[serde(alias = "priceAsc")]
    PriceAsc,
    /// Sort by first-variant price, high to low.
    #[serde(alias = "priceDesc")]
    PriceDesc,
    /// Highest rated first.
    Rating,
    /// Most units sold first.
    #[serde(alias = "bestSelling")]
    BestSelling,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Popular,
        SortKey::Newest,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::Rating,
        SortKey::BestSelling,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Popular => "popular",
            SortKey::Newest => "newest",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::Rating => "rating",
            SortKey::BestSelling => "best-selling",
        }
    }

    /// Parse a sort key. Accepts the kebab-case names and the storefront's
    /// camelCase query values (`priceAsc`).
    pub fn from_str(s: &str) -> Option<Self> {
        let folded: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match folded.as_str() {
            "popular" => Some(SortKey::Popular),
            "newest" => Some(SortKey::Newest),
            "priceasc" => Some(SortKey::PriceAsc),
            "pricedesc" => Some(SortKey::PriceDesc),
            "rating" => Some(SortKey::Rating),
            "bestselling" => Some(SortKey::BestSelling),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Popular => "Popular",
            SortKey::Newest => "Newest",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
            SortKey::Rating => "Highest Rated",
            SortKey::BestSelling => "Best Selling",
        }
    }
}

/// Products matching every active constraint in `filters`, ordered by `sort`.
///
/// Pure: the same inputs always give the same members in the same order.
pub fn apply_filters<'a>(
    products: &'a [Product],
    filters: &FilterState,
    sort: SortKey,
) -> Vec<&'a Product> {
    let query = normalize_search_text(filters.effective_query());
    let mut matched: Vec<&Product> = products
        .iter()
        .filter(|p| matches_product(p, filters, &query))
        .collect();

    sort_products(&mut matched, sort);

    tracing::debug!(
        total = products.len(),
        matched = matched.len(),
        sort = sort.as_str(),
        "filters applied"
    );

    matched
}

/// Number of facets that differ from their do-nothing default, for the
/// sidebar badge.
pub fn count_active_filters(filters: &FilterState, bounds: &Facets) -> usize {
    let mut count = [
        !filters.categories.is_empty(),
        !filters.tags.is_empty(),
        !filters.package_types.is_empty(),
        filters.price_range.is_narrower_than(&bounds.price_range),
        filters.weight_range.is_narrower_than(&bounds.weight_range),
        filters.has_promotion,
        filters.in_stock,
        !filters.effective_query().is_empty(),
    ]
    .into_iter()
    .filter(|active| *active)
    .count();

    for (nutrient, baseline) in &NUTRITION_BASELINE {
        if let Some(range) = filters.nutrition_range.get(nutrient) {
            if range.is_narrower_than(baseline) {
                count += 1;
            }
        }
    }

    count
}

/// `query` is already normalized; empty means no text constraint.
fn matches_product(product: &Product, filters: &FilterState, query: &str) -> bool {
    if !query.is_empty() && !matches_query(product, query) {
        return false;
    }

    if !filters.categories.is_empty()
        && !product
            .categories
            .iter()
            .any(|c| filters.categories.contains(&c.name))
    {
        return false;
    }

    if !filters.tags.is_empty() {
        let tagged = product
            .tags
            .as_ref()
            .map(|tags| tags.iter().any(|t| filters.tags.contains(t)))
            .unwrap_or(false);
        if !tagged {
            return false;
        }
    }

    if !product.variant.iter().any(|v| matches_variant(v, filters)) {
        return false;
    }

    matches_nutrition(product, filters)
}

fn matches_query(product: &Product, query: &str) -> bool {
    normalize_search_text(&product.name).contains(query)
        || product
            .variant
            .iter()
            .any(|v| normalize_search_text(&v.package_type).contains(query))
}

fn matches_variant(variant: &ProductVariant, filters: &FilterState) -> bool {
    (filters.package_types.is_empty() || filters.package_types.contains(&variant.package_type))
        && filters.price_range.contains(variant.price)
        && filters.weight_range.contains(variant.net_weight)
        && (!filters.has_promotion || variant.is_on_promotion())
        && (!filters.in_stock || variant.is_in_stock())
}

/// Products without nutrition facts are never excluded here.
fn matches_nutrition(product: &Product, filters: &FilterState) -> bool {
    let Some(facts) = product.nutrition_facts.as_ref() else {
        return true;
    };

    filters
        .nutrition_range
        .iter()
        .all(|(nutrient, range)| range.contains(facts.value(*nutrient)))
}

fn listing_price(product: &Product) -> Option<Money> {
    product.first_variant().map(ProductVariant::effective_price)
}

fn sort_products(products: &mut [&Product], sort: SortKey) {
    match sort {
        SortKey::Popular | SortKey::BestSelling => {
            products.sort_by(|a, b| b.quantity_sold.cmp(&a.quantity_sold));
        }
        SortKey::PriceAsc => products.sort_by(|a, b| by_price(a, b, false)),
        SortKey::PriceDesc => products.sort_by(|a, b| by_price(a, b, true)),
        SortKey::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::Newest => {}
    }
}

/// Price order with variant-less products last in both directions.
fn by_price(a: &Product, b: &Product, descending: bool) -> Ordering {
    match (listing_price(a), listing_price(b)) {
        (Some(pa), Some(pb)) if descending => pb.cmp(&pa),
        (Some(pa), Some(pb)) => pa.cmp(&pb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CategoryRef, Nutrient, NutritionFacts};
    use crate::search::{build_facets, ValueRange};
    use rust_decimal::Decimal;

    fn variant(id: &str, package: &str, weight: f64, price: i64) -> ProductVariant {
        ProductVariant::new(id, package, weight, Money::from_units(price)).with_stock(5)
    }

    fn catalog() -> Vec<Product> {
        let mut mango = Product::new("p1", "Xoài sấy dẻo")
            .with_variant(variant("p1-a", "Zip bag", 250.0, 100))
            .with_variant(
                variant("p1-b", "Hũ thủy tinh", 500.0, 500)
                    .with_promotion(Money::from_units(450), Decimal::from(10)),
            );
        mango.add_category(CategoryRef::new("c1", "Tropical"));
        mango.add_tag("organic");
        mango.quantity_sold = 30;
        mango.rating = 4.2;
        mango.nutrition_facts = Some(NutritionFacts {
            protein: Some(2.0.into()),
            carbs: Some("60g".into()),
            ..Default::default()
        });

        let mut cashew = Product::new("p2", "Hạt điều rang muối")
            .with_variant(variant("p2-a", "Gift box", 1000.0, 1000).with_stock(0));
        cashew.add_category(CategoryRef::new("c2", "Nuts"));
        cashew.quantity_sold = 80;
        cashew.rating = 4.8;
        cashew.nutrition_facts = Some(NutritionFacts {
            protein: Some(18.0.into()),
            carbs: Some(30.0.into()),
            ..Default::default()
        });

        let mut raisin = Product::new("p3", "Nho khô")
            .with_variant(variant("p3-a", "Zip bag", 200.0, 300));
        raisin.add_category(CategoryRef::new("c3", "Berries"));
        raisin.add_tag("vegan");
        raisin.quantity_sold = 55;
        raisin.rating = 3.9;

        vec![mango, cashew, raisin]
    }

    fn defaults(products: &[Product]) -> FilterState {
        FilterState::from_facets(&build_facets(products))
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_default_state_keeps_everything() {
        let products = catalog();
        let result = apply_filters(&products, &defaults(&products), SortKey::Newest);
        assert_eq!(ids(&result), vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn test_empty_catalog() {
        let products: Vec<Product> = Vec::new();
        let state = defaults(&products).with_search("anything").with_in_stock_only();
        assert!(apply_filters(&products, &state, SortKey::PriceAsc).is_empty());
    }

    #[test]
    fn test_search_is_accent_insensitive() {
        let products = catalog();
        let state = defaults(&products).with_search("HAT DIEU");
        assert_eq!(
            ids(&apply_filters(&products, &state, SortKey::Newest)),
            vec!["p2"]
        );
    }

    #[test]
    fn test_search_matches_package_type() {
        let products = catalog();
        let state = defaults(&products).with_search("thuy tinh");
        assert_eq!(
            ids(&apply_filters(&products, &state, SortKey::Newest)),
            vec!["p1"]
        );
    }

    #[test]
    fn test_whitespace_query_is_ignored() {
        let products = catalog();
        let state = defaults(&products).with_search("   ");
        assert_eq!(apply_filters(&products, &state, SortKey::Newest).len(), 3);
    }

    #[test]
    fn test_category_filter_matches_any() {
        let products = catalog();
        let state = defaults(&products).with_category("Nuts").with_category("Berries");
        assert_eq!(
            ids(&apply_filters(&products, &state, SortKey::Newest)),
            vec!["p2", "p3"]
        );
    }

    #[test]
    fn test_tag_filter_excludes_untagged() {
        let products = catalog();
        let state = defaults(&products).with_tag("organic");
        assert_eq!(
            ids(&apply_filters(&products, &state, SortKey::Newest)),
            vec!["p1"]
        );
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let products = catalog();
        let all =
            defaults(&products).with_price_range(Money::from_units(100), Money::from_units(1000));
        assert_eq!(apply_filters(&products, &all, SortKey::Newest).len(), 3);

        // p1 still qualifies through its 500 variant.
        let raised = all.clone().with_price_range(Money::from_units(101), Money::from_units(1000));
        assert_eq!(
            ids(&apply_filters(&products, &raised, SortKey::Newest)),
            vec!["p1", "p2", "p3"]
        );

        let narrow = all.with_price_range(Money::from_units(101), Money::from_units(499));
        assert_eq!(
            ids(&apply_filters(&products, &narrow, SortKey::Newest)),
            vec!["p3"]
        );
    }

    #[test]
    fn test_variant_constraints_must_hold_together() {
        let products = catalog();
        // p1's promoted variant is a 500 g jar; no promoted zip bag exists.
        let state = defaults(&products)
            .with_promotion_only()
            .with_package_type("Zip bag");
        assert!(apply_filters(&products, &state, SortKey::Newest).is_empty());

        let state = defaults(&products).with_promotion_only().with_weight_range(400.0, 600.0);
        assert_eq!(
            ids(&apply_filters(&products, &state, SortKey::Newest)),
            vec!["p1"]
        );
    }

    #[test]
    fn test_in_stock_filter() {
        let products = catalog();
        let state = defaults(&products).with_in_stock_only();
        assert_eq!(
            ids(&apply_filters(&products, &state, SortKey::Newest)),
            vec!["p1", "p3"]
        );
    }

    #[test]
    fn test_nutrition_range_is_inclusive_and_skips_missing_facts() {
        let products = catalog();
        let state = defaults(&products).with_nutrition_range(Nutrient::Protein, 0.0, 5.0);
        // p2 has 18 g protein; p3 has no nutrition facts and passes.
        assert_eq!(
            ids(&apply_filters(&products, &state, SortKey::Newest)),
            vec!["p1", "p3"]
        );

        let state = defaults(&products).with_nutrition_range(Nutrient::Carbs, 60.0, 60.0);
        assert_eq!(
            ids(&apply_filters(&products, &state, SortKey::Newest)),
            vec!["p1", "p3"]
        );
    }

    #[test]
    fn test_variantless_product_never_matches() {
        let mut products = catalog();
        products.push(Product::new("p4", "Empty"));
        let result = apply_filters(&products, &defaults(&products), SortKey::Newest);
        assert!(!ids(&result).contains(&"p4".to_string()));
    }

    #[test]
    fn test_reversed_range_yields_nothing() {
        let products = catalog();
        let mut state = defaults(&products);
        state.weight_range = ValueRange::new(900.0, 100.0);
        assert!(apply_filters(&products, &state, SortKey::Newest).is_empty());
    }

    #[test]
    fn test_sorting() {
        let products = catalog();
        let state = defaults(&products);
        assert_eq!(
            ids(&apply_filters(&products, &state, SortKey::Popular)),
            vec!["p2", "p3", "p1"]
        );
        assert_eq!(
            ids(&apply_filters(&products, &state, SortKey::BestSelling)),
            vec!["p2", "p3", "p1"]
        );
        assert_eq!(
            ids(&apply_filters(&products, &state, SortKey::Rating)),
            vec!["p2", "p1", "p3"]
        );
        // First-variant effective prices: p1 100, p2 1000, p3 300.
        assert_eq!(
            ids(&apply_filters(&products, &state, SortKey::PriceAsc)),
            vec!["p1", "p3", "p2"]
        );
        assert_eq!(
            ids(&apply_filters(&products, &state, SortKey::PriceDesc)),
            vec!["p2", "p3", "p1"]
        );
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let mut products = catalog();
        for p in &mut products {
            p.quantity_sold = 1;
        }
        let result = apply_filters(&products, &defaults(&products), SortKey::Popular);
        assert_eq!(ids(&result), vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn test_count_active_filters() {
        let products = catalog();
        let facets = build_facets(&products);
        let base = FilterState::from_facets(&facets);
        assert_eq!(count_active_filters(&base, &facets), 0);

        let busy = base
            .clone()
            .with_category("Nuts")
            .with_tag("organic")
            .with_package_type("Jar")
            .with_price_range(Money::from_units(200), Money::from_units(1000))
            .with_weight_range(200.0, 900.0)
            .with_promotion_only()
            .with_in_stock_only()
            .with_search("xoai")
            .with_nutrition_range(Nutrient::Protein, 1.0, 5.0)
            .with_nutrition_range(Nutrient::Carbs, 0.0, 20.0);
        assert_eq!(count_active_filters(&busy, &facets), 10);
    }

    #[test]
    fn test_count_ignores_baseline_and_unbadged_nutrients() {
        let products = catalog();
        let facets = build_facets(&products);
        let state = FilterState::from_facets(&facets)
            .with_nutrition_range(Nutrient::Protein, 0.0, 5.0)
            .with_nutrition_range(Nutrient::Carbs, 0.0, 80.0)
            .with_nutrition_range(Nutrient::Calories, 0.0, 100.0)
            .with_search("  ");
        assert_eq!(count_active_filters(&state, &facets), 0);
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!(SortKey::from_str("price-asc"), Some(SortKey::PriceAsc));
        assert_eq!(SortKey::from_str("priceDesc"), Some(SortKey::PriceDesc));
        assert_eq!(
            SortKey::from_str("best_selling"),
            Some(SortKey::BestSelling)
        );
        assert_eq!(SortKey::from_str("cheapest"), None);
        for key in SortKey::ALL {
            assert_eq!(SortKey::from_str(key.as_str()), Some(key));
        }
    }

    #[test]
    fn test_sort_key_deserializes_both_spellings() {
        for (raw, key) in [
            ("\"price-asc\"", SortKey::PriceAsc),
            ("\"priceAsc\"", SortKey::PriceAsc),
            ("\"priceDesc\"", SortKey::PriceDesc),
            ("\"bestSelling\"", SortKey::BestSelling),
            ("\"newest\"", SortKey::Newest),
        ] {
            assert_eq!(serde_json::from_str::<SortKey>(raw).unwrap(), key);
        }
        assert_eq!(
            serde_json::to_string(&SortKey::PriceAsc).unwrap(),
            "\"price-asc\""
        );
    }
}
