//! Property tests for the facet builder, filter engine and discount tiers.

use orchard_commerce::prelude::*;
use proptest::prelude::*;
use rust_decimal::Decimal;

const PACKAGES: [&str; 3] = ["Túi zip", "Hũ thủy tinh", "Hộp quà"];
const CATEGORIES: [&str; 3] = ["Tropical", "Nuts", "Berries"];
const TAGS: [&str; 3] = ["organic", "vegan", "roasted"];

fn arb_variant(id: usize) -> impl Strategy<Value = ProductVariant> {
    (
        0..PACKAGES.len(),
        50u32..2000,
        1_000i64..500_000,
        prop::option::of(1u32..60),
        0u32..20,
    )
        .prop_map(move |(package, weight, price, promo, stock)| {
            let mut variant = ProductVariant::new(
                format!("v{id}"),
                PACKAGES[package],
                f64::from(weight),
                Money::from_units(price),
            )
            .with_stock(stock);
            if let Some(pct) = promo {
                let pct = Decimal::from(pct);
                let base = Money::from_units(price);
                let promo_price = base - base.percentage(pct);
                variant = variant.with_promotion(promo_price, pct);
            }
            variant
        })
}

fn arb_product(id: usize) -> impl Strategy<Value = Product> {
    (
        prop::collection::vec(arb_variant(0), 0..4),
        prop::collection::vec(0..CATEGORIES.len(), 0..3),
        prop::collection::vec(0..TAGS.len(), 0..3),
        0u64..1000,
        0u32..50,
        prop::option::of((0u32..30, 0u32..90)),
    )
        .prop_map(move |(variants, categories, tags, sold, rating, facts)| {
            let mut product = Product::new(format!("p{id}"), format!("Sản phẩm {id}"));
            for (n, mut variant) in variants.into_iter().enumerate() {
                variant.product_variant_id = VariantId::new(format!("p{id}-v{n}"));
                product = product.with_variant(variant);
            }
            for c in categories {
                product.add_category(CategoryRef::new(format!("c{c}"), CATEGORIES[c]));
            }
            for t in tags {
                product.add_tag(TAGS[t]);
            }
            product.quantity_sold = sold;
            product.rating = f64::from(rating) / 10.0;
            product.nutrition_facts = facts.map(|(protein, carbs)| NutritionFacts {
                protein: Some(f64::from(protein).into()),
                carbs: Some(f64::from(carbs).into()),
                ..Default::default()
            });
            product
        })
}

fn arb_catalog() -> impl Strategy<Value = Vec<Product>> {
    (0usize..12).prop_flat_map(|n| (0..n).map(arb_product).collect::<Vec<_>>())
}

fn ids(products: &[&Product]) -> Vec<String> {
    products.iter().map(|p| p.id.to_string()).collect()
}

proptest! {
    #[test]
    fn prop_facets_are_deterministic(catalog in arb_catalog()) {
        let first = build_facets(&catalog);
        let second = build_facets(&catalog);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.price_range.min <= first.price_range.max);
        prop_assert!(first.weight_range.min <= first.weight_range.max);

        let json = serde_json::to_string(&first).unwrap();
        prop_assert!(!json.contains("null"));
        prop_assert!(!json.contains("inf"));
    }

    #[test]
    fn prop_default_state_keeps_every_product_with_variants(catalog in arb_catalog()) {
        let facets = build_facets(&catalog);
        let state = FilterState::from_facets(&facets);
        let result = apply_filters(&catalog, &state, SortKey::Newest);

        let expected: Vec<&Product> = catalog.iter().filter(|p| !p.variant.is_empty()).collect();
        prop_assert_eq!(ids(&result), ids(&expected));
        prop_assert_eq!(count_active_filters(&state, &facets), 0);
    }

    #[test]
    fn prop_adding_constraints_never_grows_results(
        catalog in arb_catalog(),
        category in 0..CATEGORIES.len(),
        package in 0..PACKAGES.len(),
        in_stock in any::<bool>(),
        promo in any::<bool>(),
    ) {
        let facets = build_facets(&catalog);
        let base = FilterState::from_facets(&facets);
        let before = apply_filters(&catalog, &base, SortKey::Popular).len();

        let mut narrowed = base.with_category(CATEGORIES[category]);
        let after_category = apply_filters(&catalog, &narrowed, SortKey::Popular).len();
        prop_assert!(after_category <= before);

        narrowed = narrowed.with_package_type(PACKAGES[package]);
        let after_package = apply_filters(&catalog, &narrowed, SortKey::Popular).len();
        prop_assert!(after_package <= after_category);

        if in_stock {
            narrowed = narrowed.with_in_stock_only();
        }
        if promo {
            narrowed = narrowed.with_promotion_only();
        }
        let after_flags = apply_filters(&catalog, &narrowed, SortKey::Popular).len();
        prop_assert!(after_flags <= after_package);

        narrowed = narrowed.with_nutrition_range(Nutrient::Protein, 0.0, 5.0);
        prop_assert!(apply_filters(&catalog, &narrowed, SortKey::Popular).len() <= after_flags);
    }

    #[test]
    fn prop_sort_only_reorders(catalog in arb_catalog()) {
        let facets = build_facets(&catalog);
        let state = FilterState::from_facets(&facets);
        let mut reference = ids(&apply_filters(&catalog, &state, SortKey::Newest));
        reference.sort();

        for sort in SortKey::ALL {
            let mut sorted = ids(&apply_filters(&catalog, &state, sort));
            sorted.sort();
            prop_assert_eq!(&sorted, &reference);
        }
    }

    #[test]
    fn prop_price_sort_is_ascending(catalog in arb_catalog()) {
        let facets = build_facets(&catalog);
        let state = FilterState::from_facets(&facets);
        let result = apply_filters(&catalog, &state, SortKey::PriceAsc);
        let prices: Vec<Money> = result
            .iter()
            .filter_map(|p| p.first_variant().map(ProductVariant::effective_price))
            .collect();
        prop_assert!(prices.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn prop_discount_never_decreases_with_quantity(q in 0u32..200) {
        let tiers = DiscountTiers::standard();
        prop_assert!(tiers.percentage_for(q) <= tiers.percentage_for(q + 1));
        prop_assert!(tiers.percentage_for(q) <= 100);
    }

    #[test]
    fn prop_combo_totals_are_consistent(quantities in prop::collection::vec(1i64..30, 1..5)) {
        let products: Vec<Product> = quantities
            .iter()
            .enumerate()
            .map(|(n, _)| {
                Product::new(format!("p{n}"), "Mix").with_variant(ProductVariant::new(
                    format!("v{n}"),
                    "Túi zip",
                    250.0,
                    Money::from_units(10_000 * (n as i64 + 1)),
                ))
            })
            .collect();

        let mut combo = ComboSelection::new();
        for (product, quantity) in products.iter().zip(&quantities) {
            let variant_id = product.variant[0].product_variant_id.clone();
            combo.add(product, &variant_id).unwrap();
            combo.set_quantity(&variant_id, *quantity).unwrap();
        }

        let pricing = combo.pricing();
        let expected_quantity: i64 = quantities.iter().sum();
        prop_assert_eq!(i64::from(pricing.total_quantity), expected_quantity);
        prop_assert_eq!(pricing.subtotal - pricing.discount_amount, pricing.total);
        prop_assert!(pricing.total <= pricing.subtotal);
        prop_assert_eq!(
            pricing.discount_percentage,
            DiscountTiers::standard().percentage_for(pricing.total_quantity)
        );
    }
}

#[test]
fn test_empty_inputs_are_safe() {
    let facets = build_facets(&[]);
    assert_eq!(
        facets.price_range,
        ValueRange::new(Money::zero(), Money::zero())
    );
    assert_eq!(facets.weight_range, ValueRange::new(0.0, 0.0));

    let state = FilterState::from_facets(&facets);
    assert!(apply_filters(&[], &state, SortKey::PriceDesc).is_empty());

    let pricing = ComboSelection::new().pricing();
    assert_eq!(pricing.total, Money::zero());
    assert_eq!(pricing.discount_percentage, 0);
}
