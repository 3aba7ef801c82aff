//! Product filtering.

use std::collections::BTreeSet;

use anyhow::Result;
use orchard_commerce::catalog::{Nutrient, Product};
use orchard_commerce::money::Money;
use orchard_commerce::search::{
    apply_filters, build_facets, count_active_filters, Facets, FilterAction, FilterState, SortKey,
};
use orchard_observability::PhaseTimings;
use serde::Serialize;

use super::FilterArgs;
use crate::context::Context;
use crate::output::{format_price, format_weight, stock_badge};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FilterReport<'a> {
    sort: SortKey,
    active_filters: usize,
    matched: usize,
    state: &'a FilterState,
    products: Vec<ProductRow<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductRow<'a> {
    id: &'a str,
    name: &'a str,
    listing_price: Option<Money>,
    on_promotion: bool,
    in_stock: bool,
    quantity_sold: u64,
    rating: f64,
}

impl<'a> ProductRow<'a> {
    fn new(product: &'a Product) -> Self {
        Self {
            id: product.id.as_str(),
            name: &product.name,
            listing_price: product.first_variant().map(|v| v.effective_price()),
            on_promotion: product.variant.iter().any(|v| v.is_on_promotion()),
            in_stock: product.variant.iter().any(|v| v.is_in_stock()),
            quantity_sold: product.quantity_sold,
            rating: product.rating,
        }
    }
}

/// Run the filter command.
pub async fn run(args: FilterArgs, ctx: &Context) -> Result<()> {
    let mut timings = PhaseTimings::new();
    let catalog = ctx.load_catalog().await?;
    timings.record("load", timings.elapsed());

    let facets = timings.time("facets", || build_facets(catalog.products()));
    let sort = args.sort.unwrap_or(ctx.config.filter.default_sort);
    let limit = args.limit;
    let state = state_from_args(args, &facets);

    for (title, selected, known) in [
        ("category", &state.categories, &facets.categories),
        ("tag", &state.tags, &facets.tags),
        ("package type", &state.package_types, &facets.package_types),
    ] {
        for value in selected.iter().filter(|v| !known.contains(v)) {
            ctx.output
                .warn(&format!("No product in the catalog has {} '{}'", title, value));
        }
    }

    let matched = timings.time("filter", || apply_filters(catalog.products(), &state, sort));
    let active_filters = count_active_filters(&state, &facets);
    let shown = &matched[..limit.unwrap_or(matched.len()).min(matched.len())];

    if ctx.output.is_json() {
        ctx.output.json(&FilterReport {
            sort,
            active_filters,
            matched: matched.len(),
            state: &state,
            products: shown.iter().map(|p| ProductRow::new(p)).collect(),
        });
        ctx.output.timings(&timings.finish());
        return Ok(());
    }

    ctx.output.header(&format!(
        "{} of {} products, sorted by {} ({} active filters)",
        matched.len(),
        catalog.len(),
        sort.display_name(),
        active_filters
    ));

    if matched.is_empty() {
        ctx.output.info("No products match the current filters.");
    }

    for product in shown {
        let row = ProductRow::new(product);
        let variant = product.first_variant();
        let price = row
            .listing_price
            .map(|p| format_price(p, variant.is_some_and(|v| v.is_on_promotion())))
            .unwrap_or_default();
        let package = variant
            .map(|v| format!("{} {}", v.package_type, format_weight(v.net_weight)))
            .unwrap_or_default();
        let stock = variant.map(|v| stock_badge(v.stock_quantity)).unwrap_or_default();
        ctx.output.table_row(
            &[row.name, &package, &price, &stock],
            &[28, 24, 16, 12],
        );
    }

    if shown.len() < matched.len() {
        ctx.output
            .info(&format!("... {} more", matched.len() - shown.len()));
    }

    ctx.output.timings(&timings.finish());
    Ok(())
}

/// Fold the command-line flags into a filter state through the reducer,
/// starting from the catalog defaults.
fn state_from_args(args: FilterArgs, facets: &Facets) -> FilterState {
    let mut actions: Vec<FilterAction> = Vec::new();

    // Toggles flip, so a flag given twice must still select once.
    actions.extend(distinct(args.categories).map(FilterAction::ToggleCategory));
    actions.extend(distinct(args.tags).map(FilterAction::ToggleTag));
    actions.extend(distinct(args.package_types).map(FilterAction::TogglePackageType));

    if args.min_price.is_some() || args.max_price.is_some() {
        actions.push(FilterAction::SetPriceRange(
            args.min_price.map(Money::new).unwrap_or(facets.price_range.min),
            args.max_price.map(Money::new).unwrap_or(facets.price_range.max),
        ));
    }
    if args.min_weight.is_some() || args.max_weight.is_some() {
        actions.push(FilterAction::SetWeightRange(
            args.min_weight.unwrap_or(facets.weight_range.min),
            args.max_weight.unwrap_or(facets.weight_range.max),
        ));
    }

    actions.push(FilterAction::SetHasPromotion(args.promotion));
    actions.push(FilterAction::SetInStock(args.in_stock));
    if let Some(query) = args.search {
        actions.push(FilterAction::SetSearchQuery(query));
    }
    for (nutrient, lo, hi) in args.nutrients {
        actions.push(FilterAction::SetNutritionRange(nutrient, lo, hi));
    }

    actions
        .into_iter()
        .fold(FilterState::from_facets(facets), |state, action| {
            state.reduce(action, facets)
        })
}

fn distinct(values: Vec<String>) -> impl Iterator<Item = String> {
    values.into_iter().collect::<BTreeSet<_>>().into_iter()
}

/// Parse `--nutrient name=lo:hi`. Either bound may be omitted
/// (`carbs=:40`, `protein=2:`).
pub fn parse_nutrient_range(s: &str) -> Result<(Nutrient, f64, f64), String> {
    let (name, range) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=LO:HI, got '{s}'"))?;
    let nutrient =
        Nutrient::from_str(name).ok_or_else(|| format!("unknown nutrient '{}'", name.trim()))?;
    let (lo, hi) = range
        .split_once(':')
        .ok_or_else(|| format!("expected LO:HI after '=', got '{range}'"))?;

    let bound = |text: &str, default: f64| -> Result<f64, String> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(default);
        }
        match text.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(format!("invalid bound '{text}'")),
        }
    };

    Ok((nutrient, bound(lo, 0.0)?, bound(hi, f64::MAX)?))
}

/// Parse `--sort`, accepting kebab-case and camelCase names.
pub fn parse_sort(s: &str) -> Result<SortKey, String> {
    SortKey::from_str(s).ok_or_else(|| {
        let names: Vec<&str> = SortKey::ALL.iter().map(SortKey::as_str).collect();
        format!("unknown sort '{s}', expected one of: {}", names.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use orchard_commerce::search::ValueRange;

    fn args() -> FilterArgs {
        FilterArgs {
            categories: Vec::new(),
            tags: Vec::new(),
            package_types: Vec::new(),
            min_price: None,
            max_price: None,
            min_weight: None,
            max_weight: None,
            promotion: false,
            in_stock: false,
            search: None,
            nutrients: Vec::new(),
            sort: None,
            limit: None,
        }
    }

    fn facets() -> Facets {
        Facets {
            price_range: ValueRange::new(Money::from_units(50_000), Money::from_units(300_000)),
            weight_range: ValueRange::new(100.0, 1000.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_nutrient_range() {
        assert_eq!(
            parse_nutrient_range("protein=0:5"),
            Ok((Nutrient::Protein, 0.0, 5.0))
        );
        assert_eq!(
            parse_nutrient_range("Carbs=:40"),
            Ok((Nutrient::Carbs, 0.0, 40.0))
        );
        assert_eq!(
            parse_nutrient_range("fat=2.5:"),
            Ok((Nutrient::Fat, 2.5, f64::MAX))
        );
        assert!(parse_nutrient_range("protein").is_err());
        assert!(parse_nutrient_range("sugar=0:5").is_err());
        assert!(parse_nutrient_range("protein=0-5").is_err());
        assert!(parse_nutrient_range("protein=a:5").is_err());
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!(parse_sort("price-asc"), Ok(SortKey::PriceAsc));
        assert_eq!(parse_sort("bestSelling"), Ok(SortKey::BestSelling));
        assert!(parse_sort("cheapest").unwrap_err().contains("price-desc"));
    }

    #[test]
    fn test_no_flags_is_default_state() {
        let facets = facets();
        assert_eq!(
            state_from_args(args(), &facets),
            FilterState::from_facets(&facets)
        );
    }

    #[test]
    fn test_partial_price_bound_keeps_other_side() {
        let facets = facets();
        let mut a = args();
        a.max_price = Some(100_000.into());
        a.categories = vec!["Nuts".to_string(), "Nuts".to_string()];
        a.nutrients = vec![(Nutrient::Protein, 5.0, 0.0)];

        let state = state_from_args(a, &facets);
        assert_eq!(
            state.price_range,
            ValueRange::new(Money::from_units(50_000), Money::from_units(100_000))
        );
        assert_eq!(state.categories.len(), 1);
        assert_eq!(
            state.nutrition_range.get(&Nutrient::Protein),
            Some(&ValueRange::new(0.0, 5.0))
        );
    }
}
