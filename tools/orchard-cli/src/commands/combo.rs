//! Combo pricing and payload commands.

use anyhow::{Context as _, Result};
use orchard_commerce::catalog::Catalog;
use orchard_commerce::combo::{
    ComboPricingResult, ComboSelection, NextTier, MAX_QUANTITY_PER_ITEM,
};
use orchard_commerce::ids::VariantId;
use orchard_commerce::money::Money;
use orchard_observability::PhaseTimings;
use serde::Serialize;

use super::{ComboArgs, ComboCommand, ItemSpec};
use crate::context::Context;
use crate::output::format_price;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PriceReport<'a> {
    items: Vec<LineRow<'a>>,
    pricing: &'a ComboPricingResult,
    next_tier: Option<NextTier>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LineRow<'a> {
    product_variant_id: &'a str,
    product_name: &'a str,
    package_type: &'a str,
    quantity: u32,
    unit_price: Money,
    line_total: Money,
}

/// Run the combo command.
pub async fn run(args: ComboArgs, ctx: &Context) -> Result<()> {
    let mut timings = PhaseTimings::new();
    let catalog = ctx.load_catalog().await?;
    timings.record("load", timings.elapsed());

    let result = match args.command {
        ComboCommand::Price { items } => price_combo(&items, &catalog, ctx, &mut timings),
        ComboCommand::Payload {
            name,
            description,
            items,
        } => print_payload(&name, description.as_deref(), &items, &catalog, ctx),
    };

    ctx.output.timings(&timings.finish());
    result
}

/// Build a selection the way the builder does: one `add` per drop, then a
/// quantity edit for the rest.
fn build_selection<'a>(items: &[ItemSpec], catalog: &'a Catalog) -> Result<ComboSelection<'a>> {
    let mut combo = ComboSelection::new();
    for item in items {
        let (product, _) = catalog.find_variant(&item.variant_id)?;
        let quantity = combo
            .add(product, &item.variant_id)
            .with_context(|| format!("Cannot add {}", item.variant_id))?;
        if item.quantity > 1 {
            let target = i64::from(quantity) - 1 + i64::from(item.quantity);
            combo
                .set_quantity(&item.variant_id, target)
                .with_context(|| format!("Cannot set quantity of {}", item.variant_id))?;
        }
    }
    Ok(combo)
}

fn price_combo(
    items: &[ItemSpec],
    catalog: &Catalog,
    ctx: &Context,
    timings: &mut PhaseTimings,
) -> Result<()> {
    let combo = build_selection(items, catalog)?;
    let tiers = &ctx.config.combo.tiers;
    let pricing = timings.time("price", || combo.pricing_with(tiers));
    let next_tier = tiers.next_tier(pricing.total_quantity);

    let rows: Vec<LineRow<'_>> = combo
        .items()
        .iter()
        .map(|item| LineRow {
            product_variant_id: item.variant_id().as_str(),
            product_name: &item.product.name,
            package_type: &item.variant.package_type,
            quantity: item.quantity,
            unit_price: item.unit_price(),
            line_total: item.line_total(),
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&PriceReport {
            items: rows,
            pricing: &pricing,
            next_tier,
        });
        return Ok(());
    }

    ctx.output.header(&format!(
        "Combo: {} items, {} lines",
        pricing.total_quantity,
        combo.len()
    ));
    for (item, row) in combo.items().iter().zip(&rows) {
        let quantity = format!("{}x", row.quantity);
        let unit = format_price(row.unit_price, item.variant.is_on_promotion());
        let total = row.line_total.display();
        ctx.output.table_row(
            &[&quantity, row.product_name, row.package_type, &unit, &total],
            &[6, 28, 16, 14, 14],
        );
    }

    ctx.output.info("");
    ctx.output.kv("subtotal", &pricing.subtotal.display());
    if pricing.has_discount() {
        ctx.output.kv(
            "discount",
            &format!(
                "-{} ({}%)",
                pricing.discount_amount.display(),
                pricing.discount_percentage
            ),
        );
    }
    ctx.output.kv("total", &pricing.total.display());

    if let Some(next) = next_tier {
        ctx.output.info(&format!(
            "Add {} more item{} for {}% off",
            next.units_needed,
            if next.units_needed == 1 { "" } else { "s" },
            next.tier.percentage
        ));
    }

    Ok(())
}

fn print_payload(
    name: &str,
    description: Option<&str>,
    items: &[ItemSpec],
    catalog: &Catalog,
    ctx: &Context,
) -> Result<()> {
    let combo = build_selection(items, catalog)?;
    let payload = combo.to_payload(name, description)?;
    tracing::debug!(lines = payload.combo_items.len(), "combo payload built");

    ctx.output.header("Combo request body");
    ctx.output.json(&payload);
    Ok(())
}

/// Parse `--item VARIANT[xQTY]`. The suffix is only read as a quantity when
/// everything after the last `x` is digits.
pub fn parse_item(s: &str) -> Result<ItemSpec, String> {
    let s = s.trim();
    let (id, quantity) = match s.rsplit_once('x') {
        Some((id, digits))
            if !id.is_empty() && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) =>
        {
            let quantity: i64 = digits
                .parse()
                .map_err(|_| format!("quantity '{digits}' is too large"))?;
            (id, quantity)
        }
        _ => (s, 1),
    };

    if id.is_empty() {
        return Err("variant id is empty".to_string());
    }
    if quantity < 1 {
        return Err(format!("quantity for {id} must be at least 1"));
    }
    if quantity > MAX_QUANTITY_PER_ITEM {
        return Err(format!(
            "quantity {quantity} for {id} exceeds {MAX_QUANTITY_PER_ITEM}"
        ));
    }

    Ok(ItemSpec {
        variant_id: VariantId::new(id),
        quantity: quantity as u32,
    })
}
