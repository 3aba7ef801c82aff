//! Facet listing.

use anyhow::Result;
use orchard_commerce::search::build_facets;
use orchard_observability::PhaseTimings;

use crate::context::Context;
use crate::output::format_weight;

/// Run the facets command.
pub async fn run(ctx: &Context) -> Result<()> {
    let mut timings = PhaseTimings::new();
    let catalog = ctx.load_catalog().await?;
    timings.record("load", timings.elapsed());

    let facets = timings.time("facets", || build_facets(catalog.products()));

    if ctx.output.is_json() {
        ctx.output.json(&facets);
        ctx.output.timings(&timings.finish());
        return Ok(());
    }

    ctx.output.header(&format!("Facets ({} products)", catalog.len()));

    for (title, terms) in [
        ("Categories", &facets.categories),
        ("Package types", &facets.package_types),
        ("Tags", &facets.tags),
    ] {
        ctx.output.info(&format!("{} ({})", title, terms.len()));
        for term in terms {
            ctx.output.list_item(term);
        }
    }

    if facets.has_ranges() {
        ctx.output.info("Ranges");
        ctx.output.kv(
            "price",
            &format!(
                "{} – {}",
                facets.price_range.min.display(),
                facets.price_range.max.display()
            ),
        );
        ctx.output.kv(
            "weight",
            &format!(
                "{} – {}",
                format_weight(facets.weight_range.min),
                format_weight(facets.weight_range.max)
            ),
        );
    } else {
        ctx.output.warn("No variants in the catalog; price and weight ranges are empty");
    }

    ctx.output.timings(&timings.finish());
    Ok(())
}
