//! Combo pricing calculations.

use crate::combo::{ComboLineItem, DiscountTiers};
use crate::money::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Price summary for a combo. Recomputed from the line items on every
/// change; values are exact, rounding is left to display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ComboPricingResult {
    /// Sum of effective unit price times quantity.
    pub subtotal: Money,
    /// Sum of quantities.
    pub total_quantity: u32,
    /// Tier percentage earned by `total_quantity`.
    pub discount_percentage: u32,
    /// `subtotal * discount_percentage / 100`.
    pub discount_amount: Money,
    /// `subtotal - discount_amount`.
    pub total: Money,
}

impl ComboPricingResult {
    /// Check if the combo earns a discount.
    pub fn has_discount(&self) -> bool {
        self.discount_percentage > 0
    }
}

/// Price line items with the standard tiers.
pub fn price(items: &[ComboLineItem<'_>]) -> ComboPricingResult {
    DiscountTiers::standard().price(items)
}

impl DiscountTiers {
    /// Price line items with this tier table.
    pub fn price(&self, items: &[ComboLineItem<'_>]) -> ComboPricingResult {
        let subtotal: Money = items.iter().map(ComboLineItem::line_total).sum();
        let total_quantity = items
            .iter()
            .fold(0u32, |acc, i| acc.saturating_add(i.quantity));
        let discount_percentage = self.percentage_for(total_quantity);
        let discount_amount = subtotal.percentage(Decimal::from(discount_percentage));

        tracing::debug!(
            lines = items.len(),
            total_quantity,
            discount_percentage,
            "combo priced"
        );

        ComboPricingResult {
            subtotal,
            total_quantity,
            discount_percentage,
            discount_amount,
            total: subtotal - discount_amount,
        }
    }
}
