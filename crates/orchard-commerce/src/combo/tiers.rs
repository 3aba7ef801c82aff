//! Quantity-tiered combo discount.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// One step of the discount: at least `min_quantity` units earns
/// `percentage` percent off the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountTier {
    pub min_quantity: u32,
    pub percentage: u32,
}

impl DiscountTier {
    pub const fn new(min_quantity: u32, percentage: u32) -> Self {
        Self {
            min_quantity,
            percentage,
        }
    }
}

/// Hint for the builder: how far the combo is from the next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NextTier {
    pub tier: DiscountTier,
    pub units_needed: u32,
}

/// The discount step function, thresholds sorted highest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DiscountTier>", into = "Vec<DiscountTier>")]
pub struct DiscountTiers {
    tiers: Vec<DiscountTier>,
}

const STANDARD_TIERS: [DiscountTier; 3] = [
    DiscountTier::new(10, 15),
    DiscountTier::new(7, 10),
    DiscountTier::new(5, 6),
];

impl DiscountTiers {
    /// Build a tier table. Thresholds must be positive and distinct and
    /// percentages at most 100; input order does not matter.
    pub fn new(mut tiers: Vec<DiscountTier>) -> Result<Self, CommerceError> {
        for tier in &tiers {
            if tier.min_quantity == 0 {
                return Err(CommerceError::InvalidDiscountTier(
                    "min_quantity must be at least 1".to_string(),
                ));
            }
            if tier.percentage > 100 {
                return Err(CommerceError::InvalidDiscountTier(format!(
                    "{}% off for {}+ items exceeds 100%",
                    tier.percentage, tier.min_quantity
                )));
            }
        }

        tiers.sort_by(|a, b| b.min_quantity.cmp(&a.min_quantity));
        if let Some(pair) = tiers
            .windows(2)
            .find(|w| w[0].min_quantity == w[1].min_quantity)
        {
            return Err(CommerceError::InvalidDiscountTier(format!(
                "threshold {} listed twice",
                pair[0].min_quantity
            )));
        }

        Ok(Self { tiers })
    }

    /// The storefront's standard table: 10+ items 15%, 7+ items 10%,
    /// 5+ items 6%.
    pub fn standard() -> Self {
        Self {
            tiers: STANDARD_TIERS.to_vec(),
        }
    }

    /// Tiers, highest threshold first.
    pub fn tiers(&self) -> &[DiscountTier] {
        &self.tiers
    }

    /// Percentage earned by `total_quantity` units.
    pub fn percentage_for(&self, total_quantity: u32) -> u32 {
        self.tiers
            .iter()
            .find(|t| total_quantity >= t.min_quantity)
            .map(|t| t.percentage)
            .unwrap_or(0)
    }

    /// The lowest tier that would raise the current percentage.
    pub fn next_tier(&self, total_quantity: u32) -> Option<NextTier> {
        let current = self.percentage_for(total_quantity);
        self.tiers
            .iter()
            .rev()
            .find(|t| t.min_quantity > total_quantity && t.percentage > current)
            .map(|t| NextTier {
                tier: *t,
                units_needed: t.min_quantity - total_quantity,
            })
    }
}

impl Default for DiscountTiers {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<DiscountTier>> for DiscountTiers {
    type Error = CommerceError;

    fn try_from(tiers: Vec<DiscountTier>) -> Result<Self, Self::Error> {
        Self::new(tiers)
    }
}

impl From<DiscountTiers> for Vec<DiscountTier> {
    fn from(tiers: DiscountTiers) -> Self {
        tiers.tiers
    }
}
