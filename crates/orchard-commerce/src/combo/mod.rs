//! Custom combo module.
//!
//! Contains the combo selection the builder edits, the quantity-tiered
//! discount, pricing, and the combo-creation payload.

mod payload;
mod pricing;
mod selection;
mod tiers;

pub use payload::{ComboItemPayload, CreateComboPayload};
pub use pricing::{price, ComboPricingResult};
pub use selection::{ComboAction, ComboLineItem, ComboSelection, MAX_QUANTITY_PER_ITEM};
pub use tiers::{DiscountTier, DiscountTiers, NextTier};
