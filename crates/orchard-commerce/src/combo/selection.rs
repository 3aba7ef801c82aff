//! Combo selection and line items.

use crate::catalog::{Product, ProductVariant};
use crate::combo::{price, ComboPricingResult, DiscountTiers};
use crate::error::CommerceError;
use crate::ids::VariantId;
use crate::money::Money;

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// One variant and how many of it are in the combo.
///
/// Borrows the product and variant from the catalog snapshot; the line item
/// never owns them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComboLineItem<'a> {
    pub product: &'a Product,
    pub variant: &'a ProductVariant,
    pub quantity: u32,
}

impl<'a> ComboLineItem<'a> {
    pub fn new(product: &'a Product, variant: &'a ProductVariant, quantity: u32) -> Self {
        Self {
            product,
            variant,
            quantity,
        }
    }

    pub fn variant_id(&self) -> &'a VariantId {
        &self.variant.product_variant_id
    }

    /// Effective unit price (promotion applied).
    pub fn unit_price(&self) -> Money {
        self.variant.effective_price()
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply(self.quantity)
    }
}

/// One discrete combo-builder edit.
#[derive(Debug, Clone, PartialEq)]
pub enum ComboAction<'a> {
    /// Drop a variant into the combo, or bump its quantity by one.
    Add {
        product: &'a Product,
        variant_id: VariantId,
    },
    /// Set a quantity; zero or below removes the line.
    SetQuantity {
        variant_id: VariantId,
        quantity: i64,
    },
    Remove(VariantId),
    /// Drag-and-drop reorder.
    Move { from: usize, to: usize },
    Clear,
}

/// The ordered line items of a combo under construction, keyed by variant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComboSelection<'a> {
    items: Vec<ComboLineItem<'a>>,
}

impl<'a> ComboSelection<'a> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add one unit of `variant_id` from `product`.
    ///
    /// A variant already in the selection has its quantity incremented in
    /// place. Returns the line's new quantity.
    pub fn add(
        &mut self,
        product: &'a Product,
        variant_id: &VariantId,
    ) -> Result<u32, CommerceError> {
        let variant = product
            .find_variant(variant_id)
            .ok_or_else(|| CommerceError::VariantNotFound(variant_id.to_string()))?;

        if let Some(existing) = self.items.iter_mut().find(|i| i.variant_id() == variant_id) {
            let new_quantity = i64::from(existing.quantity) + 1;
            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }
            existing.quantity += 1;
            return Ok(existing.quantity);
        }

        self.items.push(ComboLineItem::new(product, variant, 1));
        Ok(1)
    }

    /// Update a line's quantity.
    ///
    /// If quantity is <= 0, removes the line. Returns whether a line was
    /// changed or removed.
    pub fn set_quantity(
        &mut self,
        variant_id: &VariantId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Ok(self.remove(variant_id));
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        match self.items.iter_mut().find(|i| i.variant_id() == variant_id) {
            Some(item) => {
                item.quantity = u32::try_from(quantity)
                    .map_err(|_| CommerceError::InvalidQuantity(quantity))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a line.
    pub fn remove(&mut self, variant_id: &VariantId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| i.variant_id() != variant_id);
        self.items.len() < len_before
    }

    /// Move the line at `from` to position `to`, shifting the lines between.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), CommerceError> {
        let len = self.items.len();
        for position in [from, to] {
            if position >= len {
                return Err(CommerceError::PositionOutOfRange { position, len });
            }
        }

        let item = self.items.remove(from);
        self.items.insert(to, item);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Apply one edit to a copy of this selection.
    pub fn apply(&self, action: ComboAction<'a>) -> Result<ComboSelection<'a>, CommerceError> {
        let mut next = self.clone();
        match action {
            ComboAction::Add {
                product,
                variant_id,
            } => {
                next.add(product, &variant_id)?;
            }
            ComboAction::SetQuantity {
                variant_id,
                quantity,
            } => {
                next.set_quantity(&variant_id, quantity)?;
            }
            ComboAction::Remove(variant_id) => {
                next.remove(&variant_id);
            }
            ComboAction::Move { from, to } => next.move_item(from, to)?,
            ComboAction::Clear => next.clear(),
        }
        Ok(next)
    }

    pub fn items(&self) -> &[ComboLineItem<'a>] {
        &self.items
    }

    /// Get a line by variant ID.
    pub fn get(&self, variant_id: &VariantId) -> Option<&ComboLineItem<'a>> {
        self.items.iter().find(|i| i.variant_id() == variant_id)
    }

    /// Sum of quantities across lines.
    pub fn total_quantity(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Price with the standard tiers.
    pub fn pricing(&self) -> ComboPricingResult {
        price(&self.items)
    }

    /// Price with custom tiers.
    pub fn pricing_with(&self, tiers: &DiscountTiers) -> ComboPricingResult {
        tiers.price(&self.items)
    }
}
