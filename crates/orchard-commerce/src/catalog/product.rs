//! Product and variant types.

use crate::catalog::{CategoryRef, NutritionFacts};
use crate::ids::{ProductId, VariantId};
use crate::money::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product in the catalog, as returned by the product listing.
///
/// Every well-formed product carries at least one variant. Variant-less
/// products still deserialize; they simply never match a filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Full description.
    #[serde(default)]
    pub description: Option<String>,
    /// Categories this product belongs to.
    #[serde(default)]
    pub categories: Vec<CategoryRef>,
    /// Free-form labels ("organic", "no-sugar", ...).
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Units sold, used by the popular/best-selling sorts.
    #[serde(default)]
    pub quantity_sold: u64,
    /// Average review rating.
    #[serde(default)]
    pub rating: f64,
    /// Nutrition record, if the product has one.
    #[serde(default)]
    pub nutrition_facts: Option<NutritionFacts>,
    /// Purchasable variants, in display order.
    #[serde(default)]
    pub variant: Vec<ProductVariant>,
}

impl Product {
    /// Create a product with no categories, tags or variants.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            categories: Vec::new(),
            tags: None,
            quantity_sold: 0,
            rating: 0.0,
            nutrition_facts: None,
            variant: Vec::new(),
        }
    }

    /// Look up one of this product's variants.
    pub fn find_variant(&self, variant_id: &VariantId) -> Option<&ProductVariant> {
        self.variant
            .iter()
            .find(|v| &v.product_variant_id == variant_id)
    }

    /// The variant shown on listing cards.
    pub fn first_variant(&self) -> Option<&ProductVariant> {
        self.variant.first()
    }

    /// Whether the product is listed under the named category.
    pub fn in_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }

    /// Whether the product carries the given tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags
            .as_ref()
            .map(|tags| tags.iter().any(|t| t == tag))
            .unwrap_or(false)
    }

    /// Add a category to this product.
    pub fn add_category(&mut self, category: CategoryRef) {
        if !self.categories.contains(&category) {
            self.categories.push(category);
        }
    }

    /// Add a tag to this product.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        let tags = self.tags.get_or_insert_with(Vec::new);
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    /// Append a variant.
    pub fn with_variant(mut self, variant: ProductVariant) -> Self {
        self.variant.push(variant);
        self
    }
}

/// A purchasable packaging of a product (e.g. a 250 g zip bag).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    /// Unique variant identifier.
    pub product_variant_id: VariantId,
    /// Packaging label ("Zip bag", "Jar", "Gift box", ...).
    #[serde(default)]
    pub package_type: String,
    /// Net weight in grams.
    #[serde(default)]
    pub net_weight: f64,
    /// Base unit price.
    pub price: Money,
    /// Active promotion, if any.
    #[serde(default)]
    pub promotion: Option<Promotion>,
    /// Units on hand.
    #[serde(default)]
    pub stock_quantity: u32,
    /// Variant-specific image URL.
    #[serde(default)]
    pub image_variant: Option<String>,
}

impl ProductVariant {
    pub fn new(
        id: impl Into<VariantId>,
        package_type: impl Into<String>,
        net_weight: f64,
        price: Money,
    ) -> Self {
        Self {
            product_variant_id: id.into(),
            package_type: package_type.into(),
            net_weight,
            price,
            promotion: None,
            stock_quantity: 0,
            image_variant: None,
        }
    }

    /// The price a customer pays: the promotional price when a promotion is
    /// active, otherwise the base price.
    pub fn effective_price(&self) -> Money {
        self.promotion
            .as_ref()
            .map(|p| p.price)
            .unwrap_or(self.price)
    }

    /// Check if this variant is on promotion.
    pub fn is_on_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// Check if this variant is in stock.
    pub fn is_in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    pub fn with_stock(mut self, stock_quantity: u32) -> Self {
        self.stock_quantity = stock_quantity;
        self
    }

    pub fn with_promotion(mut self, price: Money, percentage: Decimal) -> Self {
        self.promotion = Some(Promotion { price, percentage });
        self
    }
}

/// A promotional price on a variant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Promotion {
    /// Discounted unit price (below the base price).
    pub price: Money,
    /// Advertised discount percentage.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub percentage: Decimal,
}
