//! In-memory catalog snapshot.

use crate::catalog::{Product, ProductVariant};
use crate::error::CommerceError;
use crate::ids::VariantId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The product list fetched once from the listing endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parse a listing response body.
    ///
    /// Listing bodies come either bare or wrapped in a `data` envelope. The
    /// product list is decoded on its own so a malformed product reports its
    /// own field error.
    pub fn from_json_str(body: &str) -> Result<Self, CommerceError> {
        let list = match serde_json::from_str::<Value>(body)? {
            list @ Value::Array(_) => list,
            Value::Object(mut envelope) => envelope.remove("data").ok_or_else(|| {
                CommerceError::ValidationError(
                    "listing body has no `data` product list".to_string(),
                )
            })?,
            _ => {
                return Err(CommerceError::ValidationError(
                    "listing body must be a product array or a `data` envelope".to_string(),
                ))
            }
        };
        let products: Vec<Product> = serde_json::from_value(list)?;

        let variantless = products.iter().filter(|p| p.variant.is_empty()).count();
        if variantless > 0 {
            tracing::warn!(variantless, "catalog has products without variants");
        }
        tracing::debug!(products = products.len(), "catalog loaded");

        Ok(Self { products })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Find a variant and the product that owns it.
    pub fn find_variant(
        &self,
        variant_id: &VariantId,
    ) -> Result<(&Product, &ProductVariant), CommerceError> {
        self.products
            .iter()
            .find_map(|p| p.find_variant(variant_id).map(|v| (p, v)))
            .ok_or_else(|| CommerceError::VariantNotFound(variant_id.to_string()))
    }
}

impl From<Vec<Product>> for Catalog {
    fn from(products: Vec<Product>) -> Self {
        Self::new(products)
    }
}
