//! Combo-creation request body.

use crate::combo::ComboSelection;
use crate::error::CommerceError;
use crate::ids::VariantId;
use serde::{Deserialize, Serialize};

/// Body of the combo-creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComboPayload {
    pub name: String,
    pub description: Option<String>,
    pub combo_items: Vec<ComboItemPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboItemPayload {
    pub product_variant_id: VariantId,
    pub quantity: u32,
}

impl ComboSelection<'_> {
    /// Build the creation payload, in line order.
    ///
    /// The name is required; a blank description is sent as `null`.
    pub fn to_payload(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<CreateComboPayload, CommerceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CommerceError::ValidationError(
                "combo name is required".to_string(),
            ));
        }
        if self.is_empty() {
            return Err(CommerceError::ValidationError(
                "combo needs at least one item".to_string(),
            ));
        }

        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Ok(CreateComboPayload {
            name: name.to_string(),
            description,
            combo_items: self
                .items()
                .iter()
                .map(|item| ComboItemPayload {
                    product_variant_id: item.variant_id().clone(),
                    quantity: item.quantity,
                })
                .collect(),
        })
    }
}
