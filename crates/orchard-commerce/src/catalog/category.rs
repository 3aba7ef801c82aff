//! Category references attached to products.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A category a product is listed under.
///
/// Products and categories are many-to-many; the listing embeds only the id
/// and display name, which is what facets and filters key on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CategoryRef {
    /// Category identifier.
    pub id: CategoryId,
    /// Display name (facet and filter key).
    pub name: String,
}

impl CategoryRef {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
