//! Search module.
//!
//! Facet derivation over the catalog, the filter state the sidebar edits, and
//! the predicate engine that turns both into a sorted product list.

mod facets;
mod filter;
mod normalize;
mod query;
mod range;

pub use facets::{build_facets, Facets};
pub use filter::{FilterAction, FilterState, NUTRITION_BASELINE};
pub use normalize::normalize_search_text;
pub use query::{apply_filters, count_active_filters, SortKey};
pub use range::ValueRange;
