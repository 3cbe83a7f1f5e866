//! # Variant Commands
//!
//! The two linked dropdowns of the product form.
//!
//! ## Cascade
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  select_variant_type("t-size")                                         │
//! │       │  selection = { type: t-size, items: [] }                        │
//! │       ▼                                                                 │
//! │  eligible = variants owned by t-size                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  select_variants(["xl", "red"])  ── "red" not eligible, dropped        │
//! │       │  selection = { type: t-size, items: [xl] }                      │
//! │                                                                         │
//! │  restore_product_variants(id) pre-fills both from a saved product.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use mercato_core::validation::validate_record_id;
use mercato_core::{DashboardController, SelectionState, VariantItem};

use crate::error::ApiError;
use crate::state::DashboardState;

/// Selection plus the options the second dropdown offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResponse {
    pub selection: SelectionState,
    pub eligible: Vec<VariantItem>,
}

impl SelectionResponse {
    fn capture(dashboard: &DashboardController, selection: SelectionState) -> Self {
        SelectionResponse {
            selection,
            eligible: dashboard
                .selector()
                .eligible_pool()
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}

/// First dropdown changed. `None` or a blank id clears it.
pub fn select_variant_type(
    dashboard: &DashboardState,
    type_id: Option<&str>,
) -> SelectionResponse {
    debug!(?type_id, "Selecting variant type");
    dashboard.with_dashboard_mut(|d| {
        let selection = d.select_variant_type(type_id);
        SelectionResponse::capture(d, selection)
    })
}

/// Second dropdown changed. Ids outside the eligible pool are dropped.
pub fn select_variants(dashboard: &DashboardState, item_ids: &[String]) -> SelectionResponse {
    dashboard.with_dashboard_mut(|d| {
        let selection = d.select_variants(item_ids);
        if selection.selected_items.len() < item_ids.len() {
            debug!(
                requested = item_ids.len(),
                kept = selection.selected_items.len(),
                "Dropped variants outside the selected type"
            );
        }
        SelectionResponse::capture(d, selection)
    })
}

/// Opens a saved product for editing.
///
/// ## Errors
/// - `VALIDATION_ERROR` for a blank or malformed id
/// - `NOT_FOUND` when the product is not in the current snapshot
pub fn restore_product_variants(
    dashboard: &DashboardState,
    product_id: &str,
) -> Result<SelectionResponse, ApiError> {
    let product_id = validate_record_id("product_id", product_id)?;

    dashboard.with_dashboard_mut(|d| -> Result<SelectionResponse, ApiError> {
        let product = d
            .products()
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Product", &product_id))?;

        let selection = d.restore_selection(&product);
        debug!(product_id = %product.id, ?selection, "Restored variant selection");
        Ok(SelectionResponse::capture(d, selection))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use mercato_core::{ChartPalette, EntityRef, Product, StockBucket, VariantType};

    fn loaded() -> DashboardState {
        let state = DashboardState::new(ChartPalette::default(), StockBucket::All);
        let mut saved = Product::new("p1", "Tee", 4);
        saved.variant_type = Some(EntityRef::id_only("t-size"));
        saved.variant_ids = vec!["xl".to_string(), "red".to_string()];

        state.with_dashboard_mut(|d| {
            let t = d.begin_products_fetch();
            d.apply_products(t, Ok(vec![saved]));
            let t = d.begin_variant_types_fetch();
            d.apply_variant_types(
                t,
                Ok(vec![
                    VariantType::new("t-size", "Size"),
                    VariantType::new("t-color", "Color"),
                ]),
            );
            let t = d.begin_variants_fetch();
            d.apply_variants(
                t,
                Ok(vec![
                    VariantItem::new("s", "S", "t-size"),
                    VariantItem::new("xl", "XL", "t-size"),
                    VariantItem::new("red", "Red", "t-color"),
                ]),
            );
        });
        state
    }

    fn ids(items: &[VariantItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_type_change_narrows_pool() {
        let state = loaded();
        let response = select_variant_type(&state, Some("t-size"));
        assert_eq!(response.selection.selected_type.as_deref(), Some("t-size"));
        assert!(response.selection.selected_items.is_empty());
        assert_eq!(ids(&response.eligible), vec!["s", "xl"]);
    }

    #[test]
    fn test_ineligible_items_are_dropped() {
        let state = loaded();
        select_variant_type(&state, Some("t-size"));
        let response = select_variants(&state, &["xl".to_string(), "red".to_string()]);
        assert_eq!(response.selection.selected_items, vec!["xl".to_string()]);
    }

    #[test]
    fn test_restore_prunes_foreign_items() {
        let state = loaded();
        let response = restore_product_variants(&state, "p1").unwrap();
        assert_eq!(response.selection.selected_type.as_deref(), Some("t-size"));
        assert_eq!(response.selection.selected_items, vec!["xl".to_string()]);
    }

    #[test]
    fn test_restore_errors() {
        let state = loaded();
        let err = restore_product_variants(&state, "missing").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = restore_product_variants(&state, "   ").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
