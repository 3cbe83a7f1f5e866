//! # Cascading Variant Selector
//!
//! Two-level dependent selection: variant type → variant items.
//!
//! ## Selection Invariant
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  selected_type = None      ⇒  pool = [],  selected_items = []          │
//! │  selected_type = Some(t)   ⇒  pool = items where variant_type_id == t  │
//! │                               selected_items ⊆ pool                    │
//! │                                                                         │
//! │  on_type_change(t')   ──► pool recomputed, selected_items cleared      │
//! │  on_items_change(ids) ──► ids outside the pool silently dropped        │
//! │  replace_snapshots()  ──► selection pruned to the new pool             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rejected ids are not errors. They can only come from a stale UI, and the
//! pool is the sole authority on what may be selected.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{VariantItem, VariantType};

/// Selected variant type and the variant items chosen under it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    pub selected_type: Option<String>,
    /// Selected item ids, in first-selected order, without duplicates.
    pub selected_items: Vec<String>,
}

impl SelectionState {
    /// Checks the selection invariant against an item snapshot.
    pub fn is_consistent_with(&self, items: &[VariantItem]) -> bool {
        match &self.selected_type {
            None => self.selected_items.is_empty(),
            Some(type_id) => self.selected_items.iter().all(|id| {
                items
                    .iter()
                    .any(|item| item.id == *id && item.variant_type_id == *type_id)
            }),
        }
    }
}

/// Owns the variant snapshots and the current selection.
#[derive(Debug, Clone, Default)]
pub struct CascadingSelector {
    types: Vec<VariantType>,
    items: Vec<VariantItem>,
    selection: SelectionState,
    /// Indices into `items` that belong to the selected type.
    pool: Vec<usize>,
}

impl CascadingSelector {
    /// Creates a selector with nothing selected.
    pub fn new(types: Vec<VariantType>, items: Vec<VariantItem>) -> Self {
        CascadingSelector {
            types,
            items,
            selection: SelectionState::default(),
            pool: Vec::new(),
        }
    }

    pub fn variant_types(&self) -> &[VariantType] {
        &self.types
    }

    pub fn variant_items(&self) -> &[VariantItem] {
        &self.items
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Items eligible under the selected type, in snapshot order.
    pub fn eligible_pool(&self) -> Vec<&VariantItem> {
        self.pool.iter().filter_map(|&i| self.items.get(i)).collect()
    }

    /// The selected items themselves, in selection order.
    pub fn selected_variants(&self) -> Vec<&VariantItem> {
        self.selection
            .selected_items
            .iter()
            .filter_map(|id| self.items.iter().find(|item| item.id == *id))
            .collect()
    }

    /// Type dropdown change.
    ///
    /// Always clears the selected items. A blank id counts as "no type".
    pub fn on_type_change(&mut self, new_type_id: Option<&str>) -> SelectionState {
        let type_id = new_type_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        self.pool = match &type_id {
            Some(id) => self.pool_for(id),
            None => Vec::new(),
        };
        self.selection = SelectionState {
            selected_type: type_id,
            selected_items: Vec::new(),
        };
        self.selection.clone()
    }

    /// Items multi-select change.
    ///
    /// Keeps the ids that are in the eligible pool, drops the rest.
    pub fn on_items_change<I, S>(&mut self, new_item_ids: I) -> SelectionState
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut accepted: Vec<String> = Vec::new();
        for id in new_item_ids {
            let id = id.as_ref();
            if self.in_pool(id) && !accepted.iter().any(|a| a == id) {
                accepted.push(id.to_string());
            }
        }
        self.selection.selected_items = accepted;
        self.selection.clone()
    }

    /// Pre-selects a saved product's type and variants (edit dialog).
    pub fn restore<I, S>(&mut self, type_id: Option<&str>, item_ids: I) -> SelectionState
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.on_type_change(type_id);
        self.on_items_change(item_ids)
    }

    /// Swaps in fresh variant snapshots after a refetch.
    ///
    /// The selected type survives if it still exists; selected items survive
    /// if they are still in its pool.
    pub fn replace_snapshots(&mut self, types: Vec<VariantType>, items: Vec<VariantItem>) {
        self.types = types;
        self.items = items;
        self.reconcile();
    }

    /// Replaces only the type snapshot.
    pub fn replace_types(&mut self, types: Vec<VariantType>) {
        self.types = types;
        self.reconcile();
    }

    /// Replaces only the item snapshot.
    pub fn replace_items(&mut self, items: Vec<VariantItem>) {
        self.items = items;
        self.reconcile();
    }

    fn reconcile(&mut self) {
        let previous = std::mem::take(&mut self.selection);
        let type_id = previous
            .selected_type
            .filter(|id| self.types.iter().any(|t| t.id == *id));

        match type_id {
            Some(id) => {
                self.on_type_change(Some(&id));
                self.on_items_change(previous.selected_items);
            }
            None => {
                self.on_type_change(None);
            }
        }
    }

    fn pool_for(&self, type_id: &str) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.variant_type_id == type_id)
            .map(|(i, _)| i)
            .collect()
    }

    fn in_pool(&self, item_id: &str) -> bool {
        self.pool
            .iter()
            .filter_map(|&i| self.items.get(i))
            .any(|item| item.id == item_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn selector() -> CascadingSelector {
        CascadingSelector::new(
            vec![
                VariantType::new("size", "Size"),
                VariantType::new("color", "Color"),
            ],
            vec![
                VariantItem::new("s", "S", "size"),
                VariantItem::new("m", "M", "size"),
                VariantItem::new("xl", "XL", "size"),
                VariantItem::new("red", "Red", "color"),
                VariantItem::new("blue", "Blue", "color"),
            ],
        )
    }

    fn pool_ids(selector: &CascadingSelector) -> Vec<&str> {
        selector
            .eligible_pool()
            .into_iter()
            .map(|item| item.id.as_str())
            .collect()
    }

    #[test]
    fn test_starts_empty() {
        let selector = selector();
        assert_eq!(selector.selection(), &SelectionState::default());
        assert!(selector.eligible_pool().is_empty());
    }

    #[test]
    fn test_type_change_builds_pool_and_clears_selection() {
        let mut selector = selector();
        selector.on_type_change(Some("size"));
        selector.on_items_change(["s", "xl"]);
        assert_eq!(selector.selection().selected_items, vec!["s", "xl"]);

        let state = selector.on_type_change(Some("color"));
        assert_eq!(state.selected_type.as_deref(), Some("color"));
        assert!(state.selected_items.is_empty());
        assert_eq!(pool_ids(&selector), vec!["red", "blue"]);
    }

    #[test]
    fn test_reselecting_same_type_still_clears() {
        let mut selector = selector();
        selector.on_type_change(Some("size"));
        selector.on_items_change(["m"]);
        let state = selector.on_type_change(Some("size"));
        assert!(state.selected_items.is_empty());
    }

    #[test]
    fn test_items_outside_pool_are_dropped() {
        let mut selector = selector();
        selector.on_type_change(Some("color"));
        let state = selector.on_items_change(["red", "s", "ghost", "blue", "red"]);
        assert_eq!(state.selected_items, vec!["red", "blue"]);
        assert!(state.is_consistent_with(selector.variant_items()));
    }

    #[test]
    fn test_null_type_forces_empty() {
        let mut selector = selector();
        selector.on_type_change(Some("size"));
        selector.on_items_change(["s"]);

        let state = selector.on_type_change(None);
        assert_eq!(state, SelectionState::default());
        assert!(selector.eligible_pool().is_empty());

        let state = selector.on_items_change(["s"]);
        assert!(state.selected_items.is_empty());

        let state = selector.on_type_change(Some("  "));
        assert_eq!(state.selected_type, None);
    }

    #[test]
    fn test_unknown_type_has_empty_pool() {
        let mut selector = selector();
        let state = selector.on_type_change(Some("material"));
        assert_eq!(state.selected_type.as_deref(), Some("material"));
        assert!(selector.eligible_pool().is_empty());
    }

    #[test]
    fn test_restore_filters_saved_variants() {
        let mut selector = selector();
        let state = selector.restore(Some("size"), vec!["m".to_string(), "red".to_string()]);
        assert_eq!(state.selected_type.as_deref(), Some("size"));
        assert_eq!(state.selected_items, vec!["m"]);
        assert_eq!(selector.selected_variants()[0].label, "M");
    }

    #[test]
    fn test_replace_snapshots_prunes_selection() {
        let mut selector = selector();
        selector.on_type_change(Some("size"));
        selector.on_items_change(["s", "m"]);

        selector.replace_snapshots(
            vec![VariantType::new("size", "Size")],
            vec![
                VariantItem::new("m", "M", "size"),
                VariantItem::new("l", "L", "size"),
            ],
        );
        assert_eq!(selector.selection().selected_type.as_deref(), Some("size"));
        assert_eq!(selector.selection().selected_items, vec!["m"]);
        assert_eq!(pool_ids(&selector), vec!["m", "l"]);
    }

    #[test]
    fn test_removed_type_resets_selection() {
        let mut selector = selector();
        selector.on_type_change(Some("color"));
        selector.on_items_change(["red"]);

        selector.replace_types(vec![VariantType::new("size", "Size")]);
        assert_eq!(selector.selection(), &SelectionState::default());
        assert!(selector.eligible_pool().is_empty());
    }
}
