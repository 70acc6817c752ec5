use crate::shared::export::CsvExportable;
use crate::shared::list_utils::{
    compare_ignore_case, contains_ignore_case, Searchable, Sortable, TableViewState,
};
use crate::shared::table_model::{ModelUpdate, RowKey, TableDataModel};
use contracts::subscription_matching::{ProductId, ProductMap};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;

pub const SORT_BY_NAME: &str = "name";
pub const SORT_BY_SYSTEM_COUNT: &str = "systemCount";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductRow {
    pub id: ProductId,
    pub product_name: String,
    pub system_count: u32,
}

impl RowKey for ProductRow {
    type Key = ProductId;

    fn row_key(&self) -> ProductId {
        self.id
    }
}

pub fn compare_by_name(a: &ProductRow, b: &ProductRow) -> Ordering {
    compare_ignore_case(&a.product_name, &b.product_name)
}

pub fn compare_by_system_count(a: &ProductRow, b: &ProductRow) -> Ordering {
    a.system_count.cmp(&b.system_count)
}

impl Sortable for ProductRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            SORT_BY_SYSTEM_COUNT => compare_by_system_count(self, other),
            _ => compare_by_name(self, other),
        }
    }
}

impl Searchable for ProductRow {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ignore_case(&self.product_name, filter)
    }
}

impl CsvExportable for ProductRow {
    fn headers() -> Vec<String> {
        vec!["Product name".to_string(), "Unmatched system count".to_string()]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![self.product_name.clone(), self.system_count.to_string()]
    }
}

/// One row per unmatched product id, in the given order
pub fn build_rows(products: &ProductMap, unmatched_product_ids: &[ProductId]) -> Vec<ProductRow> {
    unmatched_product_ids
        .iter()
        .filter_map(|pid| match products.get(pid) {
            Some(product) => Some(ProductRow {
                id: *pid,
                product_name: product.product_name.clone(),
                system_count: product.unmatched_system_count,
            }),
            None => {
                log::warn!("Unmatched product {} is missing from the product list", pid);
                None
            }
        })
        .collect()
}

/// The props the product table is built from
#[derive(Clone, Debug, Default)]
pub struct ProductsInput {
    pub products: Arc<ProductMap>,
    pub unmatched_product_ids: Arc<Vec<ProductId>>,
}

impl ProductsInput {
    pub fn build_rows(&self) -> Vec<ProductRow> {
        build_rows(&self.products, &self.unmatched_product_ids)
    }

    /// Whether any part is a different snapshot than in `prev`
    pub fn changed_from(&self, prev: &ProductsInput) -> bool {
        !Arc::ptr_eq(&self.products, &prev.products)
            || !Arc::ptr_eq(&self.unmatched_product_ids, &prev.unmatched_product_ids)
    }

    pub fn is_unmatched(&self, product_id: ProductId) -> bool {
        self.products.contains_key(&product_id) && self.unmatched_product_ids.contains(&product_id)
    }
}

/// Product table model after a props update: fresh rows are merged into the
/// current model when products or ids changed.
pub fn next_product_model(
    prev: &ProductsInput,
    next: &ProductsInput,
    model: &TableDataModel<ProductRow>,
) -> ModelUpdate<ProductRow> {
    if !next.changed_from(prev) {
        return ModelUpdate::Unchanged;
    }

    let (merged, stats) = model.merged(next.build_rows());
    log::debug!(
        "Unmatched products merged: {} added, {} removed, {} updated",
        stats.added,
        stats.removed,
        stats.updated
    );
    ModelUpdate::Merged(merged)
}

/// Product whose system list is shown in the popup
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DetailsSelection {
    selected_product_id: Option<ProductId>,
}

impl DetailsSelection {
    pub fn selected(&self) -> Option<ProductId> {
        self.selected_product_id
    }

    pub fn show_details_for(&mut self, product_id: ProductId) {
        self.selected_product_id = Some(product_id);
    }

    pub fn close_details(&mut self) {
        self.selected_product_id = None;
    }

    /// Drops the selection when its product is no longer unmatched.
    /// Returns `true` if the selection was dropped.
    pub fn reconcile(&mut self, input: &ProductsInput) -> bool {
        match self.selected_product_id {
            Some(pid) if !input.is_unmatched(pid) => {
                log::info!("Product {} is no longer unmatched, closing its system list", pid);
                self.close_details();
                true
            }
            _ => false,
        }
    }
}

/// UI state kept across unmount/mount and page reloads
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedProductsState {
    pub selected_product_id: Option<ProductId>,
    pub sort_field: Option<String>,
    pub sort_ascending: Option<bool>,
}

impl PersistedProductsState {
    pub fn from_value(value: serde_json::Value) -> Option<Self> {
        serde_json::from_value(value).ok()
    }

    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Sort field if it names a column of the product table
    pub fn known_sort_field(&self) -> Option<&str> {
        self.sort_field
            .as_deref()
            .filter(|field| *field == SORT_BY_NAME || *field == SORT_BY_SYSTEM_COUNT)
    }
}

/// State to save for the current selection and sort
pub fn saved_state(selection: &DetailsSelection, view_state: &TableViewState) -> PersistedProductsState {
    PersistedProductsState {
        selected_product_id: selection.selected(),
        sort_field: Some(view_state.sort_field.clone()),
        sort_ascending: Some(view_state.sort_ascending),
    }
}

/// Applies a saved sort to `view_state` and returns the saved selection if
/// its product is still unmatched.
///
/// Unknown sort fields are ignored, the default sort stays.
pub fn apply_restored(
    saved: &PersistedProductsState,
    input: &ProductsInput,
    view_state: &mut TableViewState,
) -> Option<ProductId> {
    if let Some(field) = saved.known_sort_field() {
        view_state.sort_field = field.to_string();
    }
    if let Some(ascending) = saved.sort_ascending {
        view_state.sort_ascending = ascending;
    }

    match saved.selected_product_id {
        Some(pid) if input.is_unmatched(pid) => Some(pid),
        Some(pid) => {
            log::info!("Saved selection {} is no longer unmatched, not restoring it", pid);
            None
        }
        None => None,
    }
}
