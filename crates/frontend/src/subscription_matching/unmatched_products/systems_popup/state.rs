use crate::shared::list_utils::{
    compare_ignore_case, contains_ignore_case, filter_list, sort_list, Searchable, Sortable,
    TableViewState,
};
use crate::shared::table_model::{ModelUpdate, RowKey, TableDataModel};
use contracts::subscription_matching::{ProductId, ProductMap, SystemId, SystemMap, SystemType};
use std::cmp::Ordering;
use std::sync::Arc;

pub const SORT_BY_NAME: &str = "name";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemRow {
    pub id: SystemId,
    pub system_name: String,
    pub system_type: SystemType,
}

impl RowKey for SystemRow {
    type Key = SystemId;

    fn row_key(&self) -> SystemId {
        self.id
    }
}

pub fn compare_by_name(a: &SystemRow, b: &SystemRow) -> Ordering {
    compare_ignore_case(&a.system_name, &b.system_name)
}

impl Sortable for SystemRow {
    fn compare_by_field(&self, other: &Self, _field: &str) -> Ordering {
        compare_by_name(self, other)
    }
}

impl Searchable for SystemRow {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ignore_case(&self.system_name, filter)
    }
}

/// Systems whose name contains `criteria`, ignoring case, keeping their order
pub fn search(rows: Vec<SystemRow>, criteria: &str) -> Vec<SystemRow> {
    filter_list(rows, criteria)
}

/// Rows the popup shows: searched by name, then sorted
pub fn visible_rows(rows: &[SystemRow], view_state: &TableViewState) -> Vec<SystemRow> {
    let mut visible = search(rows.to_vec(), &view_state.search_query);
    sort_list(&mut visible, &view_state.sort_field, view_state.sort_ascending);
    visible
}

/// Unmatched systems of the selected product, in the product's order.
/// No selection gives no rows.
pub fn build_rows(
    products: &ProductMap,
    systems: &SystemMap,
    selected_product_id: Option<ProductId>,
) -> Vec<SystemRow> {
    let Some(pid) = selected_product_id else {
        return Vec::new();
    };
    let Some(product) = products.get(&pid) else {
        log::warn!("Selected product {} is missing from the product list", pid);
        return Vec::new();
    };

    product
        .unmatched_system_ids
        .iter()
        .filter_map(|sid| match systems.get(sid) {
            Some(system) => Some(SystemRow {
                id: *sid,
                system_name: system.name.clone(),
                system_type: system.system_type.clone(),
            }),
            None => {
                log::warn!("System {} of product {} is missing from the system list", sid, pid);
                None
            }
        })
        .collect()
}

/// The props the system table is built from
#[derive(Clone, Debug, Default)]
pub struct SystemsInput {
    pub products: Arc<ProductMap>,
    pub systems: Arc<SystemMap>,
    pub selected_product_id: Option<ProductId>,
}

impl SystemsInput {
    pub fn build_rows(&self) -> Vec<SystemRow> {
        build_rows(&self.products, &self.systems, self.selected_product_id)
    }
}

/// System table model after a props update.
///
/// A different selection replaces the model, so the table starts over with
/// its default sort. New product or system snapshots under the same selection
/// are merged into the current model.
pub fn next_system_model(
    prev: &SystemsInput,
    next: &SystemsInput,
    model: &TableDataModel<SystemRow>,
) -> ModelUpdate<SystemRow> {
    if prev.selected_product_id != next.selected_product_id {
        let replaced = TableDataModel::new(next.build_rows());
        log::debug!(
            "Unmatched systems rebuilt for product {:?}: {} rows",
            next.selected_product_id,
            replaced.rows().len()
        );
        return ModelUpdate::Replaced(replaced);
    }

    if Arc::ptr_eq(&prev.products, &next.products) && Arc::ptr_eq(&prev.systems, &next.systems) {
        return ModelUpdate::Unchanged;
    }

    let (merged, stats) = model.merged(next.build_rows());
    log::debug!(
        "Unmatched systems merged: {} added, {} removed, {} updated",
        stats.added,
        stats.removed,
        stats.updated
    );
    ModelUpdate::Merged(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    use contracts::subscription_matching::{Product, System};

    fn system(name: &str, system_type: &str) -> System {
        System {
            name: name.to_string(),
            system_type: SystemType::from(system_type),
        }
    }

    fn products() -> ProductMap {
        let mut map = ProductMap::new();
        map.insert(
            1,
            Product {
                product_name: "Prod A".to_string(),
                unmatched_system_count: 2,
                unmatched_system_ids: vec![10, 20],
            },
        );
        map.insert(
            2,
            Product {
                product_name: "Prod B".to_string(),
                unmatched_system_count: 1,
                unmatched_system_ids: vec![30],
            },
        );
        map
    }

    fn systems() -> SystemMap {
        let mut map = SystemMap::new();
        map.insert(10, system("sys10", "physical"));
        map.insert(20, system("sys20", "virtual"));
        map.insert(30, system("WebServer01", "virtualGuest"));
        map
    }

    fn input(selected: Option<ProductId>) -> SystemsInput {
        SystemsInput {
            products: Arc::new(products()),
            systems: Arc::new(systems()),
            selected_product_id: selected,
        }
    }

    fn names(rows: &[SystemRow]) -> Vec<&str> {
        rows.iter().map(|r| r.system_name.as_str()).collect()
    }

    #[test]
    fn test_no_selection_has_no_rows() {
        assert!(build_rows(&products(), &systems(), None).is_empty());
    }

    #[test]
    fn test_selected_product_systems() {
        let rows = build_rows(&products(), &systems(), Some(1));
        assert_eq!(
            rows,
            vec![
                SystemRow {
                    id: 10,
                    system_name: "sys10".to_string(),
                    system_type: SystemType::from("physical"),
                },
                SystemRow {
                    id: 20,
                    system_name: "sys20".to_string(),
                    system_type: SystemType::from("virtual"),
                },
            ]
        );
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let rows = build_rows(&products(), &systems(), Some(2));
        assert_eq!(names(&search(rows.clone(), "server")), ["WebServer01"]);
        assert!(search(rows, "zzz").is_empty());
    }

    #[test]
    fn test_search_preserves_order() {
        let rows = build_rows(&products(), &systems(), Some(1));
        assert_eq!(names(&search(rows, "SYS")), ["sys10", "sys20"]);
    }

    #[test]
    fn test_visible_rows_searches_then_sorts() {
        let mut systems = systems();
        systems.insert(10, system("web-b", "physical"));
        systems.insert(20, system("Web-A", "virtual"));
        let rows = build_rows(&products(), &systems, Some(1));

        let mut view_state = TableViewState::new(SORT_BY_NAME);
        view_state.search_query = "WEB".to_string();
        assert_eq!(names(&visible_rows(&rows, &view_state)), ["Web-A", "web-b"]);

        view_state.search_query = "-b".to_string();
        assert_eq!(names(&visible_rows(&rows, &view_state)), ["web-b"]);
    }

    #[test]
    fn test_selection_change_replaces_rows() {
        let prev = input(Some(1));
        let model = TableDataModel::new(prev.build_rows());
        let next = SystemsInput {
            selected_product_id: Some(2),
            ..prev.clone()
        };

        match next_system_model(&prev, &next, &model) {
            ModelUpdate::Replaced(replaced) => {
                assert_ne!(replaced.key(), model.key());
                assert_eq!(names(replaced.rows()), ["WebServer01"]);
            }
            other => panic!("expected replace, got {:?}", other),
        }
    }

    #[test]
    fn test_closing_selection_empties_rows() {
        let prev = input(Some(1));
        let model = TableDataModel::new(prev.build_rows());
        let next = SystemsInput {
            selected_product_id: None,
            ..prev.clone()
        };
        let replaced = next_system_model(&prev, &next, &model).into_model().unwrap();
        assert!(replaced.rows().is_empty());
    }

    #[test]
    fn test_data_change_under_same_selection_merges_and_keeps_sort() {
        let prev = input(Some(1));
        let model = TableDataModel::new(prev.build_rows());
        let mut view_state = TableViewState::new(SORT_BY_NAME);
        view_state.sync_model(model.key());
        view_state.toggle_sort(SORT_BY_NAME);

        let mut renamed = systems();
        renamed.insert(20, system("aaa20", "virtual"));
        let next = SystemsInput {
            systems: Arc::new(renamed),
            ..prev.clone()
        };

        let merged = match next_system_model(&prev, &next, &model) {
            ModelUpdate::Merged(merged) => merged,
            other => panic!("expected merge, got {:?}", other),
        };
        assert_eq!(merged.key(), model.key());
        assert_eq!(merged.version(), 1);

        assert!(!view_state.sync_model(merged.key()));
        assert!(!view_state.sort_ascending);
        assert_eq!(names(&view_state.visible_rows(merged.rows())), ["sys10", "aaa20"]);
    }

    #[test]
    fn test_same_snapshots_leave_model_unchanged() {
        let prev = input(Some(1));
        let model = TableDataModel::new(prev.build_rows());
        assert_eq!(
            next_system_model(&prev, &prev.clone(), &model),
            ModelUpdate::Unchanged
        );
    }

    #[test]
    fn test_rows_sorted_by_name_by_default() {
        let mut systems = systems();
        systems.insert(10, system("zz10", "physical"));
        let rows = build_rows(&products(), &systems, Some(1));
        let view_state = TableViewState::new(SORT_BY_NAME);
        assert_eq!(names(&view_state.visible_rows(&rows)), ["sys20", "zz10"]);
    }

    #[test]
    fn test_product_with_two_systems_scenario() {
        use crate::subscription_matching::unmatched_products::{build_rows as product_rows, ProductRow};

        let mut products = ProductMap::new();
        products.insert(
            1,
            Product {
                product_name: "Prod A".to_string(),
                unmatched_system_count: 2,
                unmatched_system_ids: vec![10, 20],
            },
        );
        let systems = systems();

        assert_eq!(
            product_rows(&products, &[1]),
            vec![ProductRow {
                id: 1,
                product_name: "Prod A".to_string(),
                system_count: 2,
            }]
        );

        let rows = build_rows(&products, &systems, Some(1));
        let visible = TableViewState::new(SORT_BY_NAME).visible_rows(&rows);
        assert_eq!(
            visible
                .iter()
                .map(|r| (r.system_name.as_str(), r.system_type.as_str()))
                .collect::<Vec<_>>(),
            [("sys10", "physical"), ("sys20", "virtual")]
        );
    }
}
