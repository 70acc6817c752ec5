mod state;
pub mod systems_popup;

pub use state::{
    build_rows, compare_by_name, compare_by_system_count, DetailsSelection, ProductRow,
    ProductsInput,
};

use crate::shared::components::csv_link::CsvLink;
use crate::shared::components::table::SortableHeaderCell;
use crate::shared::i18n::t;
use crate::shared::icons::icon;
use crate::shared::list_utils::TableViewState;
use crate::shared::popup::use_popup_service;
use crate::shared::state::ui_state_store::{MemoryStateStore, SharedStateStore};
use crate::shared::table_model::TableDataModel;
use contracts::subscription_matching::{ProductId, ProductMap, SystemMap};
use leptos::prelude::*;
use state::{
    apply_restored, next_product_model, saved_state, PersistedProductsState, SORT_BY_NAME,
    SORT_BY_SYSTEM_COUNT,
};
use std::sync::Arc;
use systems_popup::{UnmatchedSystemsPopup, POPUP_ID};
use thaw::*;

const TABLE_ID: &str = "unmatched-products-table";
pub const CSV_FILE_NAME: &str = "unmatched_product_report.csv";
const STATE_KEY: &str = "subscription_matching.unmatched_products";

/// Unmatched products with a drill-down into their unmatched systems.
///
/// Sort column and the open system list are restored from the state store
/// on mount and saved back whenever they change. The store comes from the
/// `state_store` prop, then from context, then a fresh in-memory one.
#[component]
pub fn UnmatchedProducts(
    /// All products by id, including matched ones
    #[prop(into)]
    products: Signal<Arc<ProductMap>>,
    /// All systems by id, for the system list popup
    #[prop(into)]
    systems: Signal<Arc<SystemMap>>,
    /// Products to list, in display order before sorting
    #[prop(into)]
    unmatched_product_ids: Signal<Arc<Vec<ProductId>>>,
    /// Where the sort and the open system list are kept
    #[prop(optional)]
    state_store: Option<SharedStateStore>,
) -> impl IntoView {
    let popups = use_popup_service();
    let state_store = state_store
        .or_else(use_context::<SharedStateStore>)
        .unwrap_or_else(MemoryStateStore::shared);

    let initial = ProductsInput {
        products: products.get_untracked(),
        unmatched_product_ids: unmatched_product_ids.get_untracked(),
    };
    let model = RwSignal::new(TableDataModel::new(initial.build_rows()));
    let view_state = RwSignal::new(TableViewState::new(SORT_BY_NAME));
    view_state.update(|s| {
        s.sync_model(model.with_untracked(|m| m.key()));
    });
    let selection = RwSignal::new(DetailsSelection::default());

    if let Some(saved) = state_store
        .restore(STATE_KEY)
        .and_then(PersistedProductsState::from_value)
    {
        let mut restored = None;
        view_state.update(|s| restored = apply_restored(&saved, &initial, s));
        if let Some(pid) = restored {
            selection.update(|s| s.show_details_for(pid));
            popups.open(POPUP_ID);
        }
    }

    let persisted = Memo::new(move |_| selection.with(|sel| view_state.with(|s| saved_state(sel, s))));
    Effect::new({
        let state_store = state_store.clone();
        move |_| state_store.save(STATE_KEY, persisted.get().to_value())
    });
    on_cleanup(move || {
        let saved = selection.try_with_untracked(|sel| {
            view_state.try_with_untracked(|s| saved_state(sel, s))
        });
        if let Some(Some(saved)) = saved {
            state_store.save(STATE_KEY, saved.to_value());
        }
    });

    let last_input = StoredValue::new(initial);

    Effect::new(move |_| {
        let next = ProductsInput {
            products: products.get(),
            unmatched_product_ids: unmatched_product_ids.get(),
        };
        let prev = last_input.get_value();
        let update = model.with_untracked(|m| next_product_model(&prev, &next, m));
        if let Some(merged) = update.into_model() {
            if model.with_untracked(|m| m.version()) != merged.version() {
                model.set(merged);
            }
            if selection.try_update(|s| s.reconcile(&next)) == Some(true) {
                popups.close_if_open(POPUP_ID);
            }
        }
        last_input.set_value(next);
    });

    let show_details_for = move |product_id: ProductId| {
        selection.update(|s| s.show_details_for(product_id));
        popups.open(POPUP_ID);
    };
    let close_details = Callback::new(move |_: ()| selection.update(|s| s.close_details()));

    let visible_rows = Memo::new(move |_| {
        view_state.with(|state| model.with(|m| state.visible_rows(m.rows())))
    });
    let selected_product_id = Memo::new(move |_| selection.with(|s| s.selected()));
    let current_sort_field = Signal::derive(move || view_state.with(|s| s.sort_field.clone()));
    let sort_ascending = Signal::derive(move || view_state.with(|s| s.sort_ascending));
    let toggle_sort = Callback::new(move |field: String| view_state.update(|s| s.toggle_sort(&field)));

    view! {
        <div class="unmatched-products">
            <h2 class="page__title">{t("Unmatched Products")}</h2>
            <Show
                when=move || unmatched_product_ids.with(|ids| !ids.is_empty())
                fallback=|| view! { <p class="unmatched-products__empty">{t("No unmatching products are found.")}</p> }
            >
                <div class="table-wrapper">
                    <Table attr:id=TABLE_ID attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <SortableHeaderCell
                                    label=t("Product name")
                                    sort_field=SORT_BY_NAME
                                    current_sort_field=current_sort_field
                                    sort_ascending=sort_ascending
                                    on_sort=toggle_sort
                                    min_width=240.0
                                />
                                <SortableHeaderCell
                                    label=t("Unmatched system count")
                                    sort_field=SORT_BY_SYSTEM_COUNT
                                    current_sort_field=current_sort_field
                                    sort_ascending=sort_ascending
                                    on_sort=toggle_sort
                                    min_width=120.0
                                    align="right"
                                />
                                <TableHeaderCell resizable=false min_width=140.0></TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || visible_rows.get()
                                // Merges re-render rows, sorting only moves them
                                key=move |row: &ProductRow| (row.id, model.with_untracked(|m| m.version()))
                                children=move |row| {
                                    let product_id = row.id;
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {row.product_name}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span class="table__cell--right">{row.system_count}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <Button
                                                        appearance=ButtonAppearance::Secondary
                                                        on_click=move |_| show_details_for(product_id)
                                                    >
                                                        {icon("list")}
                                                        " "
                                                        {t("Show system list")}
                                                    </Button>
                                                </TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>

                <CsvLink name=CSV_FILE_NAME rows=Signal::derive(move || visible_rows.get()) />

                <UnmatchedSystemsPopup
                    products=products
                    systems=systems
                    selected_product_id=selected_product_id
                    on_close=close_details
                />
            </Show>
        </div>
    }
}
