mod state;

pub use state::{build_rows, compare_by_name, next_system_model, search, SystemRow, SystemsInput};

use crate::shared::components::search_field::SearchInput;
use crate::shared::components::system_label::SystemLabel;
use crate::shared::components::table::SortableHeaderCell;
use crate::shared::i18n::t;
use crate::shared::list_utils::TableViewState;
use crate::shared::popup::PopUp;
use crate::shared::table_model::TableDataModel;
use contracts::subscription_matching::{ProductId, ProductMap, SystemMap};
use leptos::prelude::*;
use state::SORT_BY_NAME;
use std::sync::Arc;
use thaw::*;

/// DOM id of the popup, also the id it is opened with
pub const POPUP_ID: &str = "unmatchedProductsPopUp";
const TABLE_ID: &str = "unmatched-systems-table";

/// Searchable list of the unmatched systems of the selected product
#[component]
pub fn UnmatchedSystemsPopup(
    /// All products by id
    #[prop(into)]
    products: Signal<Arc<ProductMap>>,
    /// All systems by id
    #[prop(into)]
    systems: Signal<Arc<SystemMap>>,
    /// Product whose systems are listed; a change starts the table over
    #[prop(into)]
    selected_product_id: Signal<Option<ProductId>>,
    /// Called when the popup is closed
    on_close: Callback<()>,
) -> impl IntoView {
    let initial = SystemsInput {
        products: products.get_untracked(),
        systems: systems.get_untracked(),
        selected_product_id: selected_product_id.get_untracked(),
    };
    let model = RwSignal::new(TableDataModel::new(initial.build_rows()));
    let view_state = RwSignal::new(TableViewState::new(SORT_BY_NAME));
    view_state.update(|s| {
        s.sync_model(model.with_untracked(|m| m.key()));
    });
    let last_input = StoredValue::new(initial);

    Effect::new(move |_| {
        let next = SystemsInput {
            products: products.get(),
            systems: systems.get(),
            selected_product_id: selected_product_id.get(),
        };
        let prev = last_input.get_value();
        let update = model.with_untracked(|m| next_system_model(&prev, &next, m));
        if let Some(next_model) = update.into_model() {
            view_state.update(|s| {
                s.sync_model(next_model.key());
            });
            model.set(next_model);
        }
        last_input.set_value(next);
    });

    let visible_rows = Memo::new(move |_| {
        view_state.with(|view| model.with(|m| state::visible_rows(m.rows(), view)))
    });
    let search_query = Signal::derive(move || view_state.with(|s| s.search_query.clone()));

    view! {
        <PopUp title=t("Unmatched systems") id=POPUP_ID on_close=on_close>
            <div class="filter-panel">
                <SearchInput
                    value=search_query
                    on_change=Callback::new(move |query: String| {
                        view_state.update(|s| s.search_query = query);
                    })
                    placeholder=t("Filter by name")
                />
            </div>

            <div class="table-wrapper">
                <Table attr:id=TABLE_ID attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <SortableHeaderCell
                                label=t("System name")
                                sort_field=SORT_BY_NAME
                                current_sort_field=Signal::derive(move || view_state.with(|s| s.sort_field.clone()))
                                sort_ascending=Signal::derive(move || view_state.with(|s| s.sort_ascending))
                                on_sort=Callback::new(move |field: String| view_state.update(|s| s.toggle_sort(&field)))
                                min_width=240.0
                            />
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || visible_rows.get()
                            // Merges re-render rows, sorting only moves them
                            key=move |row: &SystemRow| (row.id, model.with_untracked(|m| m.version()))
                            children=move |row| {
                                view! {
                                    <TableRow>
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                <SystemLabel
                                                    system_type=row.system_type
                                                    name=row.system_name
                                                    highlight=search_query
                                                />
                                            </TableCellLayout>
                                        </TableCell>
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>
                <Show when=move || visible_rows.with(|rows| rows.is_empty())>
                    <p class="table__empty">{t("No systems found.")}</p>
                </Show>
            </div>
        </PopUp>
    }
}
