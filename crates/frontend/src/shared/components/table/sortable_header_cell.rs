//! Sortable table header cell
//!
//! ```ignore
//! <SortableHeaderCell
//!     label=t("Product name")
//!     sort_field="name"
//!     current_sort_field=Signal::derive(move || view_state.with(|s| s.sort_field.clone()))
//!     sort_ascending=Signal::derive(move || view_state.with(|s| s.sort_ascending))
//!     on_sort=Callback::new(move |field: String| view_state.update(|s| s.toggle_sort(&field)))
//! />
//! ```

use crate::shared::list_utils::{get_sort_class, get_sort_indicator};
use leptos::prelude::*;
use thaw::*;

/// Table header cell that sorts by its column on click.
///
/// Shows ▲/▼ on the active column and ⇅ on the others.
#[component]
pub fn SortableHeaderCell(
    /// Header text
    #[prop(into)]
    label: String,

    /// Column name passed to `on_sort`
    #[prop(into)]
    sort_field: String,

    /// Currently sorted column, from the table view state
    #[prop(into)]
    current_sort_field: Signal<String>,

    /// Sort direction, from the table view state
    #[prop(into)]
    sort_ascending: Signal<bool>,

    /// Called with `sort_field` when the header is clicked
    on_sort: Callback<String>,

    /// Minimum column width in pixels
    #[prop(optional, default = 100.0)]
    min_width: f64,

    /// Header alignment, "left" or "right"
    #[prop(optional, default = "left")]
    align: &'static str,
) -> impl IntoView {
    let sort_field_for_click = sort_field.clone();
    let sort_field_for_indicator = sort_field.clone();
    let sort_field_for_class = sort_field;

    let header_style = if align == "right" {
        "cursor: pointer; justify-content: flex-end; padding-right: 12px;"
    } else {
        "cursor: pointer; padding-right: 12px;"
    };

    view! {
        <TableHeaderCell resizable=false min_width=min_width>
            <div
                class="table__sortable-header"
                style=header_style
                on:click=move |_| on_sort.run(sort_field_for_click.clone())
            >
                {label}
                <span class=move || get_sort_class(&current_sort_field.get(), &sort_field_for_class)>
                    {move || {
                        get_sort_indicator(
                            &current_sort_field.get(),
                            &sort_field_for_indicator,
                            sort_ascending.get(),
                        )
                    }}
                </span>
            </div>
        </TableHeaderCell>
    }
}
