use crate::shared::export::{export_to_csv, CsvExportable};
use crate::shared::i18n::t;
use crate::shared::icons::icon;
use leptos::prelude::*;

/// Link that downloads the given rows as a CSV report named `name`
#[component]
pub fn CsvLink<T>(
    /// File name of the download, also shown next to the button
    #[prop(into)]
    name: String,
    /// Rows in the order they are written
    rows: Signal<Vec<T>>,
) -> impl IntoView
where
    T: CsvExportable + Clone + Send + Sync + 'static,
{
    let file_name = name.clone();
    let download = move |_| {
        let data = rows.get_untracked();
        if let Err(e) = export_to_csv(&data, &file_name) {
            log::error!("CSV export to '{}' failed: {}", file_name, e);
        }
    };

    view! {
        <div class="csv-link">
            <button class="button button--secondary" on:click=download>
                {icon("download")}
                " "
                {t("Download CSV")}
            </button>
            <span class="csv-link__name">{name}</span>
        </div>
    }
}
