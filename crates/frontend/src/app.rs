use crate::shared::i18n::Translations;
use crate::shared::popup::PopupService;
use crate::shared::state::ui_state_store::{LocalStorageStateStore, SharedStateStore};
use crate::subscription_matching::page_data::PageData;
use crate::subscription_matching::unmatched_products::UnmatchedProducts;
use leptos::prelude::*;
use std::sync::Arc;

#[component]
pub fn App(
    /// Matcher data pushed by the host page
    data: RwSignal<PageData>,
    /// UI strings; missing keys show the English text
    #[prop(optional)]
    translations: Translations,
) -> impl IntoView {
    provide_context(translations);
    provide_context(PopupService::new());

    // UI state survives page reloads
    let state_store: SharedStateStore = Arc::new(LocalStorageStateStore);
    provide_context(state_store);

    view! {
        <UnmatchedProducts
            products=Signal::derive(move || data.with(|d| Arc::clone(&d.products)))
            systems=Signal::derive(move || data.with(|d| Arc::clone(&d.systems)))
            unmatched_product_ids=Signal::derive(move || data.with(|d| Arc::clone(&d.unmatched_product_ids)))
        />
    }
}
