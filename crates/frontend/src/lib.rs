pub mod app;
pub mod shared;
pub mod subscription_matching;

use app::App;
use contracts::subscription_matching::SubscriptionMatchingData;
use leptos::prelude::*;
use shared::i18n::Translations;
use subscription_matching::page_data::PageData;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen(start)]
pub fn start() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
}

/// Unmatched-products screen mounted into a host page element
#[wasm_bindgen]
pub struct SubscriptionMatchingApp {
    data: RwSignal<PageData>,
}

#[wasm_bindgen]
impl SubscriptionMatchingApp {
    /// Mounts the screen into the element with id `element_id`.
    ///
    /// `data_json` is the matcher payload, `translations_json` an optional
    /// flat `{ "text": "translation" }` catalog.
    #[wasm_bindgen(constructor)]
    pub fn new(
        element_id: &str,
        data_json: &str,
        translations_json: Option<String>,
    ) -> Result<SubscriptionMatchingApp, JsValue> {
        let payload = SubscriptionMatchingData::from_json(data_json)
            .map_err(|e| JsValue::from_str(&format!("{:#}", e)))?;
        let translations = match translations_json {
            Some(json) => Translations::from_json(&json).map_err(|e| JsValue::from_str(&e))?,
            None => Translations::default(),
        };

        let parent = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(element_id))
            .and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok())
            .ok_or_else(|| JsValue::from_str(&format!("Element '{}' not found", element_id)))?;

        log::info!(
            "Mounting unmatched products: {} products, {} systems, {} unmatched",
            payload.products.len(),
            payload.systems.len(),
            payload.unmatched_product_ids.len()
        );

        let data = RwSignal::new(PageData::from(payload));
        leptos::mount::mount_to(parent, move || {
            view! { <App data=data translations=translations /> }
        })
        .forget();

        Ok(Self { data })
    }

    /// Replaces the matcher data; unchanged parts keep their identity
    pub fn update(&self, data_json: &str) -> Result<(), JsValue> {
        let payload = SubscriptionMatchingData::from_json(data_json)
            .map_err(|e| JsValue::from_str(&format!("{:#}", e)))?;
        self.data.update(|page| *page = page.updated(payload));
        Ok(())
    }
}
