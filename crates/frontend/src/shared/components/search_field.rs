use crate::shared::icons::icon;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Search input with debounce and a clear button
#[component]
pub fn SearchInput(
    /// Applied filter value; external changes (e.g. a reset) are reflected in the input
    #[prop(into)]
    value: Signal<String>,
    /// Receives the new filter once typing pauses
    #[prop(into)]
    on_change: Callback<String>,
    /// Hint shown while the input is empty
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let input_value = RwSignal::new(value.get_untracked());
    let generation = StoredValue::new(0u64);

    Effect::new(move |_| {
        let applied = value.get();
        if applied != input_value.get_untracked() {
            input_value.set(applied);
        }
    });

    let handle_input_change = move |new_value: String| {
        input_value.set(new_value.clone());
        generation.update_value(|g| *g += 1);
        let current = generation.get_value();

        spawn_local(async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            // Superseded by later typing
            if generation.try_get_value() == Some(current) {
                on_change.run(new_value);
            }
        });
    };

    let clear_filter = move |_| {
        generation.update_value(|g| *g += 1);
        input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-field">
            <input
                type="text"
                class=move || {
                    if value.get().is_empty() {
                        "search-field__input"
                    } else {
                        "search-field__input search-field__input--active"
                    }
                }
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-field__clear" on:click=clear_filter title="Clear">
                    {icon("x")}
                </button>
            </Show>
        </div>
    }
}
