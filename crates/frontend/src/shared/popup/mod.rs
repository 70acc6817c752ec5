//! Popups addressed by id.
//!
//! Triggers open a popup through `PopupService::open` instead of relying on
//! DOM attributes, and the popup shell renders only while it is the open one.

use crate::shared::icons::icon;
use crate::shared::modal_frame::ModalFrame;
use leptos::ev;
use leptos::prelude::*;

#[derive(Clone, Copy, Debug)]
pub struct PopupService {
    open_id: RwSignal<Option<String>>,
}

impl PopupService {
    pub fn new() -> Self {
        Self {
            open_id: RwSignal::new(None),
        }
    }

    /// Shows the popup with this id, hiding any other one
    pub fn open(&self, id: &str) {
        self.open_id.set(Some(id.to_string()));
    }

    pub fn close(&self) {
        self.open_id.set(None);
    }

    /// Closes the popup only if it is the open one; another popup stays open
    pub fn close_if_open(&self, id: &str) -> bool {
        if self.is_open_untracked(id) {
            self.close();
            true
        } else {
            false
        }
    }

    /// Reactive: tracks the open popup
    pub fn is_open(&self, id: &str) -> bool {
        self.open_id.with(|open| open.as_deref() == Some(id))
    }

    pub fn is_open_untracked(&self, id: &str) -> bool {
        self.open_id.with_untracked(|open| open.as_deref() == Some(id))
    }
}

impl Default for PopupService {
    fn default() -> Self {
        Self::new()
    }
}

/// Popup service from context, provided on first use
pub fn use_popup_service() -> PopupService {
    use_context::<PopupService>().unwrap_or_else(|| {
        let service = PopupService::new();
        provide_context(service);
        service
    })
}

/// Popup shell: title bar with a close button, content below.
///
/// Closes on the close button, on Escape and on an overlay click; each of
/// them hides the popup and runs `on_close`.
#[component]
pub fn PopUp(
    /// Title bar text
    #[prop(into)]
    title: String,
    /// Id the popup is opened with, also used as DOM id
    #[prop(into)]
    id: String,
    /// Called after the popup is hidden
    on_close: Callback<()>,
    /// Popup body, rendered each time the popup opens
    children: ChildrenFn,
) -> impl IntoView {
    let popups = use_popup_service();

    let close = move || {
        popups.close();
        on_close.run(());
    };

    let id_for_keys = id.clone();
    let key_handle = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" && popups.is_open_untracked(&id_for_keys) {
            close();
        }
    });
    on_cleanup(move || key_handle.remove());

    move || {
        if popups.is_open(&id) {
            let dom_id = id.clone();
            let title = title.clone();
            let children = children.clone();
            view! {
                <ModalFrame
                    on_close=Callback::new(move |_| close())
                    dom_id=dom_id
                    modal_class="popup"
                >
                    <div class="modal-header">
                        <h2 class="modal-title">{title}</h2>
                        <div class="modal-header-actions">
                            <button class="button button--icon modal__close" on:click=move |_| close()>
                                {icon("x")}
                            </button>
                        </div>
                    </div>
                    <div class="modal-body">
                        {children()}
                    </div>
                </ModalFrame>
            }
            .into_any()
        } else {
            view! { <></> }.into_any()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_service_tracks_single_open_popup() {
        let popups = PopupService::new();
        assert!(!popups.is_open_untracked("a"));

        popups.open("a");
        assert!(popups.is_open_untracked("a"));

        popups.open("b");
        assert!(!popups.is_open_untracked("a"));
        assert!(popups.is_open_untracked("b"));

        popups.close();
        assert!(!popups.is_open_untracked("b"));
    }

    #[test]
    fn test_close_if_open_leaves_other_popup() {
        let popups = PopupService::new();
        popups.open("other");
        assert!(!popups.close_if_open("mine"));
        assert!(popups.is_open_untracked("other"));

        popups.open("mine");
        assert!(popups.close_if_open("mine"));
        assert!(!popups.is_open_untracked("mine"));
    }
}
