use crate::shared::icons::icon;
use crate::shared::list_utils::highlight_matches;
use contracts::subscription_matching::SystemType;
use leptos::prelude::*;

/// Icon name for a system type, `None` for types without an icon
pub fn system_type_icon(system_type: &SystemType) -> Option<&'static str> {
    match system_type {
        SystemType::NonVirtual => Some("monitor"),
        SystemType::VirtualHost => Some("cloud"),
        SystemType::VirtualGuest => Some("cloud-download"),
        SystemType::Other(_) => None,
    }
}

/// System name with an icon for its type
#[component]
pub fn SystemLabel(
    /// Picks the icon and the hover title
    system_type: SystemType,
    /// System name
    #[prop(into)]
    name: String,
    /// Part of the name to highlight
    #[prop(optional, into)]
    highlight: MaybeProp<String>,
) -> impl IntoView {
    let title = system_type.to_string();

    view! {
        <span class="system-label" title=title>
            {system_type_icon(&system_type).map(|icon_name| view! {
                <span class="system-label__icon">{icon(icon_name)}</span>
            })}
            <span class="system-label__name">
                {move || highlight_matches(&name, &highlight.get().unwrap_or_default())}
            </span>
        </span>
    }
}
