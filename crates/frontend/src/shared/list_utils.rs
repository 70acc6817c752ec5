/// Utilities for client-side lists: search, sorting, match highlighting
use leptos::prelude::*;
use std::cmp::Ordering;
use uuid::Uuid;

/// Rows that can be filtered by a free-text query
pub trait Searchable {
    /// Whether the row matches the (non-empty) search query
    fn matches_filter(&self, filter: &str) -> bool;
}

/// Rows that can be ordered by a named column
pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Case-insensitive string ordering used by name columns.
///
/// In the browser this is `localeCompare` of the lowercased strings, so
/// accented letters sort next to their base letter ("Éclair" before "fig").
#[cfg(target_arch = "wasm32")]
pub fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    let a = js_sys::JsString::from(a.to_lowercase());
    let b = b.to_lowercase();
    a.locale_compare(&b, &js_sys::Array::new(), &js_sys::Object::new())
        .cmp(&0)
}

/// Case-insensitive string ordering used by name columns.
///
/// Outside the browser there is no collator; lowercased strings are compared
/// by code point.
#[cfg(not(target_arch = "wasm32"))]
pub fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Case-insensitive substring containment
pub fn contains_ignore_case(text: &str, filter: &str) -> bool {
    text.to_lowercase().contains(&filter.to_lowercase())
}

/// Stable sort by the given column
pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending { cmp } else { cmp.reverse() }
    });
}

/// Keeps the rows matching the query, preserving their relative order.
/// An empty query keeps everything.
pub fn filter_list<T: Searchable>(items: Vec<T>, filter: &str) -> Vec<T> {
    if filter.is_empty() {
        return items;
    }

    items
        .into_iter()
        .filter(|item| item.matches_filter(filter))
        .collect()
}

/// Sort and search state of one table, tied to the identity of its data model
#[derive(Clone, Debug, PartialEq)]
pub struct TableViewState {
    pub model_key: Option<Uuid>,
    pub sort_field: String,
    pub sort_ascending: bool,
    pub search_query: String,
    default_sort_field: &'static str,
}

impl TableViewState {
    pub fn new(default_sort_field: &'static str) -> Self {
        Self {
            model_key: None,
            sort_field: default_sort_field.to_string(),
            sort_ascending: true,
            search_query: String::new(),
            default_sort_field,
        }
    }

    /// Binds the state to a data model. A model with a different identity
    /// starts over from the default sort and an empty search.
    /// Returns `true` if the state was reset.
    pub fn sync_model(&mut self, model_key: Uuid) -> bool {
        match self.model_key {
            Some(current) if current == model_key => false,
            Some(_) => {
                *self = Self::new(self.default_sort_field);
                self.model_key = Some(model_key);
                true
            }
            None => {
                self.model_key = Some(model_key);
                false
            }
        }
    }

    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_field == field {
            self.sort_ascending = !self.sort_ascending;
        } else {
            self.sort_field = field.to_string();
            self.sort_ascending = true;
        }
    }

    /// Rows as the table shows them: filtered by the search query, then sorted
    pub fn visible_rows<T: Sortable + Searchable + Clone>(&self, rows: &[T]) -> Vec<T> {
        let mut data = filter_list(rows.to_vec(), &self.search_query);
        sort_list(&mut data, &self.sort_field, self.sort_ascending);
        data
    }
}

/// Highlights case-insensitive matches of `filter` inside `text`
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    if filter.is_empty() {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let ranges = match_ranges(text, filter);
    if ranges.is_empty() {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let mut parts: Vec<AnyView> = Vec::new();
    let mut last_pos = 0;
    for (start, end) in ranges {
        if start > last_pos {
            parts.push(view! { <span>{text[last_pos..start].to_string()}</span> }.into_any());
        }
        parts.push(view! {
            <span class="search-match">{text[start..end].to_string()}</span>
        }.into_any());
        last_pos = end;
    }
    if last_pos < text.len() {
        parts.push(view! { <span>{text[last_pos..].to_string()}</span> }.into_any());
    }

    view! { <>{parts}</> }.into_any()
}

/// Byte ranges of non-overlapping case-insensitive matches.
///
/// Only characters whose lowercase form has the same byte length are
/// compared, so the ranges are always valid for `text`.
fn match_ranges(text: &str, filter: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = filter.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return Vec::new();
    }

    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut ranges = Vec::new();
    let mut i = 0;
    while i + needle.len() <= chars.len() {
        let matched = chars[i..i + needle.len()]
            .iter()
            .zip(&needle)
            .all(|((_, c), n)| {
                let mut lower = c.to_lowercase();
                lower.next() == Some(*n) && lower.next().is_none()
            });
        if matched {
            let start = chars[i].0;
            let end = chars
                .get(i + needle.len())
                .map(|(pos, _)| *pos)
                .unwrap_or(text.len());
            ranges.push((start, end));
            i += needle.len();
        } else {
            i += 1;
        }
    }
    ranges
}

/// Sort indicator for a column header
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending { " ▲" } else { " ▼" }
    } else {
        " ⇅"
    }
}

pub fn get_sort_class(current_field: &str, field: &str) -> &'static str {
    if current_field == field {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        name: &'static str,
        count: u32,
    }

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "count" => self.count.cmp(&other.count),
                _ => compare_ignore_case(self.name, other.name),
            }
        }
    }

    impl Searchable for Row {
        fn matches_filter(&self, filter: &str) -> bool {
            contains_ignore_case(self.name, filter)
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "zeta", count: 0 },
            Row { name: "Alpha", count: 10 },
            Row { name: "beta", count: 2 },
        ]
    }

    #[test]
    fn test_sort_list_ascending_and_descending() {
        let mut data = rows();
        sort_list(&mut data, "name", true);
        assert_eq!(data.iter().map(|r| r.name).collect::<Vec<_>>(), ["Alpha", "beta", "zeta"]);

        sort_list(&mut data, "count", false);
        assert_eq!(data.iter().map(|r| r.count).collect::<Vec<_>>(), [10, 2, 0]);
    }

    #[test]
    fn test_filter_list_keeps_order() {
        let filtered = filter_list(rows(), "ETA");
        assert_eq!(filtered.iter().map(|r| r.name).collect::<Vec<_>>(), ["zeta", "beta"]);
        assert_eq!(filter_list(rows(), "").len(), 3);
        assert!(filter_list(rows(), "zzz").is_empty());
    }

    #[test]
    fn test_view_state_reset_on_new_model() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let mut state = TableViewState::new("name");

        assert!(!state.sync_model(first));
        state.toggle_sort("count");
        state.search_query = "a".to_string();

        assert!(!state.sync_model(first));
        assert_eq!(state.sort_field, "count");

        assert!(state.sync_model(second));
        assert_eq!(state.sort_field, "name");
        assert!(state.sort_ascending);
        assert!(state.search_query.is_empty());
        assert_eq!(state.model_key, Some(second));
    }

    #[test]
    fn test_toggle_sort() {
        let mut state = TableViewState::new("name");
        state.toggle_sort("name");
        assert!(!state.sort_ascending);
        state.toggle_sort("count");
        assert_eq!(state.sort_field, "count");
        assert!(state.sort_ascending);
    }

    #[test]
    fn test_visible_rows_filters_then_sorts() {
        let mut state = TableViewState::new("name");
        state.search_query = "a".to_string();
        let visible = state.visible_rows(&rows());
        assert_eq!(visible.iter().map(|r| r.name).collect::<Vec<_>>(), ["Alpha", "beta", "zeta"]);
    }

    #[test]
    fn test_compare_ignore_case_ties_keep_input_order() {
        assert_eq!(compare_ignore_case("alpha", "ALPHA"), Ordering::Equal);
        assert_eq!(compare_ignore_case("Beta", "alpha"), Ordering::Greater);

        let mut data = vec![
            Row { name: "ALPHA", count: 1 },
            Row { name: "beta", count: 2 },
            Row { name: "alpha", count: 3 },
        ];
        sort_list(&mut data, "name", true);
        assert_eq!(data.iter().map(|r| r.count).collect::<Vec<_>>(), [1, 3, 2]);
    }

    #[test]
    fn test_match_ranges() {
        assert_eq!(match_ranges("WebServer01", "server"), vec![(3, 9)]);
        assert_eq!(match_ranges("aAa", "a"), vec![(0, 1), (1, 2), (2, 3)]);
        assert!(match_ranges("WebServer01", "zzz").is_empty());
        assert_eq!(match_ranges("Überhost", "über"), vec![(0, 5)]);
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("name", "name", true), " ▲");
        assert_eq!(get_sort_indicator("name", "name", false), " ▼");
        assert_eq!(get_sort_indicator("name", "count", true), " ⇅");
    }
}
