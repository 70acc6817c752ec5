//! UI text lookup.
//!
//! Texts are written in English in the code and used as catalog keys. A
//! catalog supplied by the host page replaces them; missing keys fall back to
//! the key itself.

use leptos::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
pub struct Translations {
    entries: Arc<HashMap<String, String>>,
}

impl Translations {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Parses a flat `{ "key": "text" }` JSON object
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str::<HashMap<String, String>>(json)
            .map(Self::new)
            .map_err(|e| format!("Invalid translations: {}", e))
    }

    pub fn translate(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

/// Translates `key` with the catalog provided in the current context
pub fn t(key: &str) -> String {
    match use_context::<Translations>() {
        Some(translations) => translations.translate(key),
        None => key.to_string(),
    }
}
