//! Row data model behind a table.
//!
//! A model is an immutable snapshot. `TableDataModel::new` starts a new
//! identity (the table resets its sort and search), `TableDataModel::merged`
//! keeps the identity and bumps the version, so the table keeps its UI state
//! while the rows change underneath.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use uuid::Uuid;

/// Rows with a stable key, unique within one table
pub trait RowKey {
    type Key: Clone + Eq + Hash + Send + Sync + 'static;

    fn row_key(&self) -> Self::Key;
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableDataModel<T> {
    key: Uuid,
    version: u64,
    rows: Arc<Vec<T>>,
}

/// Outcome of diffing the previous rows against the merged ones by row key
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub added: usize,
    pub removed: usize,
    pub updated: usize,
    pub unchanged: usize,
}

/// What happened to a model on a props update
#[derive(Clone, Debug, PartialEq)]
pub enum ModelUpdate<T> {
    Unchanged,
    Merged(TableDataModel<T>),
    Replaced(TableDataModel<T>),
}

impl<T> ModelUpdate<T> {
    pub fn into_model(self) -> Option<TableDataModel<T>> {
        match self {
            ModelUpdate::Unchanged => None,
            ModelUpdate::Merged(model) | ModelUpdate::Replaced(model) => Some(model),
        }
    }
}

impl<T: RowKey + Clone + PartialEq> TableDataModel<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            key: Uuid::new_v4(),
            version: 0,
            rows: Arc::new(rows),
        }
    }

    pub fn key(&self) -> Uuid {
        self.key
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Snapshot holding `rows` under the same identity.
    ///
    /// The version only moves when the rows differ from the current ones,
    /// including a pure reordering.
    pub fn merged(&self, rows: Vec<T>) -> (Self, MergeStats) {
        let stats = diff_rows(&self.rows, &rows);

        if *self.rows == rows {
            return (self.clone(), stats);
        }

        let merged = Self {
            key: self.key,
            version: self.version + 1,
            rows: Arc::new(rows),
        };
        (merged, stats)
    }
}

fn diff_rows<T: RowKey + PartialEq>(old: &[T], new: &[T]) -> MergeStats {
    let previous: HashMap<T::Key, &T> = old.iter().map(|row| (row.row_key(), row)).collect();
    let mut stats = MergeStats::default();
    let mut seen = 0;

    for row in new {
        match previous.get(&row.row_key()) {
            Some(old_row) => {
                seen += 1;
                if *old_row == row {
                    stats.unchanged += 1;
                } else {
                    stats.updated += 1;
                }
            }
            None => stats.added += 1,
        }
    }
    stats.removed = previous.len().saturating_sub(seen);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        id: i64,
        label: &'static str,
    }

    impl RowKey for Row {
        type Key = i64;

        fn row_key(&self) -> i64 {
            self.id
        }
    }

    fn row(id: i64, label: &'static str) -> Row {
        Row { id, label }
    }

    #[test]
    fn test_new_models_have_distinct_identity() {
        let a = TableDataModel::new(vec![row(1, "a")]);
        let b = TableDataModel::new(vec![row(1, "a")]);
        assert_ne!(a.key(), b.key());
        assert_eq!(a.version(), 0);
        assert_eq!(a.rows(), &[row(1, "a")]);
    }

    #[test]
    fn test_merge_with_same_rows_keeps_version() {
        let model = TableDataModel::new(vec![row(1, "a"), row(2, "b")]);
        let (merged, stats) = model.merged(vec![row(1, "a"), row(2, "b")]);
        assert_eq!(merged, model);
        assert_eq!(stats, MergeStats { unchanged: 2, ..Default::default() });
    }

    #[test]
    fn test_merge_keeps_identity_and_bumps_version() {
        let model = TableDataModel::new(vec![row(1, "a"), row(2, "b")]);
        let (merged, stats) = model.merged(vec![row(2, "B"), row(3, "c")]);

        assert_eq!(merged.key(), model.key());
        assert_eq!(merged.version(), 1);
        assert_eq!(merged.rows(), &[row(2, "B"), row(3, "c")]);
        assert_eq!(
            stats,
            MergeStats { added: 1, removed: 1, updated: 1, unchanged: 0 }
        );
    }

    #[test]
    fn test_reorder_bumps_version() {
        let model = TableDataModel::new(vec![row(1, "a"), row(2, "b")]);
        let (merged, stats) = model.merged(vec![row(2, "b"), row(1, "a")]);
        assert_eq!(stats, MergeStats { unchanged: 2, ..Default::default() });
        assert_eq!(merged.version(), 1);
    }

    #[test]
    fn test_model_update_into_model() {
        let model = TableDataModel::new(vec![row(1, "a")]);
        assert_eq!(ModelUpdate::<Row>::Unchanged.into_model(), None);
        assert_eq!(
            ModelUpdate::Merged(model.clone()).into_model(),
            Some(model.clone())
        );
        assert_eq!(ModelUpdate::Replaced(model.clone()).into_model(), Some(model));
    }
}
