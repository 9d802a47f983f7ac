use crate::align::LineChange;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One spreadsheet record: its 1-based row number and cell text per column title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub number: usize,
    pub cells: IndexMap<String, String>,
}

/// Records keyed by the id found in their first column, in sheet order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    pub rows: IndexMap<String, Row>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Column titles to compare. Empty means every column both rows share.
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RowStatus {
    Added,
    Removed,
    Unchanged,
    Changed {
        columns: IndexMap<String, Vec<LineChange>>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowDiff {
    pub id: String,
    pub old_row: Option<usize>,
    pub new_row: Option<usize>,
    #[serde(flatten)]
    pub status: RowStatus,
}
