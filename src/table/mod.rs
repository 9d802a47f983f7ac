mod types;
pub use types::*;

use crate::calculator::Calculator;
use crate::script::Engine;
use indexmap::IndexMap;
use rayon::prelude::*;

impl Sheet {
    /// Builds a sheet from a grid of cells. The first record holds the column
    /// titles, the first column of every other record holds its id. Records
    /// without an id are skipped.
    pub fn from_grid(grid: &[Vec<String>]) -> Self {
        let titles: Vec<&str> = grid
            .first()
            .map(|header| header.iter().skip(1).map(|t| t.trim()).collect())
            .unwrap_or_default();

        let mut rows = IndexMap::new();
        for (index, record) in grid.iter().enumerate().skip(1) {
            let id = record.first().map(|id| id.trim()).unwrap_or_default();
            if id.is_empty() {
                continue;
            }
            let cells = titles
                .iter()
                .enumerate()
                .map(|(col, title)| {
                    let value = record.get(col + 1).cloned().unwrap_or_default();
                    (title.to_string(), value)
                })
                .collect();
            let row = Row {
                number: index + 1,
                cells,
            };
            if rows.insert(id.to_string(), row).is_some() {
                log::debug!("duplicate id {} at row {}, keeping the later one", id, index + 1);
            }
        }
        Sheet { rows }
    }
}

/// Pairs the records of two sheet versions by id and diffs their cells.
pub fn diff_sheets(old: &Sheet, new: &Sheet, options: &TableOptions) -> Vec<RowDiff> {
    diff_sheets_with(&Calculator::new(), old, new, options)
}

/// Like [`diff_sheets`] with a caller supplied engine. Records are compared in
/// parallel; the result keeps old sheet order followed by records only found
/// in the new sheet.
pub fn diff_sheets_with<E: Engine>(
    calculator: &Calculator<E>,
    old: &Sheet,
    new: &Sheet,
    options: &TableOptions,
) -> Vec<RowDiff> {
    let ids: Vec<&String> = old
        .rows
        .keys()
        .chain(new.rows.keys().filter(|id| !old.rows.contains_key(*id)))
        .filter(|id| !id.trim().is_empty())
        .collect();

    ids.into_par_iter()
        .map(|id| diff_row(calculator, id, old.rows.get(id), new.rows.get(id), options))
        .collect()
}

fn diff_row<E: Engine>(
    calculator: &Calculator<E>,
    id: &str,
    old: Option<&Row>,
    new: Option<&Row>,
    options: &TableOptions,
) -> RowDiff {
    let status = match (old, new) {
        (None, Some(_)) => {
            log::debug!("{} added", id);
            RowStatus::Added
        }
        (Some(_), None) => {
            log::debug!("{} removed", id);
            RowStatus::Removed
        }
        (Some(a), Some(b)) => {
            let columns = diff_cells(calculator, a, b, options);
            if columns.is_empty() {
                RowStatus::Unchanged
            } else {
                log::debug!("{} changed in {} column(s)", id, columns.len());
                RowStatus::Changed { columns }
            }
        }
        (None, None) => unreachable!(),
    };

    RowDiff {
        id: id.to_string(),
        old_row: old.map(|r| r.number),
        new_row: new.map(|r| r.number),
        status,
    }
}

fn diff_cells<E: Engine>(
    calculator: &Calculator<E>,
    old: &Row,
    new: &Row,
    options: &TableOptions,
) -> IndexMap<String, Vec<crate::align::LineChange>> {
    let columns: Vec<&String> = if options.columns.is_empty() {
        old.cells
            .keys()
            .filter(|c| new.cells.contains_key(*c))
            .collect()
    } else {
        options.columns.iter().collect()
    };

    columns
        .into_iter()
        .filter_map(|column| {
            let a = old.cells.get(column)?;
            let b = new.cells.get(column)?;
            if a == b {
                return None;
            }
            Some((column.clone(), calculator.run(a, b).collect()))
        })
        .collect()
}
