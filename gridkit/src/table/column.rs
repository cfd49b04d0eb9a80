use log::warn;
use pagedom::{Element, query_all};

use crate::error::TableError;
use crate::sort::SortType;

use super::{FILTER_BUTTON_CLASS, SORTABLE_CLASS};

/// An interactive header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column index into each row's cells.
    pub index: usize,
    /// Element ID of the header cell.
    pub header_id: String,
    /// Query-string key, used in linked mode.
    pub key: Option<String>,
    pub sortable: bool,
    pub sort_type: SortType,
    /// Whether the header contains a filter button.
    pub filterable: bool,
}

/// Header cells of the table's head, in document order.
pub fn header_cells(table: &Element) -> Vec<&Element> {
    table
        .child_nodes()
        .iter()
        .filter(|el| el.tag == "thead")
        .flat_map(|head| query_all(head, |el| el.tag == "th"))
        .collect()
}

/// Interpret one header cell.
///
/// Returns `Ok(None)` for plain headers that neither sort nor filter.
pub fn read_column(th: &Element) -> Result<Option<Column>, TableError> {
    let sortable = th.has_class(SORTABLE_CLASS);
    let filterable = !query_all(th, |el| el.has_class(FILTER_BUTTON_CLASS)).is_empty();
    if !sortable && !filterable {
        return Ok(None);
    }

    let raw = th
        .get_data("column-index")
        .ok_or_else(|| TableError::MissingColumnIndex {
            header_id: th.id.clone(),
        })?;
    let index = raw
        .trim()
        .parse::<usize>()
        .map_err(|_| TableError::InvalidColumnIndex {
            header_id: th.id.clone(),
            value: raw.clone(),
        })?;

    Ok(Some(Column {
        index,
        header_id: th.id.clone(),
        key: th.get_data("column-key").cloned(),
        sortable,
        sort_type: SortType::from_attr(th.get_data("sort-type").map(String::as_str)),
        filterable,
    }))
}

/// All interactive columns. Malformed headers are logged and skipped.
pub fn read_columns(table: &Element) -> Vec<Column> {
    header_cells(table)
        .into_iter()
        .filter_map(|th| match read_column(th) {
            Ok(column) => column,
            Err(e) => {
                warn!("table '{}': skipping header: {}", table.id, e);
                None
            }
        })
        .collect()
}

/// ID of the header cell for `column`.
///
/// Matches the `column-index` attribute first, then falls back to the
/// header's position in the head row.
pub fn header_id_for_column(table: &Element, column: usize) -> Option<String> {
    let headers = header_cells(table);
    headers
        .iter()
        .find(|th| {
            th.get_data("column-index")
                .and_then(|v| v.trim().parse::<usize>().ok())
                == Some(column)
        })
        .or_else(|| headers.get(column))
        .map(|th| th.id.clone())
}
