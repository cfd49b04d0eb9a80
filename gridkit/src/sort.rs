//! Column sorting.
//!
//! Comparison is pure ([`compare`], [`numeric_value`]); [`sort_table`] applies a
//! sort to a rendered table by reordering its body rows and updating the
//! header indicators.

use std::cmp::Ordering;

use log::debug;
use pagedom::{Element, find_element_mut, query_all, walk_mut};

use crate::table::{SORT_ARROW_CLASS, cell_value, header_cells, header_id_for_column, tbody_mut};

/// Class added to the sort arrow of an ascending column.
pub const SORTED_ASC_CLASS: &str = "sorted-asc";
/// Class added to the sort arrow of a descending column.
pub const SORTED_DESC_CLASS: &str = "sorted-desc";

/// How cell text is compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortType {
    /// Case-insensitive lexical compare.
    #[default]
    Text,
    /// Strip everything but digits, `.` and `-`, then compare as numbers.
    Numeric,
}

impl SortType {
    /// Parse the `sort-type` attribute. Only `num` selects numeric.
    pub fn from_attr(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("num") => Self::Numeric,
            _ => Self::Text,
        }
    }

    pub fn as_attr(self) -> &'static str {
        match self {
            Self::Text => "str",
            Self::Numeric => "num",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Attribute and query-string spelling: `asc` / `desc`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Ascending),
            "desc" => Some(Self::Descending),
            _ => None,
        }
    }
}

/// The single active sort of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: usize,
    pub direction: SortDirection,
}

/// Sort state after selecting `column`.
///
/// Re-selecting the active column toggles its direction; any other column
/// starts ascending.
pub fn next_sort(current: Option<SortState>, column: usize) -> SortState {
    match current {
        Some(state) if state.column == column => SortState {
            column,
            direction: state.direction.toggled(),
        },
        _ => SortState {
            column,
            direction: SortDirection::Ascending,
        },
    }
}

/// Numeric reading of a cell: non-numeric characters are stripped, and
/// text with no numeric prefix left is `0`.
pub fn numeric_value(text: &str) -> f64 {
    let stripped: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    // Longest parseable prefix, so "1.2.3" reads as 1.2.
    (1..=stripped.len())
        .rev()
        .find_map(|end| stripped[..end].parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Ascending comparison of two cell values.
pub fn compare(a: &str, b: &str, sort_type: SortType) -> Ordering {
    match sort_type {
        SortType::Numeric => numeric_value(a)
            .partial_cmp(&numeric_value(b))
            .unwrap_or(Ordering::Equal),
        SortType::Text => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

/// Sort the table's body rows by `state` and mark the header.
///
/// Rows are reordered in place with a stable sort, hidden rows included.
/// A table without a body or header is left untouched.
pub fn sort_table(table: &mut Element, state: SortState, sort_type: SortType) {
    mark_headers(table, state);

    let table_id = table.id.clone();
    let Some(body) = tbody_mut(table) else {
        debug!("table '{table_id}': no body to sort");
        return;
    };
    let Some(rows) = body.child_nodes_mut() else {
        return;
    };

    rows.sort_by(|a, b| {
        let va = cell_value(a, state.column).unwrap_or_default();
        let vb = cell_value(b, state.column).unwrap_or_default();
        let ord = compare(&va, &vb, sort_type);
        match state.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });

    debug!(
        "sorted {} rows by column {} {}",
        rows.len(),
        state.column,
        state.direction.as_str()
    );
}

/// Clear every header's direction marker, then set it on the active column.
fn mark_headers(table: &mut Element, state: SortState) {
    let header_ids: Vec<String> = header_cells(table).iter().map(|th| th.id.clone()).collect();
    for id in &header_ids {
        if let Some(th) = find_element_mut(table, id) {
            th.remove_data("dir");
            walk_mut(th, &mut |el| {
                if el.has_class(SORT_ARROW_CLASS) {
                    el.remove_class(SORTED_ASC_CLASS);
                    el.remove_class(SORTED_DESC_CLASS);
                }
            });
        }
    }

    let Some(active_id) = header_id_for_column(table, state.column) else {
        debug!("table '{}': no header for column {}", table.id, state.column);
        return;
    };
    let arrow_class = match state.direction {
        SortDirection::Ascending => SORTED_ASC_CLASS,
        SortDirection::Descending => SORTED_DESC_CLASS,
    };
    if let Some(th) = find_element_mut(table, &active_id) {
        th.set_data("dir", state.direction.as_str());
        walk_mut(th, &mut |el| {
            if el.has_class(SORT_ARROW_CLASS) {
                el.add_class(arrow_class);
            }
        });
    }
}

/// Direction currently marked on a header cell, if any.
pub fn marked_direction(th: &Element) -> Option<SortDirection> {
    th.get_data("dir").and_then(|d| SortDirection::parse(d))
}

/// IDs of header cells currently carrying a direction marker.
pub fn marked_headers(table: &Element) -> Vec<String> {
    query_all(table, |el| el.tag == "th" && el.get_data("dir").is_some())
        .into_iter()
        .map(|th| th.id.clone())
        .collect()
}
