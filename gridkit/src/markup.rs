//! Builds table markup in the shape the controller expects.
//!
//! Server-side templates normally render this; the builder exists for hosts
//! that only have data, and for tests.

use pagedom::Element;
use serde::{Deserialize, Serialize};

use crate::sort::SortType;
use crate::table::{FILTER_BUTTON_CLASS, SORT_ARROW_CLASS, SORTABLE_CLASS, TABLE_CLASS};

/// Declaration of one table column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub label: String,
    /// Query-string key for linked mode.
    #[serde(default)]
    pub key: Option<String>,
    /// Makes the column sortable with the given comparison.
    #[serde(default)]
    pub sort: Option<SortType>,
    #[serde(default)]
    pub filterable: bool,
}

impl ColumnSpec {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn sort(mut self, sort_type: SortType) -> Self {
        self.sort = Some(sort_type);
        self
    }

    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }
}

pub fn header_id(table_id: &str, column: usize) -> String {
    format!("{table_id}-th-{column}")
}

pub fn filter_button_id(table_id: &str, column: usize) -> String {
    format!("{table_id}-filter-btn-{column}")
}

pub fn row_id(table_id: &str, row: usize) -> String {
    format!("{table_id}-row-{row}")
}

/// Render `table.table-sortable` with a head row for `columns` and one body row per entry.
pub fn build_table(id: &str, columns: &[ColumnSpec], rows: &[Vec<String>]) -> Element {
    let head_row = Element::tr().children(columns.iter().enumerate().map(|(i, column)| {
        let mut th = Element::th()
            .id(header_id(id, i))
            .data("column-index", i.to_string())
            .child(Element::span().text(column.label.clone()));
        if let Some(key) = &column.key {
            th.set_data("column-key", key.clone());
        }
        if let Some(sort_type) = column.sort {
            th.add_class(SORTABLE_CLASS);
            th.set_data("sort-type", sort_type.as_attr());
            th.push_child(Element::span().class(SORT_ARROW_CLASS));
        }
        if column.filterable {
            th.push_child(
                Element::button("▾")
                    .id(filter_button_id(id, i))
                    .class(FILTER_BUTTON_CLASS),
            );
        }
        th
    }));

    let body = Element::tbody().id(format!("{id}-body")).children(
        rows.iter().enumerate().map(|(r, cells)| {
            Element::tr()
                .id(row_id(id, r))
                .children(cells.iter().map(|cell| Element::td(cell.clone())))
        }),
    );

    Element::table()
        .id(id)
        .class(TABLE_CLASS)
        .child(Element::thead().child(head_row))
        .child(body)
}
