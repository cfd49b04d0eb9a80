//! Read access to a rendered table: header cells and body rows.

mod body;
mod column;

pub use body::{cell_value, column_values, rows, tbody, tbody_mut, visible_rows};
pub use column::{Column, header_cells, header_id_for_column, read_column, read_columns};

/// Class carried by every interactive table.
pub const TABLE_CLASS: &str = "table-sortable";
/// Class on header cells that sort when clicked.
pub const SORTABLE_CLASS: &str = "sortable";
/// Class on the button that toggles a column's filter menu.
pub const FILTER_BUTTON_CLASS: &str = "filter-btn";
/// Class on the direction indicator inside a header cell.
pub const SORT_ARROW_CLASS: &str = "sort-arrow";
