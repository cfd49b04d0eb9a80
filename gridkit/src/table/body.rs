use pagedom::Element;

/// The table's body section, if rendered.
pub fn tbody(table: &Element) -> Option<&Element> {
    table.child_nodes().iter().find(|el| el.tag == "tbody")
}

pub fn tbody_mut(table: &mut Element) -> Option<&mut Element> {
    table
        .child_nodes_mut()?
        .iter_mut()
        .find(|el| el.tag == "tbody")
}

/// Data rows in body order. Empty when the body is missing.
pub fn rows(table: &Element) -> Vec<&Element> {
    tbody(table)
        .map(|body| body.child_nodes().iter().filter(|el| el.tag == "tr").collect())
        .unwrap_or_default()
}

/// Trimmed text of the row's cell at `column`, `None` when the row is too short.
pub fn cell_value(row: &Element, column: usize) -> Option<String> {
    row.child_nodes()
        .iter()
        .filter(|el| el.tag == "td" || el.tag == "th")
        .nth(column)
        .map(|cell| cell.text_content().trim().to_string())
}

/// Every row's value for one column, in body order. Short rows are skipped.
pub fn column_values(table: &Element, column: usize) -> Vec<String> {
    rows(table)
        .into_iter()
        .filter_map(|row| cell_value(row, column))
        .collect()
}

/// Cell values of every row not hidden by a filter, in body order.
pub fn visible_rows(table: &Element) -> Vec<Vec<String>> {
    rows(table)
        .into_iter()
        .filter(|row| !row.is_hidden())
        .map(|row| {
            row.child_nodes()
                .iter()
                .filter(|el| el.tag == "td" || el.tag == "th")
                .map(|cell| cell.text_content().trim().to_string())
                .collect()
        })
        .collect()
}
