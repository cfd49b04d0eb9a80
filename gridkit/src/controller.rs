//! Table interaction controller.
//!
//! One [`TableController`] owns the [`TableState`] of one table and turns page
//! events aimed inside that table into sorting, filter-menu and filter
//! operations. Every operation takes the page root and looks the table up by
//! ID, so a table that is not (or no longer) in the tree makes the operation a
//! no-op.

use std::collections::{BTreeMap, HashSet};

use log::{debug, trace, warn};
use pagedom::{Element, Event, ancestry, find_element, find_element_mut};
use url::Url;

use crate::error::TableError;
use crate::events::EventResult;
use crate::filter::{
    APPLY_FILTER_CLASS, CLEAR_FILTER_CLASS, FILTER_MENU_CLASS, FILTER_OPTION_CLASS,
    FILTER_SEARCH_CLASS, FilterMenu, SELECT_ALL_CLASS, active_filters, row_visible,
};
use crate::link::{FilterOptions, active_values, filter_link, sort_link};
use crate::sort::{next_sort, sort_table};
use crate::state::TableState;
use crate::table::{
    Column, FILTER_BUTTON_CLASS, SORTABLE_CLASS, cell_value, column_values,
    header_id_for_column, read_columns, tbody_mut,
};

/// Class added to a header cell once it holds a filter menu.
pub const MENU_CONTAINER_CLASS: &str = "filter-menu-container";

/// How a table reacts to sorting and filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableMode {
    /// Reorder and hide rows in the page itself.
    InPlace,
    /// Produce navigation links for the server to render the next page.
    Linked {
        /// URL of the current page.
        base: Url,
        /// Option lists for each filterable column key.
        options: FilterOptions,
    },
}

/// What an event target means to a table.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    SortHeader(usize),
    FilterButton(usize),
    Option { column: usize, value: String },
    SelectAll(usize),
    Search(usize),
    Apply,
    Clear(usize),
    InsideMenu,
    Elsewhere,
}

fn column_index(el: &Element) -> Option<usize> {
    el.get_data("column-index")?.trim().parse().ok()
}

/// Interpret a path that starts at the table element and ends at the target.
fn classify(path: &[&Element]) -> Target {
    let Some(target) = path.last() else {
        return Target::Elsewhere;
    };

    if let Some(menu) = path.iter().rev().find(|el| el.has_class(FILTER_MENU_CLASS)) {
        let Some(column) = column_index(menu) else {
            return Target::InsideMenu;
        };
        return if target.has_class(FILTER_OPTION_CLASS) {
            match target.get_data("value") {
                Some(value) => Target::Option {
                    column,
                    value: value.clone(),
                },
                None => Target::InsideMenu,
            }
        } else if target.has_class(SELECT_ALL_CLASS) {
            Target::SelectAll(column)
        } else if target.has_class(FILTER_SEARCH_CLASS) {
            Target::Search(column)
        } else if target.has_class(APPLY_FILTER_CLASS) {
            Target::Apply
        } else if target.has_class(CLEAR_FILTER_CLASS) {
            Target::Clear(column)
        } else {
            Target::InsideMenu
        };
    }

    let Some(header) = path.iter().rev().find(|el| el.tag == "th") else {
        return Target::Elsewhere;
    };
    let Some(column) = column_index(header) else {
        return Target::Elsewhere;
    };
    if path.iter().any(|el| el.has_class(FILTER_BUTTON_CLASS)) {
        Target::FilterButton(column)
    } else if header.has_class(SORTABLE_CLASS) {
        Target::SortHeader(column)
    } else {
        Target::Elsewhere
    }
}

/// Controller for a single interactive table.
#[derive(Debug, Clone)]
pub struct TableController {
    table_id: String,
    mode: TableMode,
    state: TableState,
}

impl TableController {
    /// Controller that sorts and filters the rendered rows in place.
    pub fn new(table_id: impl Into<String>) -> Self {
        Self {
            table_id: table_id.into(),
            mode: TableMode::InPlace,
            state: TableState::new(),
        }
    }

    /// Controller that answers sorting and filtering with navigation links.
    pub fn linked(table_id: impl Into<String>, base: Url, options: FilterOptions) -> Self {
        Self {
            table_id: table_id.into(),
            mode: TableMode::Linked { base, options },
            state: TableState::new(),
        }
    }

    /// Like [`TableController::linked`], parsing the page URL.
    pub fn parse_linked(
        table_id: impl Into<String>,
        base: &str,
        options: FilterOptions,
    ) -> Result<Self, TableError> {
        Ok(Self::linked(table_id, Url::parse(base)?, options))
    }

    pub fn id(&self) -> &str {
        &self.table_id
    }

    pub fn mode(&self) -> &TableMode {
        &self.mode
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// Interactive columns of the table, empty when the table is absent.
    pub fn columns(&self, root: &Element) -> Vec<Column> {
        find_element(root, &self.table_id)
            .map(read_columns)
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Event routing
    // -------------------------------------------------------------------------

    /// Route a page event to the operation its target stands for.
    pub fn handle(&mut self, root: &mut Element, event: &Event) -> EventResult {
        let target = {
            let Some(path) = ancestry(root, event.target()) else {
                return EventResult::Ignored;
            };
            let Some(start) = path.iter().position(|el| el.id == self.table_id) else {
                return EventResult::Ignored;
            };
            classify(&path[start..])
        };
        trace!("table '{}': {:?} on {:?}", self.table_id, event, target);

        match (event, target) {
            (Event::Click { .. }, Target::SortHeader(column)) => self.sort(root, column),
            (Event::Click { .. }, Target::FilterButton(column)) => {
                self.toggle_filter_menu(root, column)
            }
            (Event::Change { checked, .. }, Target::Option { column, value }) => {
                self.set_option(root, column, &value, *checked)
            }
            (Event::Change { checked, .. }, Target::SelectAll(column)) => {
                self.set_select_all(root, column, *checked)
            }
            (Event::KeyUp { value, .. }, Target::Search(column)) => {
                self.search(root, column, value)
            }
            (Event::Click { .. }, Target::Apply) => self.apply_filters(root),
            (Event::Click { .. }, Target::Clear(column)) => self.clear_filter(root, column),
            // Clicks inside a menu never reach the header underneath.
            (
                Event::Click { .. },
                Target::InsideMenu
                | Target::Option { .. }
                | Target::SelectAll(_)
                | Target::Search(_),
            ) => EventResult::Consumed,
            _ => EventResult::Ignored,
        }
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Sort by `column`, toggling direction when it is already the active column.
    pub fn sort(&mut self, root: &mut Element, column: usize) -> EventResult {
        let Some(table) = find_element_mut(root, &self.table_id) else {
            debug!("table '{}' not found, sort ignored", self.table_id);
            return EventResult::Ignored;
        };
        let Some(col) = read_columns(table)
            .into_iter()
            .find(|c| c.index == column && c.sortable)
        else {
            debug!("table '{}': column {} is not sortable", self.table_id, column);
            return EventResult::Ignored;
        };

        match &self.mode {
            TableMode::InPlace => {
                let next = next_sort(self.state.sort, column);
                sort_table(table, next, col.sort_type);
                self.state.sort = Some(next);
                EventResult::Consumed
            }
            TableMode::Linked { base, .. } => match col.key {
                Some(key) => EventResult::Navigate(sort_link(base, &key)),
                None => {
                    warn!(
                        "table '{}': {}",
                        self.table_id,
                        TableError::MissingColumnKey { index: column }
                    );
                    EventResult::Ignored
                }
            },
        }
    }

    // -------------------------------------------------------------------------
    // Filter menus
    // -------------------------------------------------------------------------

    /// Open or close the filter menu of `column`, creating it on first use.
    ///
    /// Opening a menu closes the table's other menus.
    pub fn toggle_filter_menu(&mut self, root: &mut Element, column: usize) -> EventResult {
        let Some(table) = find_element(root, &self.table_id) else {
            debug!("table '{}' not found, filter menu ignored", self.table_id);
            return EventResult::Ignored;
        };
        let Some(col) = read_columns(table)
            .into_iter()
            .find(|c| c.index == column && c.filterable)
        else {
            debug!("table '{}': column {} is not filterable", self.table_id, column);
            return EventResult::Ignored;
        };

        if !self.state.menus.contains_key(&column) {
            let menu = match &self.mode {
                TableMode::InPlace => FilterMenu::from_values(column, column_values(table, column)),
                TableMode::Linked { base, options } => {
                    let Some(key) = col.key else {
                        warn!(
                            "table '{}': {}",
                            self.table_id,
                            TableError::MissingColumnKey { index: column }
                        );
                        return EventResult::Ignored;
                    };
                    let active = active_values(base, &key);
                    let values = options.get(&key).cloned().unwrap_or_default();
                    FilterMenu::with_checked(column, values, |v| active.contains(v))
                }
            };
            debug!(
                "table '{}': created filter menu for column {} ({} options)",
                self.table_id,
                column,
                menu.options.len()
            );
            self.state.menus.insert(column, menu);
        }

        for menu in self.state.menus.values_mut() {
            if menu.column == column {
                menu.open = !menu.open;
            } else {
                menu.open = false;
            }
        }

        self.sync_menus(root);
        EventResult::Consumed
    }

    /// Check or uncheck one value of a column's menu.
    pub fn set_option(
        &mut self,
        root: &mut Element,
        column: usize,
        value: &str,
        checked: bool,
    ) -> EventResult {
        let Some(menu) = self.state.menus.get_mut(&column) else {
            return EventResult::Ignored;
        };
        if !menu.set_checked(value, checked) {
            debug!("table '{}': no option '{}' in column {}", self.table_id, value, column);
            return EventResult::Ignored;
        }
        self.sync_menus(root);
        EventResult::Consumed
    }

    /// "Select all" toggled: every option follows it.
    pub fn set_select_all(&mut self, root: &mut Element, column: usize, checked: bool) -> EventResult {
        let Some(menu) = self.state.menus.get_mut(&column) else {
            return EventResult::Ignored;
        };
        menu.set_all(checked);
        self.sync_menus(root);
        EventResult::Consumed
    }

    /// Narrow the visible options of a menu. Rows and checked state are untouched.
    pub fn search(&mut self, root: &mut Element, column: usize, query: &str) -> EventResult {
        let Some(menu) = self.state.menus.get_mut(&column) else {
            return EventResult::Ignored;
        };
        menu.search(query);
        self.sync_menus(root);
        EventResult::Consumed
    }

    /// Apply every menu to the rows (or build the filter link), then close all menus.
    pub fn apply_filters(&mut self, root: &mut Element) -> EventResult {
        let Some(table) = find_element_mut(root, &self.table_id) else {
            debug!("table '{}' not found, apply ignored", self.table_id);
            return EventResult::Ignored;
        };

        let result = match &self.mode {
            TableMode::InPlace => {
                let filters = active_filters(self.state.menus.values());
                let (shown, total) = apply_row_filters(table, &filters);
                debug!(
                    "table '{}': {} filtered columns, {}/{} rows visible",
                    self.table_id,
                    filters.len(),
                    shown,
                    total
                );
                EventResult::Consumed
            }
            TableMode::Linked { base, .. } => {
                let columns = read_columns(table);
                let keyed: Vec<(&str, &FilterMenu)> = self
                    .state
                    .menus
                    .values()
                    .filter_map(|menu| {
                        let key = columns
                            .iter()
                            .find(|c| c.index == menu.column)?
                            .key
                            .as_deref()?;
                        Some((key, menu))
                    })
                    .collect();
                EventResult::Navigate(filter_link(base, keyed))
            }
        };

        self.state.close_menus();
        self.sync_menus(root);
        result
    }

    /// Reset one column's menu and re-apply.
    ///
    /// In place this means "no filter" (everything checked); in linked mode the
    /// column's parameter is dropped (nothing checked).
    pub fn clear_filter(&mut self, root: &mut Element, column: usize) -> EventResult {
        let in_place = matches!(self.mode, TableMode::InPlace);
        let Some(menu) = self.state.menus.get_mut(&column) else {
            return EventResult::Ignored;
        };
        menu.set_all(in_place);
        menu.search("");
        self.apply_filters(root)
    }

    /// Close every open menu of this table. Returns whether anything closed.
    pub fn close_menus(&mut self, root: &mut Element) -> bool {
        let closed = self.state.close_menus();
        if closed.is_empty() {
            return false;
        }
        trace!("table '{}': closed menus {:?}", self.table_id, closed);
        self.sync_menus(root);
        true
    }

    /// Re-render every created menu into its header cell.
    fn sync_menus(&self, root: &mut Element) {
        let Some(table) = find_element_mut(root, &self.table_id) else {
            return;
        };
        for menu in self.state.menus.values() {
            render_menu(table, &self.table_id, menu);
        }
    }
}

fn render_menu(table: &mut Element, table_id: &str, menu: &FilterMenu) {
    let Some(header_id) = header_id_for_column(table, menu.column) else {
        return;
    };
    let Some(th) = find_element_mut(table, &header_id) else {
        return;
    };
    th.add_class(MENU_CONTAINER_CLASS);

    let rendered = menu.to_element(table_id);
    let existing = th
        .child_nodes()
        .iter()
        .position(|el| el.has_class(FILTER_MENU_CLASS));
    match existing {
        Some(i) => {
            if let Some(children) = th.child_nodes_mut() {
                children[i] = rendered;
            }
        }
        None => th.push_child(rendered),
    }
}

/// Show or hide each body row. Returns `(visible, total)` row counts.
fn apply_row_filters(
    table: &mut Element,
    filters: &BTreeMap<usize, HashSet<String>>,
) -> (usize, usize) {
    let Some(rows) = tbody_mut(table).and_then(|body| body.child_nodes_mut()) else {
        return (0, 0);
    };

    let mut shown = 0;
    let mut total = 0;
    for row in rows.iter_mut().filter(|el| el.tag == "tr") {
        let visible = row_visible(filters, |column| cell_value(row, column));
        row.set_hidden(!visible);
        total += 1;
        if visible {
            shown += 1;
        }
    }
    (shown, total)
}
