//! Per-column filter menus.
//!
//! A [`FilterMenu`] is created lazily the first time a column's filter button
//! is pressed, from the distinct values present in that column at that moment.
//! Applying filters is split into pure steps: [`active_filters`] turns the
//! menus into allowed-value sets and [`row_visible`] decides a single row.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use pagedom::Element;

/// Label shown for an empty cell value.
pub const BLANK_LABEL: &str = "(Blank)";

/// Class of the menu container rendered into a header cell.
pub const FILTER_MENU_CLASS: &str = "filter-menu";
/// Class of a per-value checkbox.
pub const FILTER_OPTION_CLASS: &str = "filter-option";
/// Class of the "select all" checkbox.
pub const SELECT_ALL_CLASS: &str = "select-all";
/// Class of the search input.
pub const FILTER_SEARCH_CLASS: &str = "filter-search";
/// Class of the apply button.
pub const APPLY_FILTER_CLASS: &str = "apply-filter";
/// Class of the clear button.
pub const CLEAR_FILTER_CLASS: &str = "clear-filter";

/// One checkbox in a filter menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub checked: bool,
    /// Whether the option matches the current search text.
    pub visible: bool,
}

impl FilterOption {
    pub fn label(&self) -> &str {
        if self.value.is_empty() {
            BLANK_LABEL
        } else {
            &self.value
        }
    }
}

/// Filter state for one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterMenu {
    pub column: usize,
    pub options: Vec<FilterOption>,
    pub search: String,
    pub open: bool,
}

impl FilterMenu {
    /// Build a menu over the distinct `values`, all checked, naturally ordered.
    pub fn from_values<I, S>(column: usize, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_checked(column, values, |_| true)
    }

    /// Build a menu over the distinct `values`, checking those `checked` accepts.
    pub fn with_checked<I, S>(column: usize, values: I, checked: impl Fn(&str) -> bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut distinct: Vec<String> = values
            .into_iter()
            .map(Into::into)
            .filter(|v| seen.insert(v.clone()))
            .collect();
        distinct.sort_by(|a, b| natural_cmp(a, b));

        let options = distinct
            .into_iter()
            .map(|value| FilterOption {
                checked: checked(&value),
                value,
                visible: true,
            })
            .collect();

        Self {
            column,
            options,
            search: String::new(),
            open: false,
        }
    }

    /// Check or uncheck one value. Returns false if the value is not offered.
    pub fn set_checked(&mut self, value: &str, checked: bool) -> bool {
        match self.options.iter_mut().find(|o| o.value == value) {
            Some(option) => {
                option.checked = checked;
                true
            }
            None => false,
        }
    }

    /// Position of `value` among the options.
    pub fn option_index(&self, value: &str) -> Option<usize> {
        self.options.iter().position(|o| o.value == value)
    }

    /// "Select all": set every option, including ones hidden by search.
    pub fn set_all(&mut self, checked: bool) {
        for option in &mut self.options {
            option.checked = checked;
        }
    }

    /// Whether every option is checked (drives the "select all" box).
    pub fn all_checked(&self) -> bool {
        self.options.iter().all(|o| o.checked)
    }

    /// Narrow visible options to labels containing `query`, ignoring case.
    ///
    /// Checked state is untouched.
    pub fn search(&mut self, query: &str) {
        let needle = query.to_lowercase();
        for option in &mut self.options {
            option.visible = option.label().to_lowercase().contains(&needle);
        }
        self.search = query.to_string();
    }

    pub fn checked_values(&self) -> HashSet<String> {
        self.options
            .iter()
            .filter(|o| o.checked)
            .map(|o| o.value.clone())
            .collect()
    }

    /// Checked values in menu order.
    pub fn checked_in_order(&self) -> Vec<&str> {
        self.options
            .iter()
            .filter(|o| o.checked)
            .map(|o| o.value.as_str())
            .collect()
    }

    /// A column filters only when the checked set is a strict subset of its options.
    pub fn is_filtering(&self) -> bool {
        !self.all_checked()
    }

    /// Render the menu as a `div.filter-menu` for the header of `table_id`.
    pub fn to_element(&self, table_id: &str) -> Element {
        let id = menu_id(table_id, self.column);

        let mut list = Element::div().class("filter-options").child(
            Element::label().child(
                Element::checkbox(self.all_checked())
                    .id(select_all_id(table_id, self.column))
                    .class(SELECT_ALL_CLASS),
            ),
        );
        for (i, option) in self.options.iter().enumerate() {
            let mut label = Element::label()
                .id(format!("{id}-label-{i}"))
                .child(
                    Element::checkbox(option.checked)
                        .id(option_id(table_id, self.column, i))
                        .class(FILTER_OPTION_CLASS)
                        .data("value", option.value.clone()),
                )
                .child(Element::span().text(option.label()));
            label.set_hidden(!option.visible);
            list.push_child(label);
        }

        let mut menu = Element::div()
            .id(id.clone())
            .class(FILTER_MENU_CLASS)
            .data("column-index", self.column.to_string())
            .child(
                Element::text_input(self.search.clone())
                    .id(search_id(table_id, self.column))
                    .class(FILTER_SEARCH_CLASS),
            )
            .child(list)
            .child(
                Element::div()
                    .class("filter-actions")
                    .child(
                        Element::button("Clear")
                            .id(clear_id(table_id, self.column))
                            .class(CLEAR_FILTER_CLASS),
                    )
                    .child(
                        Element::button("Apply")
                            .id(apply_id(table_id, self.column))
                            .class(APPLY_FILTER_CLASS),
                    ),
            );
        menu.set_hidden(!self.open);
        menu
    }
}

/// Element ID of the filter menu for a table column.
pub fn menu_id(table_id: &str, column: usize) -> String {
    format!("{table_id}-filter-menu-{column}")
}

/// Element ID of the `index`-th option checkbox of a menu.
pub fn option_id(table_id: &str, column: usize, index: usize) -> String {
    format!("{}-opt-{index}", menu_id(table_id, column))
}

pub fn select_all_id(table_id: &str, column: usize) -> String {
    format!("{}-all", menu_id(table_id, column))
}

pub fn search_id(table_id: &str, column: usize) -> String {
    format!("{}-search", menu_id(table_id, column))
}

pub fn apply_id(table_id: &str, column: usize) -> String {
    format!("{}-apply", menu_id(table_id, column))
}

pub fn clear_id(table_id: &str, column: usize) -> String {
    format!("{}-clear", menu_id(table_id, column))
}

/// Allowed-value sets for every column whose menu actually filters.
pub fn active_filters<'a>(
    menus: impl IntoIterator<Item = &'a FilterMenu>,
) -> BTreeMap<usize, HashSet<String>> {
    menus
        .into_iter()
        .filter(|menu| menu.is_filtering())
        .map(|menu| (menu.column, menu.checked_values()))
        .collect()
}

/// A row is visible when its value in every filtered column is allowed.
///
/// `value_at` yields the row's trimmed cell text, `None` if the row has no
/// such cell.
pub fn row_visible(
    filters: &BTreeMap<usize, HashSet<String>>,
    value_at: impl Fn(usize) -> Option<String>,
) -> bool {
    filters
        .iter()
        .all(|(column, allowed)| value_at(*column).is_some_and(|v| allowed.contains(&v)))
}

/// Numeric-aware ordering: digit runs compare by value, the rest ignoring case.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a_chunks = chunks(a);
    let mut b_chunks = chunks(b);
    loop {
        match (a_chunks.next(), b_chunks.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (is_digits(x), is_digits(y)) {
                    (true, true) => cmp_digits(x, y),
                    _ => x.to_lowercase().cmp(&y.to_lowercase()),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

/// Split into alternating runs of ASCII digits and non-digits.
fn chunks(s: &str) -> impl Iterator<Item = &str> {
    let mut rest = s;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let digit = first.is_ascii_digit();
        let end = rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != digit)
            .map_or(rest.len(), |(i, _)| i);
        let (chunk, tail) = rest.split_at(end);
        rest = tail;
        Some(chunk)
    })
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
