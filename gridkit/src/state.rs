//! Per-table interaction state.

use std::collections::BTreeMap;

use crate::filter::FilterMenu;
use crate::sort::SortState;

/// Everything a table remembers between events.
///
/// Lives only as long as its controller; nothing is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableState {
    /// The single active sort, if any column has been sorted.
    pub sort: Option<SortState>,
    /// Filter menus by column index, created on first open.
    pub menus: BTreeMap<usize, FilterMenu>,
}

impl TableState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Column whose menu is currently open.
    pub fn open_menu(&self) -> Option<usize> {
        self.menus.values().find(|m| m.open).map(|m| m.column)
    }

    pub fn menu(&self, column: usize) -> Option<&FilterMenu> {
        self.menus.get(&column)
    }

    /// Close every menu. Returns the columns that were open.
    pub fn close_menus(&mut self) -> Vec<usize> {
        self.menus
            .values_mut()
            .filter(|m| m.open)
            .map(|m| {
                m.open = false;
                m.column
            })
            .collect()
    }
}
