//! Page-level event dispatch.
//!
//! A [`Page`] owns the element tree and the controllers registered for the
//! tables in it. Hosts feed every DOM event to [`Page::dispatch`]; the page
//! finds the table the target belongs to and hands the event to its
//! controller.

use log::{debug, warn};
use pagedom::{Element, Event, ancestry, query_all};
use url::Url;

use crate::controller::TableController;
use crate::events::EventResult;
use crate::filter::FILTER_MENU_CLASS;
use crate::link::limit_link;
use crate::table::{FILTER_BUTTON_CLASS, TABLE_CLASS};

/// The items-per-page `<select>` and the URL it navigates from.
#[derive(Debug, Clone)]
struct LimitSelector {
    id: String,
    base: Url,
}

/// A rendered page with its registered table controllers.
#[derive(Debug)]
pub struct Page {
    root: Element,
    tables: Vec<TableController>,
    limit_selector: Option<LimitSelector>,
}

impl Page {
    pub fn new(root: Element) -> Self {
        Self {
            root,
            tables: Vec::new(),
            limit_selector: None,
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Register a controller, replacing any previous one for the same table.
    pub fn register(&mut self, controller: TableController) {
        debug!("registering controller for table '{}'", controller.id());
        self.tables.retain(|t| t.id() != controller.id());
        self.tables.push(controller);
    }

    /// Register an in-place controller for every `table-sortable` not yet registered.
    ///
    /// Returns the number of controllers added.
    pub fn register_tables(&mut self) -> usize {
        let ids: Vec<String> = query_all(&self.root, |el| el.has_class(TABLE_CLASS))
            .into_iter()
            .map(|el| el.id.clone())
            .filter(|id| self.controller(id).is_none())
            .collect();
        let added = ids.len();
        for id in ids {
            self.register(TableController::new(id));
        }
        added
    }

    pub fn controller(&self, table_id: &str) -> Option<&TableController> {
        self.tables.iter().find(|t| t.id() == table_id)
    }

    pub fn controllers(&self) -> &[TableController] {
        &self.tables
    }

    /// Wire the items-per-page selector with element ID `id`.
    pub fn set_limit_selector(&mut self, id: impl Into<String>, base: Url) {
        self.limit_selector = Some(LimitSelector {
            id: id.into(),
            base,
        });
    }

    /// Handle one event to completion.
    ///
    /// A click anywhere outside a filter menu closes open menus first; a click
    /// on a filter button leaves its own table's menus for the controller to
    /// toggle.
    pub fn dispatch(&mut self, event: &Event) -> EventResult {
        if let Event::Select { target, value } = event
            && let Some(selector) = &self.limit_selector
            && selector.id == *target
        {
            return match value.trim().parse::<u32>() {
                Ok(limit) if limit > 0 => EventResult::Navigate(limit_link(&selector.base, limit)),
                _ => {
                    warn!("ignoring invalid page size '{}'", value);
                    EventResult::Ignored
                }
            };
        }

        let (owner, in_menu, on_button) = {
            let Some(path) = ancestry(&self.root, event.target()) else {
                debug!("event target '{}' not in page", event.target());
                return EventResult::Ignored;
            };
            let owner = path
                .iter()
                .rev()
                .find_map(|el| self.tables.iter().position(|t| t.id() == el.id));
            let in_menu = path.iter().any(|el| el.has_class(FILTER_MENU_CLASS));
            let on_button = path.iter().any(|el| el.has_class(FILTER_BUTTON_CLASS));
            (owner, in_menu, on_button)
        };

        if matches!(event, Event::Click { .. }) && !in_menu {
            for (i, table) in self.tables.iter_mut().enumerate() {
                if on_button && owner == Some(i) {
                    continue;
                }
                table.close_menus(&mut self.root);
            }
        }

        match owner {
            Some(i) => self.tables[i].handle(&mut self.root, event),
            None => EventResult::Ignored,
        }
    }
}
