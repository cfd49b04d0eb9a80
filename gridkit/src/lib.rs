//! Sortable, filterable tables over a [`pagedom`] element tree.
//!
//! Register a [`TableController`] per table on a [`Page`], then feed it
//! events:
//!
//! ```
//! use gridkit::markup::{ColumnSpec, build_table, header_id};
//! use gridkit::{Page, SortType, TableController, table};
//! use pagedom::{Element, Event};
//!
//! let columns = vec![ColumnSpec::new("Cost").sort(SortType::Numeric)];
//! let rows = vec![vec!["$10".to_string()], vec!["$2".to_string()]];
//! let mut page = Page::new(Element::div().child(build_table("costs", &columns, &rows)));
//! page.register(TableController::new("costs"));
//!
//! page.dispatch(&Event::click(header_id("costs", 0)));
//! let table = pagedom::find_element(page.root(), "costs").unwrap();
//! assert_eq!(table::visible_rows(table)[0], vec!["$2"]);
//! ```

pub mod controller;
pub mod error;
pub mod events;
pub mod filter;
pub mod link;
pub mod markup;
pub mod page;
pub mod sort;
pub mod state;
pub mod table;

pub use controller::{TableController, TableMode};
pub use error::TableError;
pub use events::EventResult;
pub use filter::{FilterMenu, FilterOption};
pub use link::FilterOptions;
pub use page::Page;
pub use sort::{SortDirection, SortState, SortType};
pub use state::TableState;
