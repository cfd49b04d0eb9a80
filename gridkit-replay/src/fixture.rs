//! Fixture and script files.

use std::fs;
use std::path::Path;

use gridkit::markup::{ColumnSpec, build_table};
use gridkit::{FilterOptions, Page, TableController, TableMode};
use log::info;
use pagedom::Element;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::ReplayError;

/// Element ID of the page-size selector added for linked fixtures.
pub const LIMIT_SELECTOR_ID: &str = "page-size";

/// One table and the data it renders.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Fixture {
    pub id: String,
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
    /// Option lists per column key, for linked tables.
    #[serde(default)]
    pub filter_options: FilterOptions,
    /// URL of the current page. Makes the table linked.
    #[serde(default)]
    pub base_url: Option<String>,
}

/// One scripted interaction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Click a column header.
    Sort { column: usize },
    /// Click a column's filter button.
    OpenFilter { column: usize },
    /// Flip one option checkbox.
    Toggle { column: usize, value: String },
    SelectAll { column: usize, checked: bool },
    /// Type into a menu's search box.
    Search { column: usize, text: String },
    Apply { column: usize },
    Clear { column: usize },
    /// Choose a page size.
    Limit { value: String },
    /// Click an arbitrary element by ID.
    Click { target: String },
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ReplayError> {
    let text = fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ReplayError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a list of steps.
pub fn load_script(path: &Path) -> Result<Vec<Step>, ReplayError> {
    read_json(path)
}

impl Fixture {
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        read_json(path)
    }

    /// Column labels in display order.
    pub fn labels(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.label.clone()).collect()
    }

    /// Render the table into a fresh page and register its controller.
    pub fn build_page(&self) -> Result<Page, ReplayError> {
        let table = build_table(&self.id, &self.columns, &self.rows);

        let Some(base) = &self.base_url else {
            let mut page = Page::new(Element::div().id("page").child(table));
            page.register(TableController::new(self.id.as_str()));
            info!("built in-place table '{}' ({} rows)", self.id, self.rows.len());
            return Ok(page);
        };

        let controller =
            TableController::parse_linked(self.id.as_str(), base, self.filter_options.clone())?;
        let root = Element::div()
            .id("page")
            .child(table)
            .child(Element::select("").id(LIMIT_SELECTOR_ID));
        let mut page = Page::new(root);
        if let TableMode::Linked { base, .. } = controller.mode() {
            page.set_limit_selector(LIMIT_SELECTOR_ID, base.clone());
        }
        page.register(controller);
        info!("built linked table '{}' at {}", self.id, base);
        Ok(page)
    }
}
