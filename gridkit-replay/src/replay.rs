//! Drive a page through a script of steps.

use gridkit::filter::{apply_id, clear_id, option_id, search_id, select_all_id};
use gridkit::markup::{filter_button_id, header_id};
use gridkit::table::{rows, visible_rows};
use gridkit::{EventResult, FilterMenu, Page};
use log::{debug, info};
use pagedom::{Event, find_element};
use url::Url;

use crate::error::ReplayError;
use crate::fixture::{Fixture, LIMIT_SELECTOR_ID, Step};
use crate::render::render_table;

/// What the page looks like after the last step.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub labels: Vec<String>,
    /// Visible body rows, in display order.
    pub rows: Vec<Vec<String>>,
    /// Body rows including hidden ones.
    pub total: usize,
    /// Every navigation a step asked for, in order.
    pub navigations: Vec<Url>,
}

impl Report {
    pub fn render(&self, column_width: usize) -> String {
        let mut out = render_table(&self.labels, &self.rows, column_width);
        out.push_str(&format!("({} of {} rows)\n", self.rows.len(), self.total));
        for url in &self.navigations {
            out.push_str(&format!("navigate: {url}\n"));
        }
        out
    }
}

fn step_error(index: usize, message: impl Into<String>) -> ReplayError {
    ReplayError::Step {
        index,
        message: message.into(),
    }
}

/// The menu a step refers to. Steps may only touch menus that were opened.
fn opened_menu<'a>(
    page: &'a Page,
    table_id: &str,
    index: usize,
    column: usize,
) -> Result<&'a FilterMenu, ReplayError> {
    page.controller(table_id)
        .and_then(|c| c.state().menu(column))
        .ok_or_else(|| step_error(index, format!("column {column} has no filter menu yet")))
}

/// Translate a step into the DOM event a user would produce.
pub fn step_event(page: &Page, table_id: &str, index: usize, step: &Step) -> Result<Event, ReplayError> {
    let event = match step {
        Step::Sort { column } => Event::click(header_id(table_id, *column)),
        Step::OpenFilter { column } => Event::click(filter_button_id(table_id, *column)),
        Step::Toggle { column, value } => {
            let menu = opened_menu(page, table_id, index, *column)?;
            let option = menu
                .option_index(value)
                .ok_or_else(|| step_error(index, format!("column {column} has no option '{value}'")))?;
            Event::change(option_id(table_id, *column, option), !menu.options[option].checked)
        }
        Step::SelectAll { column, checked } => {
            opened_menu(page, table_id, index, *column)?;
            Event::change(select_all_id(table_id, *column), *checked)
        }
        Step::Search { column, text } => {
            opened_menu(page, table_id, index, *column)?;
            Event::key_up(search_id(table_id, *column), text.clone())
        }
        Step::Apply { column } => {
            opened_menu(page, table_id, index, *column)?;
            Event::click(apply_id(table_id, *column))
        }
        Step::Clear { column } => {
            opened_menu(page, table_id, index, *column)?;
            Event::click(clear_id(table_id, *column))
        }
        Step::Limit { value } => Event::select(LIMIT_SELECTOR_ID, value.clone()),
        Step::Click { target } => Event::click(target.clone()),
    };
    Ok(event)
}

/// Build the fixture's page, replay `steps` and report the final state.
pub fn run(fixture: &Fixture, steps: &[Step]) -> Result<Report, ReplayError> {
    let mut page = fixture.build_page()?;
    let mut navigations = Vec::new();

    for (index, step) in steps.iter().enumerate() {
        let event = step_event(&page, &fixture.id, index, step)?;
        match page.dispatch(&event) {
            EventResult::Navigate(url) => {
                info!("step {index}: navigate to {url}");
                navigations.push(url);
            }
            EventResult::Consumed => debug!("step {index}: {step:?} handled"),
            EventResult::Ignored => info!("step {index}: {step:?} had no effect"),
        }
    }

    let (visible, total) = match find_element(page.root(), &fixture.id) {
        Some(table) => (visible_rows(table), rows(table).len()),
        None => (Vec::new(), 0),
    };
    Ok(Report {
        labels: fixture.labels(),
        rows: visible,
        total,
        navigations,
    })
}
