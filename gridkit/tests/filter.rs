use gridkit::filter::{
    BLANK_LABEL, FilterMenu, active_filters, apply_id, clear_id, menu_id, option_id, row_visible,
    search_id, select_all_id,
};
use gridkit::markup::{ColumnSpec, build_table, filter_button_id, header_id};
use gridkit::table::visible_rows;
use gridkit::{EventResult, Page, SortType, TableController};
use pagedom::{Element, Event, find_element};

fn sample_page() -> Page {
    let columns = vec![
        ColumnSpec::new("Name").sort(SortType::Text),
        ColumnSpec::new("Impact").sort(SortType::Text).filterable(),
        ColumnSpec::new("Region").filterable(),
    ];
    let data = [
        ["vm-1", "High", "west"],
        ["vm-2", "Low", "east"],
        ["vm-3", "Medium", "west"],
        ["vm-4", "High", "east"],
        ["vm-5", "Low", "west"],
    ];
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect();
    let mut page = Page::new(Element::div().child(build_table("t", &columns, &rows)));
    page.register(TableController::new("t"));
    page
}

fn names(page: &Page) -> Vec<String> {
    let table = find_element(page.root(), "t").unwrap();
    visible_rows(table).into_iter().map(|r| r[0].clone()).collect()
}

fn open(page: &mut Page, column: usize) -> EventResult {
    page.dispatch(&Event::click(filter_button_id("t", column)))
}

fn menu(page: &Page, column: usize) -> &FilterMenu {
    page.controller("t").unwrap().state().menu(column).unwrap()
}

fn menu_hidden(page: &Page, column: usize) -> bool {
    find_element(page.root(), &menu_id("t", column))
        .unwrap()
        .is_hidden()
}

/// Uncheck the option holding `value` through its checkbox.
fn uncheck(page: &mut Page, column: usize, value: &str) {
    let index = menu(page, column).option_index(value).unwrap();
    page.dispatch(&Event::change(option_id("t", column, index), false));
}

// ============================================================================
// Menu construction
// ============================================================================

#[test]
fn test_menu_is_built_lazily_from_distinct_values() {
    let mut page = sample_page();
    assert!(find_element(page.root(), &menu_id("t", 1)).is_none());

    assert_eq!(open(&mut page, 1), EventResult::Consumed);

    let menu = menu(&page, 1);
    let values: Vec<&str> = menu.options.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(values, vec!["High", "Low", "Medium"]);
    assert!(menu.options.iter().all(|o| o.checked));
    assert!(menu.open);
    assert!(!menu_hidden(&page, 1));

    let select_all = find_element(page.root(), &select_all_id("t", 1)).unwrap();
    assert!(select_all.checked);
}

#[test]
fn test_menu_keeps_header_label() {
    let mut page = sample_page();
    open(&mut page, 1);

    let th = find_element(page.root(), &header_id("t", 1)).unwrap();
    assert!(th.has_class("filter-menu-container"));
    assert!(th.child_nodes()[0].text_content().contains("Impact"));
}

#[test]
fn test_blank_values_get_a_label() {
    let menu = FilterMenu::from_values(0, ["", "x", ""]);
    assert_eq!(menu.options.len(), 2);
    assert_eq!(menu.options[0].label(), BLANK_LABEL);
}

#[test]
fn test_second_click_closes_menu() {
    let mut page = sample_page();
    open(&mut page, 1);
    open(&mut page, 1);

    assert!(menu_hidden(&page, 1));
    assert_eq!(page.controller("t").unwrap().state().open_menu(), None);
}

#[test]
fn test_opening_second_menu_hides_first() {
    let mut page = sample_page();
    open(&mut page, 1);
    open(&mut page, 2);

    assert!(menu_hidden(&page, 1));
    assert!(!menu_hidden(&page, 2));
    assert_eq!(page.controller("t").unwrap().state().open_menu(), Some(2));
}

#[test]
fn test_menu_options_are_not_live_updated() {
    let mut page = sample_page();
    open(&mut page, 2);
    uncheck(&mut page, 2, "east");
    page.dispatch(&Event::click(apply_id("t", 2)));

    // Impact menu is created after rows were hidden: it still sees every row.
    open(&mut page, 1);
    let values: Vec<&str> = menu(&page, 1)
        .options
        .iter()
        .map(|o| o.value.as_str())
        .collect();
    assert_eq!(values, vec!["High", "Low", "Medium"]);
}

// ============================================================================
// Applying
// ============================================================================

#[test]
fn test_subset_hides_exactly_rows_outside_it() {
    let mut page = sample_page();
    open(&mut page, 1);
    uncheck(&mut page, 1, "Low");

    assert_eq!(
        page.dispatch(&Event::click(apply_id("t", 1))),
        EventResult::Consumed
    );
    assert_eq!(names(&page), vec!["vm-1", "vm-3", "vm-4"]);
}

#[test]
fn test_select_all_equals_no_filter() {
    let mut page = sample_page();
    open(&mut page, 1);
    uncheck(&mut page, 1, "High");
    let select_all = find_element(page.root(), &select_all_id("t", 1)).unwrap();
    assert!(!select_all.checked);

    page.dispatch(&Event::change(select_all_id("t", 1), true));
    assert!(menu(&page, 1).all_checked());

    page.dispatch(&Event::click(apply_id("t", 1)));
    assert_eq!(names(&page).len(), 5);
    assert!(active_filters(page.controller("t").unwrap().state().menus.values()).is_empty());
}

#[test]
fn test_nothing_checked_hides_everything() {
    let mut page = sample_page();
    open(&mut page, 1);
    page.dispatch(&Event::change(select_all_id("t", 1), false));
    page.dispatch(&Event::click(apply_id("t", 1)));

    assert!(names(&page).is_empty());
}

#[test]
fn test_filters_combine_with_and() {
    let mut page = sample_page();
    open(&mut page, 1);
    uncheck(&mut page, 1, "Medium");
    open(&mut page, 2);
    uncheck(&mut page, 2, "east");
    page.dispatch(&Event::click(apply_id("t", 2)));

    assert_eq!(names(&page), vec!["vm-1", "vm-5"]);
}

#[test]
fn test_apply_closes_all_menus() {
    let mut page = sample_page();
    open(&mut page, 1);
    page.dispatch(&Event::click(apply_id("t", 1)));

    assert!(menu_hidden(&page, 1));
    assert_eq!(page.controller("t").unwrap().state().open_menu(), None);
}

#[test]
fn test_clear_resets_column() {
    let mut page = sample_page();
    open(&mut page, 1);
    uncheck(&mut page, 1, "Low");
    page.dispatch(&Event::click(apply_id("t", 1)));
    assert_eq!(names(&page).len(), 3);

    open(&mut page, 1);
    page.dispatch(&Event::click(clear_id("t", 1)));
    assert_eq!(names(&page).len(), 5);
    assert!(menu(&page, 1).all_checked());
}

// ============================================================================
// Search
// ============================================================================

#[test]
fn test_search_only_changes_option_visibility() {
    let mut page = sample_page();
    open(&mut page, 1);
    uncheck(&mut page, 1, "Low");
    let before = menu(&page, 1).checked_values();

    page.dispatch(&Event::key_up(search_id("t", 1), "hi"));

    let menu = menu(&page, 1);
    let visible: Vec<&str> = menu
        .options
        .iter()
        .filter(|o| o.visible)
        .map(|o| o.value.as_str())
        .collect();
    assert_eq!(visible, vec!["High"]);
    assert_eq!(menu.checked_values(), before);
    assert_eq!(names(&page).len(), 5);

    let low_label = find_element(page.root(), &format!("{}-label-1", menu_id("t", 1))).unwrap();
    assert!(low_label.is_hidden());
}

#[test]
fn test_search_does_not_close_menu() {
    let mut page = sample_page();
    open(&mut page, 1);
    page.dispatch(&Event::click(search_id("t", 1)));
    page.dispatch(&Event::key_up(search_id("t", 1), "m"));

    assert!(!menu_hidden(&page, 1));
}

// ============================================================================
// Pure helpers
// ============================================================================

#[test]
fn test_row_visible_requires_every_filtered_cell() {
    let mut a = FilterMenu::from_values(0, ["x", "y"]);
    a.set_checked("y", false);
    let b = FilterMenu::from_values(1, ["p", "q"]);
    let filters = active_filters([&a, &b]);
    assert_eq!(filters.len(), 1);

    let row = ["x".to_string(), "q".to_string()];
    assert!(row_visible(&filters, |c| row.get(c).cloned()));

    let row = ["y".to_string(), "q".to_string()];
    assert!(!row_visible(&filters, |c| row.get(c).cloned()));

    // Missing cell fails an active filter.
    assert!(!row_visible(&filters, |_| None));
}
