use gridkit::filter::{FilterMenu, apply_id, clear_id, option_id};
use gridkit::link::{active_values, filter_link, limit_link, query_value, sort_link, with_params};
use gridkit::markup::{ColumnSpec, build_table, filter_button_id, header_id};
use gridkit::{EventResult, FilterOptions, Page, SortType, TableController, TableError};
use pagedom::{Element, Event};
use url::Url;

fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

fn linked_page(base: &str) -> Page {
    let columns = vec![
        ColumnSpec::new("Name").key("name").sort(SortType::Text),
        ColumnSpec::new("Impact")
            .key("impact")
            .sort(SortType::Text)
            .filterable(),
        ColumnSpec::new("Unkeyed").sort(SortType::Text),
    ];
    let rows = vec![vec!["vm-1".to_string(), "High".to_string(), "x".to_string()]];
    let mut options = FilterOptions::new();
    options.insert(
        "impact".to_string(),
        vec!["Low".to_string(), "High".to_string(), "Medium".to_string()],
    );

    let mut page = Page::new(Element::div().child(build_table("recs", &columns, &rows)));
    page.register(TableController::linked("recs", url(base), options));
    page
}

// ============================================================================
// Link builders
// ============================================================================

#[test]
fn test_sort_link_new_column_is_ascending() {
    let next = sort_link(&url("http://host/recs?page=3&impact=High"), "name");
    assert_eq!(query_value(&next, "sort_by").as_deref(), Some("name"));
    assert_eq!(query_value(&next, "sort_order").as_deref(), Some("asc"));
    assert_eq!(query_value(&next, "page").as_deref(), Some("1"));
    assert_eq!(query_value(&next, "impact").as_deref(), Some("High"));
}

#[test]
fn test_sort_link_toggles_current_column() {
    let base = url("http://host/recs?sort_by=name&sort_order=asc");
    let next = sort_link(&base, "name");
    assert_eq!(query_value(&next, "sort_order").as_deref(), Some("desc"));

    let back = sort_link(&next, "name");
    assert_eq!(query_value(&back, "sort_order").as_deref(), Some("asc"));
}

#[test]
fn test_with_params_preserves_order_and_dedupes() {
    let base = url("http://host/p?a=1&b=2&a=3&c=4");
    let next = with_params(&base, &[("a", Some("9".to_string())), ("c", None)]);
    assert_eq!(next.query(), Some("a=9&b=2"));

    let empty = with_params(&url("http://host/p?x=1"), &[("x", None)]);
    assert_eq!(empty.query(), None);
}

#[test]
fn test_filter_link_sets_and_removes_keys() {
    let mut impact = FilterMenu::from_values(1, ["High", "Low"]);
    impact.set_checked("Low", false);
    let mut region = FilterMenu::from_values(2, ["east"]);
    region.set_all(false);

    let base = url("http://host/recs?region=east&page=4");
    let next = filter_link(&base, [("impact", &impact), ("region", &region)]);
    assert_eq!(query_value(&next, "impact").as_deref(), Some("High"));
    assert_eq!(query_value(&next, "region"), None);
    assert_eq!(query_value(&next, "page").as_deref(), Some("1"));
}

#[test]
fn test_limit_link_resets_page() {
    let next = limit_link(&url("http://host/recs?page=7&limit=10"), 50);
    assert_eq!(next.query(), Some("page=1&limit=50"));
}

#[test]
fn test_active_values_split_commas() {
    let values = active_values(&url("http://host/?impact=High,Low,"), "impact");
    assert_eq!(values.len(), 2);
    assert!(values.contains("High") && values.contains("Low"));
    assert!(active_values(&url("http://host/"), "impact").is_empty());
}

// ============================================================================
// Linked controller
// ============================================================================

#[test]
fn test_linked_sort_navigates_instead_of_reordering() {
    let mut page = linked_page("http://host/recs?sort_by=impact&sort_order=asc&page=2");

    let result = page.dispatch(&Event::click(header_id("recs", 1)));
    let next = result.url().unwrap();
    assert_eq!(query_value(next, "sort_by").as_deref(), Some("impact"));
    assert_eq!(query_value(next, "sort_order").as_deref(), Some("desc"));
    assert_eq!(query_value(next, "page").as_deref(), Some("1"));
    assert!(page.controller("recs").unwrap().state().sort.is_none());
}

#[test]
fn test_linked_sort_without_key_is_ignored() {
    let mut page = linked_page("http://host/recs");
    assert_eq!(
        page.dispatch(&Event::click(header_id("recs", 2))),
        EventResult::Ignored
    );
}

#[test]
fn test_linked_menu_uses_server_options_and_url_state() {
    let mut page = linked_page("http://host/recs?impact=Low");
    page.dispatch(&Event::click(filter_button_id("recs", 1)));

    let menu = page.controller("recs").unwrap().state().menu(1).unwrap();
    let checked: Vec<&str> = menu.checked_in_order();
    assert_eq!(checked, vec!["Low"]);
    assert_eq!(menu.options.len(), 3);
}

#[test]
fn test_linked_apply_builds_filter_link() {
    let mut page = linked_page("http://host/recs?page=5");
    page.dispatch(&Event::click(filter_button_id("recs", 1)));
    // Options: High(0), Low(1), Medium(2), all unchecked.
    page.dispatch(&Event::change(option_id("recs", 1, 0), true));
    page.dispatch(&Event::change(option_id("recs", 1, 2), true));

    let result = page.dispatch(&Event::click(apply_id("recs", 1)));
    let next = result.url().unwrap();
    assert_eq!(query_value(next, "impact").as_deref(), Some("High,Medium"));
    assert_eq!(query_value(next, "page").as_deref(), Some("1"));
    assert_eq!(page.controller("recs").unwrap().state().open_menu(), None);
}

#[test]
fn test_linked_clear_drops_parameter() {
    let mut page = linked_page("http://host/recs?impact=High&limit=25");
    page.dispatch(&Event::click(filter_button_id("recs", 1)));

    let result = page.dispatch(&Event::click(clear_id("recs", 1)));
    let next = result.url().unwrap();
    assert_eq!(query_value(next, "impact"), None);
    assert_eq!(query_value(next, "limit").as_deref(), Some("25"));
}

#[test]
fn test_parse_linked_rejects_bad_url() {
    let err = TableController::parse_linked("t", "not a url", FilterOptions::new()).unwrap_err();
    assert!(matches!(err, TableError::Url(_)));
}
