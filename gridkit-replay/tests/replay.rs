use std::path::{Path, PathBuf};

use gridkit::link::query_value;
use gridkit_replay::ReplayError;
use gridkit_replay::fixture::{Fixture, Step, load_script};
use gridkit_replay::replay::run;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

fn names(rows: &[Vec<String>]) -> Vec<&str> {
    rows.iter().map(|r| r[0].as_str()).collect()
}

// ============================================================================
// Files
// ============================================================================

#[test]
fn test_step_json_shape() {
    let steps: Vec<Step> = serde_json::from_str(
        r#"[
            {"action": "open_filter", "column": 2},
            {"action": "select_all", "column": 2, "checked": false},
            {"action": "search", "column": 2, "text": "we"},
            {"action": "click", "target": "page"}
        ]"#,
    )
    .unwrap();

    assert_eq!(steps[0], Step::OpenFilter { column: 2 });
    assert_eq!(
        steps[1],
        Step::SelectAll {
            column: 2,
            checked: false
        }
    );
    assert_eq!(
        steps[3],
        Step::Click {
            target: "page".into()
        }
    );
}

#[test]
fn test_missing_fixture_is_io_error() {
    let err = Fixture::load(&fixture_path("does-not-exist.json")).unwrap_err();
    assert!(matches!(err, ReplayError::Io { .. }));
}

#[test]
fn test_bad_base_url_is_table_error() {
    let fixture: Fixture = serde_json::from_str(
        r#"{"id": "t", "columns": [{"label": "A"}], "base_url": "::nope"}"#,
    )
    .unwrap();
    assert!(matches!(
        fixture.build_page().unwrap_err(),
        ReplayError::Table(_)
    ));
}

// ============================================================================
// In-place replay
// ============================================================================

#[test]
fn test_fixture_without_script_shows_every_row() {
    let fixture = Fixture::load(&fixture_path("recommendations.json")).unwrap();
    let report = run(&fixture, &[]).unwrap();

    assert_eq!(report.rows.len(), 6);
    assert_eq!(report.total, 6);
    assert!(report.navigations.is_empty());
}

#[test]
fn test_sample_script_sorts_and_filters() {
    let fixture = Fixture::load(&fixture_path("recommendations.json")).unwrap();
    let steps = load_script(&fixture_path("recommendations.script.json")).unwrap();
    let report = run(&fixture, &steps).unwrap();

    assert_eq!(
        names(&report.rows),
        vec!["disk-archive-3", "vm-web-01", "app-plan-legacy", "sql-reporting"]
    );
    assert_eq!(report.total, 6);

    let text = report.render(0);
    assert!(text.starts_with("Resource"));
    assert!(text.contains("(4 of 6 rows)"));
}

#[test]
fn test_blank_cells_filter_like_any_value() {
    let fixture = Fixture::load(&fixture_path("recommendations.json")).unwrap();
    let steps = vec![
        Step::OpenFilter { column: 3 },
        Step::Toggle {
            column: 3,
            value: String::new(),
        },
        Step::Apply { column: 3 },
    ];
    let report = run(&fixture, &steps).unwrap();
    assert_eq!(report.rows.len(), 5);
    assert!(!names(&report.rows).contains(&"app-plan-legacy"));
}

#[test]
fn test_toggle_before_open_is_step_error() {
    let fixture = Fixture::load(&fixture_path("recommendations.json")).unwrap();
    let steps = vec![Step::Toggle {
        column: 2,
        value: "Low".into(),
    }];
    let err = run(&fixture, &steps).unwrap_err();
    assert!(matches!(err, ReplayError::Step { index: 0, .. }));
}

#[test]
fn test_menu_steps_before_open_are_step_errors() {
    let fixture = Fixture::load(&fixture_path("recommendations.json")).unwrap();
    let steps = [
        Step::SelectAll {
            column: 2,
            checked: false,
        },
        Step::Search {
            column: 2,
            text: "lo".into(),
        },
        Step::Apply { column: 2 },
        Step::Clear { column: 2 },
    ];

    for step in steps {
        let err = run(&fixture, &[step.clone()]).unwrap_err();
        assert!(
            matches!(err, ReplayError::Step { index: 0, .. }),
            "{step:?} should fail"
        );
    }
}

#[test]
fn test_apply_on_other_column_than_opened_is_step_error() {
    let fixture = Fixture::load(&fixture_path("recommendations.json")).unwrap();
    let steps = vec![Step::OpenFilter { column: 2 }, Step::Apply { column: 3 }];
    let err = run(&fixture, &steps).unwrap_err();
    assert!(matches!(err, ReplayError::Step { index: 1, .. }));
}

#[test]
fn test_unknown_option_is_step_error() {
    let fixture = Fixture::load(&fixture_path("recommendations.json")).unwrap();
    let steps = vec![
        Step::OpenFilter { column: 2 },
        Step::Toggle {
            column: 2,
            value: "Critical".into(),
        },
    ];
    let err = run(&fixture, &steps).unwrap_err();
    assert!(matches!(err, ReplayError::Step { index: 1, .. }));
}

#[test]
fn test_ignored_steps_are_not_errors() {
    let fixture = Fixture::load(&fixture_path("recommendations.json")).unwrap();
    // Region is not sortable and there is no page-size selector in place.
    let steps = vec![
        Step::Sort { column: 3 },
        Step::Limit { value: "50".into() },
    ];
    let report = run(&fixture, &steps).unwrap();
    assert_eq!(report.rows.len(), 6);
    assert!(report.navigations.is_empty());
}

// ============================================================================
// Linked replay
// ============================================================================

#[test]
fn test_linked_script_records_navigations() {
    let fixture = Fixture::load(&fixture_path("linked.json")).unwrap();
    let steps = load_script(&fixture_path("linked.script.json")).unwrap();
    let report = run(&fixture, &steps).unwrap();

    // Rows are whatever the server rendered; nothing is reordered locally.
    assert_eq!(names(&report.rows), vec!["vm-web-01", "disk-archive-3"]);
    assert_eq!(report.navigations.len(), 3);

    let sort = &report.navigations[0];
    assert_eq!(query_value(sort, "sort_by").as_deref(), Some("resource"));
    assert_eq!(query_value(sort, "sort_order").as_deref(), Some("asc"));
    assert_eq!(query_value(sort, "impact").as_deref(), Some("High"));

    let filter = &report.navigations[1];
    assert_eq!(query_value(filter, "impact").as_deref(), Some("High,Medium"));
    assert_eq!(query_value(filter, "limit").as_deref(), Some("25"));

    let limit = &report.navigations[2];
    assert_eq!(query_value(limit, "limit").as_deref(), Some("50"));

    for url in &report.navigations {
        assert_eq!(query_value(url, "page").as_deref(), Some("1"));
    }
    assert!(report.render(0).contains("navigate: https://dashboard.example/"));
}
