//! Linked mode: table interactions become query-string navigation.
//!
//! The server renders one page of an already sorted and filtered result. The
//! page's URL carries `sort_by`, `sort_order`, `page`, `limit` and one
//! comma-separated parameter per filtered column. Every link built here resets
//! `page` to `1`, since any change of sort, filter or page size invalidates the
//! current page number.

use std::collections::{BTreeMap, HashSet};

use url::Url;

use crate::filter::FilterMenu;
use crate::sort::SortDirection;

pub const SORT_BY_PARAM: &str = "sort_by";
pub const SORT_ORDER_PARAM: &str = "sort_order";
pub const PAGE_PARAM: &str = "page";
pub const LIMIT_PARAM: &str = "limit";

/// Server-provided option lists, keyed by column key.
pub type FilterOptions = BTreeMap<String, Vec<String>>;

/// First value of a query parameter.
pub fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| &**k == key)
        .map(|(_, v)| v.into_owned())
}

/// Values currently active for a filter key (comma-separated in the URL).
pub fn active_values(url: &Url, key: &str) -> HashSet<String> {
    query_value(url, key)
        .map(|v| {
            v.split(',')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Copy of `url` with `updates` applied in order.
///
/// `Some(value)` replaces the first occurrence of the key in place (dropping any
/// repeats) or appends it; `None` removes the key. Untouched parameters keep
/// their order.
pub fn with_params(url: &Url, updates: &[(&str, Option<String>)]) -> Url {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    for (key, value) in updates {
        match value {
            Some(value) => {
                let mut replaced = false;
                pairs.retain_mut(|(k, v)| {
                    if k.as_str() != *key {
                        return true;
                    }
                    if replaced {
                        return false;
                    }
                    *v = value.clone();
                    replaced = true;
                    true
                });
                if !replaced {
                    pairs.push((key.to_string(), value.clone()));
                }
            }
            None => pairs.retain(|(k, _)| k.as_str() != *key),
        }
    }

    let mut next = url.clone();
    if pairs.is_empty() {
        next.set_query(None);
    } else {
        next.query_pairs_mut().clear().extend_pairs(pairs);
    }
    next
}

/// Link for clicking the header of `column_key`.
///
/// Re-clicking the current ascending column flips to descending; anything
/// else sorts ascending.
pub fn sort_link(url: &Url, column_key: &str) -> Url {
    let current_by = query_value(url, SORT_BY_PARAM);
    let current_order = query_value(url, SORT_ORDER_PARAM).and_then(|o| SortDirection::parse(&o));

    let order = if current_by.as_deref() == Some(column_key)
        && current_order == Some(SortDirection::Ascending)
    {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };

    with_params(
        url,
        &[
            (SORT_BY_PARAM, Some(column_key.to_string())),
            (SORT_ORDER_PARAM, Some(order.as_str().to_string())),
            (PAGE_PARAM, Some("1".to_string())),
        ],
    )
}

/// Link for applying every menu: checked values become `key=v1,v2`; a menu with
/// nothing checked removes its key.
pub fn filter_link<'a>(url: &Url, menus: impl IntoIterator<Item = (&'a str, &'a FilterMenu)>) -> Url {
    let mut updates: Vec<(&str, Option<String>)> = menus
        .into_iter()
        .map(|(key, menu)| {
            let checked = menu.checked_in_order();
            (key, (!checked.is_empty()).then(|| checked.join(",")))
        })
        .collect();
    updates.push((PAGE_PARAM, Some("1".to_string())));
    with_params(url, &updates)
}

/// Link for the items-per-page selector.
pub fn limit_link(url: &Url, limit: u32) -> Url {
    with_params(
        url,
        &[
            (LIMIT_PARAM, Some(limit.to_string())),
            (PAGE_PARAM, Some("1".to_string())),
        ],
    )
}
