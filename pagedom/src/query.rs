//! Tree queries.
//!
//! Selector-style lookups over an [`Element`] tree: ancestor chains for event
//! targets, `closest`, and predicate-based collection.

use crate::element::{Content, Element};

/// Chain of elements from `root` down to the element with `id`, inclusive.
///
/// Returns `None` if no element in the tree has that ID.
pub fn ancestry<'a>(root: &'a Element, id: &str) -> Option<Vec<&'a Element>> {
    fn walk<'a>(node: &'a Element, id: &str, path: &mut Vec<&'a Element>) -> bool {
        path.push(node);
        if node.id == id {
            return true;
        }
        if let Content::Children(children) = &node.content {
            for child in children {
                if walk(child, id, path) {
                    return true;
                }
            }
        }
        path.pop();
        false
    }

    let mut path = Vec::new();
    walk(root, id, &mut path).then_some(path)
}

/// Nearest element (the target itself or an ancestor) matching `pred`.
pub fn closest<'a>(
    root: &'a Element,
    id: &str,
    pred: impl Fn(&Element) -> bool,
) -> Option<&'a Element> {
    ancestry(root, id)?.into_iter().rev().find(|el| pred(el))
}

/// All elements matching `pred`, in document order.
pub fn query_all<'a>(root: &'a Element, pred: impl Fn(&Element) -> bool) -> Vec<&'a Element> {
    fn collect<'a>(node: &'a Element, pred: &dyn Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
        if pred(node) {
            out.push(node);
        }
        for child in node.child_nodes() {
            collect(child, pred, out);
        }
    }

    let mut out = Vec::new();
    collect(root, &pred, &mut out);
    out
}

/// First element matching `pred`, in document order.
pub fn query_first<'a>(root: &'a Element, pred: impl Fn(&Element) -> bool) -> Option<&'a Element> {
    fn find<'a>(node: &'a Element, pred: &dyn Fn(&Element) -> bool) -> Option<&'a Element> {
        if pred(node) {
            return Some(node);
        }
        node.child_nodes().iter().find_map(|child| find(child, pred))
    }

    find(root, &pred)
}

/// Visit every element in document order, parents before children.
pub fn walk_mut(root: &mut Element, f: &mut impl FnMut(&mut Element)) {
    f(root);
    if let Content::Children(children) = &mut root.content {
        for child in children {
            walk_mut(child, f);
        }
    }
}
