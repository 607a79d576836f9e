//! The heterogeneous result tree produced by the primary backend, and the
//! recursive flattener that turns it into a flat list of form strings.
//!
//! Backend versions disagree on shape: some nest mood → tense → forms as
//! mappings of mappings, some wrap the payload under a marker key
//! ("conjugations", or "c" in the minified variant), some emit paired
//! [pronoun, form] rows. The flattener handles all of them.

use std::collections::BTreeMap;

/// Defensive recursion bound. The backend is trusted to return shallow
/// trees; anything deeper is truncated rather than blowing the stack.
pub const MAX_DEPTH: usize = 64;

/// A node in the backend's result tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultTree {
    /// A single conjugated form (or pronoun label inside a paired row).
    Leaf(String),
    /// An ordered run of forms or paired rows.
    Sequence(Vec<ResultTree>),
    /// A category container (mood, tense) or a marker-keyed payload.
    Mapping(BTreeMap<String, ResultTree>),
}

impl ResultTree {
    /// Convert loosely-typed JSON into a [`ResultTree`].
    ///
    /// Strings become leaves, arrays sequences, objects mappings. Any other
    /// JSON shape (number, bool, null) is dropped silently — unknown shapes
    /// are ignored, never errors.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(Self::Leaf(s.clone())),
            serde_json::Value::Array(items) => Some(Self::Sequence(
                items.iter().filter_map(Self::from_json).collect(),
            )),
            serde_json::Value::Object(map) => Some(Self::Mapping(
                map.iter()
                    .filter_map(|(k, v)| Self::from_json(v).map(|t| (k.clone(), t)))
                    .collect(),
            )),
            _ => None,
        }
    }
}

/// Flatten a result tree into raw form strings (not yet trimmed or deduped).
///
/// Leaves are only harvested while iterating a sequence; a lone leaf reached
/// as a mapping value (or at the top) yields nothing. A sequence element
/// that is itself a sequence of only leaves is a paired row (e.g. pronoun +
/// form) and is joined with single spaces into one composite string.
pub fn flatten(tree: &ResultTree, marker_keys: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    collect(tree, marker_keys, 0, &mut out);
    out
}

fn collect(node: &ResultTree, marker_keys: &[String], depth: usize, out: &mut Vec<String>) {
    if depth > MAX_DEPTH {
        return;
    }

    match node {
        ResultTree::Mapping(map) => {
            // Marker key present: the payload is right here, skip the rest
            // of the category nesting.
            for key in marker_keys {
                if let Some(value) = map.get(key) {
                    collect(value, marker_keys, depth + 1, out);
                    return;
                }
            }
            for value in map.values() {
                collect(value, marker_keys, depth + 1, out);
            }
        }
        ResultTree::Sequence(items) => {
            for item in items {
                match item {
                    ResultTree::Leaf(s) => out.push(s.clone()),
                    ResultTree::Sequence(inner) if is_leaf_row(inner) => {
                        let joined = inner
                            .iter()
                            .filter_map(|n| match n {
                                ResultTree::Leaf(s) => Some(s.as_str()),
                                _ => None,
                            })
                            .collect::<Vec<_>>()
                            .join(" ");
                        out.push(joined);
                    }
                    other => collect(other, marker_keys, depth + 1, out),
                }
            }
        }
        // A leaf outside sequence context carries no forms.
        ResultTree::Leaf(_) => {}
    }
}

/// A non-empty sequence consisting only of leaves — a paired label+form row.
fn is_leaf_row(items: &[ResultTree]) -> bool {
    !items.is_empty() && items.iter().all(|n| matches!(n, ResultTree::Leaf(_)))
}
