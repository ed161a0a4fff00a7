use std::collections::HashSet;
use std::hash::Hash;

/// Three-way merge of ordered link lists over generic merge keys.
///
/// Policy:
/// - surviving keys keep the original's ordering;
/// - a key present in the original is dropped only when every modification
///   dropped it;
/// - keys new to a modification are appended in modification order, first
///   branch's additions before the second's;
/// - duplicates across branches collapse to one occurrence.
///
/// With no modifications at all the original passes through untouched.
pub fn merge_link_lists<K: Clone + Eq + Hash>(original: &[K], modifications: &[Vec<K>]) -> Vec<K> {
    if modifications.is_empty() {
        return original.to_vec();
    }

    let mut merged: Vec<K> = Vec::new();
    let mut seen: HashSet<&K> = HashSet::new();

    for key in original {
        if seen.contains(key) {
            continue;
        }
        if modifications.iter().any(|m| m.contains(key)) {
            merged.push(key.clone());
            seen.insert(key);
        }
    }

    let original_set: HashSet<&K> = original.iter().collect();
    for modification in modifications {
        for key in modification {
            if !original_set.contains(key) && !seen.contains(key) {
                merged.push(key.clone());
                seen.insert(key);
            }
        }
    }

    merged
}
