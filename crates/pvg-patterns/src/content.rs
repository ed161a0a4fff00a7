//! Pure merge policies for scalar content.
//!
//! These functions never touch storage: they take the common-ancestor value
//! and the list of modified values (one per branch, `to` first) and return
//! the merged value. Both are deterministic over their inputs.

use similar::{DiffOp, TextDiff};

/// A span of the original string replaced by new text.
///
/// `start..end` are char indices into the original; an insertion has
/// `start == end`.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Edit {
    start: usize,
    end: usize,
    replacement: String,
}

impl Edit {
    fn conflicts_with(&self, other: &Edit) -> bool {
        let ranges_cross = self.start < other.end && other.start < self.end;
        let same_insert_point = self.start == other.start
            && (self.start == self.end || other.start == other.end);
        ranges_cross || same_insert_point
    }
}

fn edits_between(original: &str, modified: &str) -> Vec<Edit> {
    let new_chars: Vec<char> = modified.chars().collect();
    let diff = TextDiff::from_chars(original, modified);
    let mut edits = Vec::new();
    for op in diff.ops() {
        match *op {
            DiffOp::Equal { .. } => {}
            DiffOp::Delete {
                old_index, old_len, ..
            } => edits.push(Edit {
                start: old_index,
                end: old_index + old_len,
                replacement: String::new(),
            }),
            DiffOp::Insert {
                old_index,
                new_index,
                new_len,
            } => edits.push(Edit {
                start: old_index,
                end: old_index,
                replacement: new_chars[new_index..new_index + new_len].iter().collect(),
            }),
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => edits.push(Edit {
                start: old_index,
                end: old_index + old_len,
                replacement: new_chars[new_index..new_index + new_len].iter().collect(),
            }),
        }
    }
    edits
}

/// Three-way text merge.
///
/// Each modification is diffed against the original at char granularity;
/// non-conflicting edits from all branches apply together. When two branches
/// edit the same span, the later modification wins; identical edits collapse
/// into one.
pub fn merge_strings(original: &str, modifications: &[&str]) -> String {
    let mut merged: Vec<Edit> = Vec::new();
    for modified in modifications {
        for edit in edits_between(original, modified) {
            if merged.contains(&edit) {
                continue;
            }
            merged.retain(|kept| !kept.conflicts_with(&edit));
            merged.push(edit);
        }
    }

    // Apply right to left so earlier indices stay valid.
    merged.sort_by(|a, b| b.start.cmp(&a.start).then(b.end.cmp(&a.end)));
    let mut chars: Vec<char> = original.chars().collect();
    for edit in merged {
        chars.splice(edit.start..edit.end, edit.replacement.chars());
    }
    chars.into_iter().collect()
}

/// Deterministic tie-break for unmergeable scalars.
///
/// The last modification that differs from the original wins; if none
/// differs, the first modification; with no modifications, the original.
pub fn merge_result<T: Clone + PartialEq>(original: Option<&T>, modifications: &[T]) -> Option<T> {
    for modified in modifications.iter().rev() {
        if Some(modified) != original {
            return Some(modified.clone());
        }
    }
    modifications.first().or(original).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // merge_strings
    // -----------------------------------------------------------------------

    #[test]
    fn no_modifications_keeps_original() {
        assert_eq!(merge_strings("hello", &[]), "hello");
    }

    #[test]
    fn single_modification_passes_through() {
        assert_eq!(merge_strings("hello world", &["hello there"]), "hello there");
    }

    #[test]
    fn disjoint_edits_both_apply() {
        let merged = merge_strings(
            "the quick brown fox",
            &["a quick brown fox", "the quick brown dog"],
        );
        assert_eq!(merged, "a quick brown dog");
    }

    #[test]
    fn identical_edits_collapse() {
        let merged = merge_strings("hello world", &["hello there", "hello there"]);
        assert_eq!(merged, "hello there");
    }

    #[test]
    fn overlapping_edits_later_wins() {
        let merged = merge_strings("shared text", &["shared foo", "shared bar"]);
        assert_eq!(merged, "shared bar");
    }

    #[test]
    fn unchanged_branch_does_not_revert() {
        let merged = merge_strings("original", &["original", "changed"]);
        assert_eq!(merged, "changed");
    }

    #[test]
    fn merge_from_empty_original() {
        assert_eq!(merge_strings("", &["new text"]), "new text");
    }

    #[test]
    fn merge_is_deterministic() {
        let a = merge_strings("base line", &["base liner", "bass line"]);
        let b = merge_strings("base line", &["base liner", "bass line"]);
        assert_eq!(a, b);
    }

    // -----------------------------------------------------------------------
    // merge_result
    // -----------------------------------------------------------------------

    #[test]
    fn result_prefers_latest_differing_modification() {
        assert_eq!(merge_result(Some(&1), &[1, 2, 3]), Some(3));
        assert_eq!(merge_result(Some(&1), &[2, 1]), Some(2));
    }

    #[test]
    fn result_falls_back_to_first_modification() {
        assert_eq!(merge_result(Some(&1), &[1, 1]), Some(1));
        assert_eq!(merge_result(None, &[5, 5]), Some(5));
    }

    #[test]
    fn result_with_no_modifications_keeps_original() {
        assert_eq!(merge_result(Some(&7), &[]), Some(7));
        assert_eq!(merge_result::<i32>(None, &[]), None);
    }
}
