use pvg_types::EntityId;
use serde_json::Value;

use crate::error::PatternResult;

/// Per-type behavior the merge engine needs from a data payload.
///
/// A pattern owns one data tag. It knows how to extract and replace the
/// payload's child links and how to merge the payload's scalar content.
/// Link merging is not its concern: the engine merges links separately and
/// stitches the result back in through [`replace_children`].
///
/// [`replace_children`]: NodePattern::replace_children
pub trait NodePattern: Send + Sync + std::fmt::Debug {
    /// The data tag this pattern recognizes.
    fn tag(&self) -> &'static str;

    /// Extract the ordered child links from a payload.
    fn children(&self, value: &Value) -> PatternResult<Vec<EntityId>>;

    /// Return a copy of the payload with its child links replaced.
    fn replace_children(&self, value: &Value, children: &[EntityId]) -> PatternResult<Value>;

    /// Merge the scalar content of the payload.
    ///
    /// `original` is the common-ancestor payload when one exists;
    /// `modifications` holds one payload per branch, `to`'s first. The
    /// returned payload's child links are unspecified — the caller overwrites
    /// them with the separately merged link list.
    fn merge_content(
        &self,
        original: Option<&Value>,
        modifications: &[Value],
    ) -> PatternResult<Value>;
}
