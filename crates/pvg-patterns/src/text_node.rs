use pvg_store::entity::{TextKind, TextNode};
use pvg_types::EntityId;
use serde_json::Value;

use crate::content::{merge_result, merge_strings};
use crate::error::{PatternError, PatternResult};
use crate::pattern::NodePattern;

/// Pattern for [`TextNode`] payloads.
///
/// Text merges with the three-way string merge; the node kind falls back to
/// the deterministic tie-break.
#[derive(Debug, Default)]
pub struct TextNodePattern;

fn decode(value: &Value) -> PatternResult<TextNode> {
    TextNode::from_value(value).map_err(|e| PatternError::InvalidPayload {
        tag: TextNode::TAG.into(),
        reason: e.to_string(),
    })
}

impl NodePattern for TextNodePattern {
    fn tag(&self) -> &'static str {
        TextNode::TAG
    }

    fn children(&self, value: &Value) -> PatternResult<Vec<EntityId>> {
        Ok(decode(value)?.links)
    }

    fn replace_children(&self, value: &Value, children: &[EntityId]) -> PatternResult<Value> {
        let mut node = decode(value)?;
        node.links = children.to_vec();
        node.to_value().map_err(|e| PatternError::InvalidPayload {
            tag: TextNode::TAG.into(),
            reason: e.to_string(),
        })
    }

    fn merge_content(
        &self,
        original: Option<&Value>,
        modifications: &[Value],
    ) -> PatternResult<Value> {
        let original = original.map(decode).transpose()?;
        let modifications: Vec<TextNode> =
            modifications.iter().map(decode).collect::<Result<_, _>>()?;

        let original_text = original.as_ref().map(|n| n.text.as_str()).unwrap_or("");
        let texts: Vec<&str> = modifications.iter().map(|n| n.text.as_str()).collect();
        let text = merge_strings(original_text, &texts);

        let kinds: Vec<TextKind> = modifications.iter().map(|n| n.kind).collect();
        let kind = merge_result(original.as_ref().map(|n| &n.kind), &kinds)
            .unwrap_or(TextKind::Paragraph);

        let merged = TextNode {
            text,
            kind,
            links: vec![],
        };
        merged.to_value().map_err(|e| PatternError::InvalidPayload {
            tag: TextNode::TAG.into(),
            reason: e.to_string(),
        })
    }
}
