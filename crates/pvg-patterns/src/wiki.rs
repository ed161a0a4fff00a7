use pvg_store::entity::Wiki;
use pvg_types::EntityId;
use serde_json::Value;

use crate::content::merge_strings;
use crate::error::{PatternError, PatternResult};
use crate::pattern::NodePattern;

/// Pattern for [`Wiki`] payloads. Pages are the child links.
#[derive(Debug, Default)]
pub struct WikiPattern;

fn decode(value: &Value) -> PatternResult<Wiki> {
    Wiki::from_value(value).map_err(|e| PatternError::InvalidPayload {
        tag: Wiki::TAG.into(),
        reason: e.to_string(),
    })
}

impl NodePattern for WikiPattern {
    fn tag(&self) -> &'static str {
        Wiki::TAG
    }

    fn children(&self, value: &Value) -> PatternResult<Vec<EntityId>> {
        Ok(decode(value)?.pages)
    }

    fn replace_children(&self, value: &Value, children: &[EntityId]) -> PatternResult<Value> {
        let mut wiki = decode(value)?;
        wiki.pages = children.to_vec();
        wiki.to_value().map_err(|e| PatternError::InvalidPayload {
            tag: Wiki::TAG.into(),
            reason: e.to_string(),
        })
    }

    fn merge_content(
        &self,
        original: Option<&Value>,
        modifications: &[Value],
    ) -> PatternResult<Value> {
        let original = original.map(decode).transpose()?;
        let modifications: Vec<Wiki> =
            modifications.iter().map(decode).collect::<Result<_, _>>()?;

        let original_title = original.as_ref().map(|w| w.title.as_str()).unwrap_or("");
        let titles: Vec<&str> = modifications.iter().map(|w| w.title.as_str()).collect();

        let merged = Wiki {
            title: merge_strings(original_title, &titles),
            pages: vec![],
        };
        merged.to_value().map_err(|e| PatternError::InvalidPayload {
            tag: Wiki::TAG.into(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wiki(title: &str, pages: Vec<EntityId>) -> Value {
        Wiki {
            title: title.into(),
            pages,
        }
        .to_value()
        .unwrap()
    }

    fn oid(b: u8) -> EntityId {
        EntityId::from_hash([b; 32])
    }

    #[test]
    fn pages_are_the_children() {
        let pattern = WikiPattern;
        let value = wiki("home", vec![oid(1), oid(2)]);
        assert_eq!(pattern.children(&value).unwrap(), vec![oid(1), oid(2)]);

        let replaced = pattern
            .replace_children(&value, &[oid(2), oid(1), oid(3)])
            .unwrap();
        assert_eq!(
            pattern.children(&replaced).unwrap(),
            vec![oid(2), oid(1), oid(3)]
        );
    }

    #[test]
    fn merges_title() {
        let pattern = WikiPattern;
        let merged = pattern
            .merge_content(
                Some(&wiki("home", vec![])),
                &[wiki("home", vec![]), wiki("home page", vec![])],
            )
            .unwrap();
        assert_eq!(decode(&merged).unwrap().title, "home page");
    }
}
