use crate::id3v2::frames::FrameSpec;
use crate::id3v2::Value;
use indexmap::IndexMap;

/// An ordered map from frame keys to values. Keys are either aliases like `title` or
/// frame IDs like `TIT2`.
pub type TagMap = IndexMap<String, Value>;

/// A decoded tag.
///
/// Every decoded frame appears twice, once in `raw` under the frame ID it was read from
/// and once in `aliases` under its readable alias. Frames that can occur more than once
/// collect into a [`Value::List`](Value::List) in both maps.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tag {
    pub raw: TagMap,
    pub aliases: TagMap,
}

impl Tag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty() && self.aliases.is_empty()
    }

    pub(crate) fn insert(&mut self, name: &str, spec: &FrameSpec, value: Value) {
        if spec.multiple {
            push(&mut self.raw, name, value.clone());
            push(&mut self.aliases, spec.alias, value);
        } else {
            self.raw.insert(String::from(name), value.clone());
            self.aliases.insert(String::from(spec.alias), value);
        }
    }
}

/// Builds a tag that is ready to be encoded. Only `aliases` is written, so the
/// entries all go there.
impl From<TagMap> for Tag {
    fn from(aliases: TagMap) -> Self {
        Tag {
            raw: TagMap::new(),
            aliases,
        }
    }
}

fn push(map: &mut TagMap, key: &str, value: Value) {
    let entry = map
        .entry(String::from(key))
        .or_insert_with(|| Value::List(Vec::new()));

    match entry {
        Value::List(values) => values.push(value),
        other => *other = Value::List(vec![value]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id3v2::frames::registry;

    #[test]
    fn insert_single() {
        let mut tag = Tag::new();
        let spec = registry::by_alias("title").unwrap();

        tag.insert("TIT2", spec, Value::from("a"));
        tag.insert("TIT2", spec, Value::from("b"));

        assert_eq!(tag.raw["TIT2"], Value::from("b"));
        assert_eq!(tag.aliases["title"], Value::from("b"));
    }

    #[test]
    fn insert_multiple() {
        let mut tag = Tag::new();
        let spec = registry::by_alias("artistUrl").unwrap();

        tag.insert("WAR", spec, Value::from("a"));
        tag.insert("WAR", spec, Value::from("b"));

        let expected = Value::List(vec![Value::from("a"), Value::from("b")]);

        assert_eq!(tag.raw["WAR"], expected);
        assert_eq!(tag.aliases["artistUrl"], expected);
    }
}
