
use crate::id3v2::{TagMap, Value};

/// Builds a tag map from alias and value pairs, keeping their order.
pub(crate) fn tag_map<V: Into<Value>>(entries: Vec<(&str, V)>) -> TagMap {
    entries
        .into_iter()
        .map(|(key, value)| (String::from(key), value.into()))
        .collect()
}
