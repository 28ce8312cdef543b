use crate::errorln;
use id3tags::err::SaveError;
use id3tags::file;
use id3tags::id3v2::frames::{registry, FrameKind, SpecialKind};
use id3tags::id3v2::{TagMap, Value};
use log::info;

use std::error;
use std::fmt::{self, Display, Formatter};

#[derive(Debug)]
pub enum EditError {
    /// An argument that isn't in the `KEY=VALUE` form.
    InvalidPair(String),
    UnknownKey(String),
    /// A frame that can't be built from plain text.
    Unsupported(String),
    SaveError(SaveError),
}

impl Display for EditError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::InvalidPair(arg) => write![f, "expected KEY=VALUE, found \"{}\"", arg],
            Self::UnknownKey(key) => write![f, "unknown tag \"{}\"", key],
            Self::Unsupported(key) => write![f, "\"{}\" cannot be written from text", key],
            Self::SaveError(err) => write![f, "{}", err],
        }
    }
}

impl error::Error for EditError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::SaveError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SaveError> for EditError {
    fn from(other: SaveError) -> Self {
        Self::SaveError(other)
    }
}

pub type EditResult = Result<(), EditError>;

/// Writes `KEY=VALUE` pairs into a file. The pairs are merged into the existing tag unless
/// `replace` is set, in which case they become the whole tag.
pub fn write<'a>(path: &str, pairs: impl Iterator<Item = &'a str>, replace: bool) -> EditResult {
    let tags = parse_pairs(pairs)?;

    if replace {
        file::write_tags(path, &tags)?;
    } else {
        file::update_tags(path, &tags)?;
    }

    info!(target: "id3tags", "wrote {} tag(s) to {}", tags.len(), path);

    Ok(())
}

/// Strips the tags of every file, returning whether all of them could be stripped.
pub fn strip<'a>(paths: impl Iterator<Item = &'a str>) -> bool {
    let mut ok = true;

    for path in paths {
        if let Err(err) = file::remove_tags(path) {
            errorln!("{}: {}", path, err);
            ok = false;
        }
    }

    ok
}

/// Builds a tag map from `KEY=VALUE` arguments. Keys may be aliases or frame IDs, and keys
/// of frames that can appear multiple times collect every value given for them.
fn parse_pairs<'a>(pairs: impl Iterator<Item = &'a str>) -> Result<TagMap, EditError> {
    let mut tags = TagMap::new();

    for arg in pairs {
        let (key, value) = split_pair(arg)?;

        let spec = registry::resolve(key).ok_or_else(|| EditError::UnknownKey(key.into()))?;

        match spec.kind {
            FrameKind::Text
            | FrameKind::Url
            | FrameKind::Special(SpecialKind::Comment)
            | FrameKind::Special(SpecialKind::Lyrics)
            | FrameKind::Special(SpecialKind::Picture) => {}
            _ => return Err(EditError::Unsupported(key.into())),
        }

        let value = Value::from(value);

        if !spec.multiple {
            tags.insert(key.into(), value);
            continue;
        }

        match tags.get_mut(key) {
            Some(Value::List(values)) => values.push(value),
            _ => {
                tags.insert(key.into(), Value::List(vec![value]));
            }
        }
    }

    Ok(tags)
}

fn split_pair(arg: &str) -> Result<(&str, &str), EditError> {
    match arg.find('=') {
        Some(idx) if idx > 0 => Ok((&arg[..idx], &arg[idx + 1..])),
        _ => Err(EditError::InvalidPair(arg.into())),
    }
}
