//! Reading and writing tags in files.
//!
//! Files are always read and written whole. The tag is decoded from or spliced into the
//! start of the file, and everything after it is kept as-is.

use crate::err::{ParseResult, SaveResult};
use crate::id3v2::frames::{registry, FrameKind, SpecialKind};
use crate::id3v2::{self, Tag, TagMap, Value};
use log::info;
use std::borrow::Cow;
use std::error;
use std::fmt::{self, Display, Formatter};
use std::fs;
use std::io::{self, Error, ErrorKind};
use std::path::Path;

/// Reads the tag from the file at `path`. A file with no tag yields an empty tag.
pub fn read_tags<P: AsRef<Path>>(path: P) -> ParseResult<Tag> {
    let data = read_file(path.as_ref())?;

    Ok(id3v2::decode(&data))
}

/// Replaces the tag of the file at `path` with a new tag built from `tags`.
///
/// Image entries holding text are taken to be the path of an image file, which is read
/// and written as the image.
pub fn write_tags<P: AsRef<Path>>(path: P, tags: &TagMap) -> SaveResult<()> {
    let tags = load_images(tags)?;
    let mut result = id3v2::encode(&tags)?;

    let data = read_file(path.as_ref())?;
    result.extend(id3v2::strip(&data)?);

    fs::write(path, result)?;

    Ok(())
}

/// Removes the tag from the file at `path`. Files without a tag are rewritten unchanged.
pub fn remove_tags<P: AsRef<Path>>(path: P) -> SaveResult<()> {
    let data = read_file(path.as_ref())?;
    let audio = id3v2::strip(&data)?;

    fs::write(path, audio)?;

    Ok(())
}

/// Merges `tags` into the existing tag of the file at `path` and writes the result.
/// New entries replace existing ones, and frame IDs are treated the same as their aliases.
pub fn update_tags<P: AsRef<Path>>(path: P, tags: &TagMap) -> SaveResult<()> {
    let mut merged = read_tags(path.as_ref())?.aliases;

    for (key, value) in tags {
        let key = registry::resolve(key).map_or(key.as_str(), |spec| spec.alias);
        merged.insert(String::from(key), value.clone());
    }

    write_tags(path, &merged)
}

fn read_file(path: &Path) -> io::Result<Vec<u8>> {
    // Directories aren't supported
    if path.metadata()?.is_dir() {
        return Err(Error::new(ErrorKind::InvalidInput, FileError::IsDir));
    }

    fs::read(path)
}

fn load_images(tags: &TagMap) -> io::Result<Cow<TagMap>> {
    let is_image = |key: &str| {
        registry::resolve(key)
            .map_or(false, |spec| spec.kind == FrameKind::Special(SpecialKind::Picture))
    };

    if !tags
        .iter()
        .any(|(key, value)| is_image(key) && value.as_text().is_some())
    {
        return Ok(Cow::Borrowed(tags));
    }

    let mut loaded = tags.clone();

    for (key, value) in loaded.iter_mut() {
        if !is_image(key) {
            continue;
        }

        if let Some(image_path) = value.as_text() {
            info!(target: "id3v2", "reading image from {}", image_path);
            let data = read_file(Path::new(image_path))?;
            *value = Value::Binary(data);
        }
    }

    Ok(Cow::Owned(loaded))
}

#[derive(Debug)]
pub enum FileError {
    IsDir,
}

impl Display for FileError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::IsDir => write![f, "Is a directory"],
        }
    }
}

impl error::Error for FileError {
    // Nothing to implement
}
