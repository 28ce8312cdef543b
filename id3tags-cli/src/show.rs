use crate::{errorln, print_entry, print_header};
use id3tags::err::ParseError;
use id3tags::file;
use id3tags::id3v2::frames::registry;
use id3tags::id3v2::Value;

use std::error;
use std::fmt::{self, Display, Formatter};

/// Show plan:
/// -t Limits the output to specific tags, given either as aliases like `title` or as
///    frame IDs like `TIT2`. If no tag matches, the file is reported as having no metadata.
///    Without it, every tag is shown in the order it appears in the file.

#[derive(Debug)]
pub enum ShowError {
    ParseError(ParseError),
    NoMetadata,
}

impl Display for ShowError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::ParseError(err) => write![f, "{}", err],
            Self::NoMetadata => write![f, "no metadata found"],
        }
    }
}

impl error::Error for ShowError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::ParseError(err) => Some(err),
            Self::NoMetadata => None,
        }
    }
}

impl From<ParseError> for ShowError {
    fn from(other: ParseError) -> Self {
        Self::ParseError(other)
    }
}

pub type ShowResult = Result<(), ShowError>;

/// Shows the tags of every file, returning whether all of them could be read.
pub fn show<'a>(paths: impl Iterator<Item = &'a str>, filter: &[&str]) -> bool {
    let mut ok = true;

    for path in paths {
        // It's okay if a file fails to parse here, just log the problem and move on.
        if let Err(err) = show_file(path, filter) {
            errorln!("{}: {}", path, err);
            ok = false;
        }
    }

    ok
}

fn show_file(path: &str, filter: &[&str]) -> ShowResult {
    let tag = file::read_tags(path)?;

    let entries: Vec<(&String, &Value)> = tag
        .aliases
        .iter()
        .filter(|(name, _)| filter.is_empty() || filter.iter().any(|key| matches(key, name)))
        .collect();

    if entries.is_empty() {
        return Err(ShowError::NoMetadata);
    }

    print_header!("Metadata for {}:", path);

    for (name, value) in entries {
        print_value(name, value, 2);
    }

    Ok(())
}

/// Returns whether a filter key refers to the given alias, either directly or by frame ID.
fn matches(key: &str, alias: &str) -> bool {
    key == alias || registry::resolve(key).map_or(false, |spec| spec.alias == alias)
}

fn print_value(name: &str, value: &Value, indents: usize) {
    print_entry!("{:>i$}{}:", "", name, i = indents);

    let lines: Vec<String> = value
        .values()
        .iter()
        .map(|value| value.to_string())
        .flat_map(|value| {
            value
                .split('\n')
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect::<Vec<_>>()
        })
        .collect();

    if lines.len() == 1 {
        println!(" {}", lines[0]);
    } else {
        println!();

        for line in lines {
            println!("{:>i$}{}", "", line, i = indents + 2);
        }
    }
}
