use crate::id3v2::frames::{
    Chapter, Comment, Picture, Popularimeter, Private, UserText, UserUrl,
};
use std::fmt::{self, Display, Formatter};

/// The value of a frame.
///
/// Text and URL frames decode into [`Text`](Value::Text), while every special frame has
/// its own variant. Frames that can appear multiple times decode into a [`List`](Value::List).
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Text(String),
    /// Raw image data. Only accepted when writing an image, and written as a JPEG or PNG
    /// front cover.
    Binary(Vec<u8>),
    Picture(Picture),
    /// A comment or unsynchronized lyrics.
    Comment(Comment),
    UserText(UserText),
    Popularimeter(Popularimeter),
    Private(Private),
    Chapter(Chapter),
    UserUrl(UserUrl),
    List(Vec<Value>),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the values held by this value, which is either the list contents or the
    /// value itself.
    pub fn values(&self) -> &[Value] {
        match self {
            Self::List(values) => values,
            value => std::slice::from_ref(value),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Text(text) => write![f, "{}", text],
            Self::Binary(data) => write![f, "[{} bytes]", data.len()],
            Self::Picture(picture) => picture.fmt(f),
            Self::Comment(comment) => comment.fmt(f),
            Self::UserText(user_text) => user_text.fmt(f),
            Self::Popularimeter(popm) => popm.fmt(f),
            Self::Private(private) => private.fmt(f),
            Self::Chapter(chapter) => chapter.fmt(f),
            Self::UserUrl(user_url) => user_url.fmt(f),
            Self::List(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write![f, "; "]?;
                    }

                    value.fmt(f)?;
                }

                Ok(())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(String::from(text))
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<u8>> for Value {
    fn from(data: Vec<u8>) -> Self {
        Self::Binary(data)
    }
}

macro_rules! value_from {
    ($($variant:ident),* $(,)?) => {
        $(impl From<$variant> for Value {
            fn from(value: $variant) -> Self {
                Self::$variant(value)
            }
        })*
    };
}

value_from!(Picture, Comment, UserText, Popularimeter, Private, Chapter, UserUrl);
