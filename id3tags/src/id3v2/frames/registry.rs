//! Frame identifier tables.
//!
//! Every frame this crate understands has one entry here, mapping a readable alias like
//! `title` to its frame ID in each ID3v2 revision. ID3v2.3 and ID3v2.4 share identifiers.

use crate::id3v2::Version;

/// How the body of a frame is laid out.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FrameKind {
    /// An encoding byte followed by text.
    Text,
    /// A bare Latin1 URL.
    Url,
    /// A frame with its own binary layout.
    Special(SpecialKind),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SpecialKind {
    Picture,
    Comment,
    Lyrics,
    UserText,
    Popularimeter,
    Private,
    Chapter,
    UserUrl,
}

#[derive(Debug)]
pub struct FrameSpec {
    pub alias: &'static str,
    /// The identifier used by ID3v2.3 and ID3v2.4, and the one that is always written.
    pub id: &'static str,
    /// The identifier used by ID3v2.2, if the frame existed in that revision.
    pub v22_id: Option<&'static str>,
    pub kind: FrameKind,
    /// Whether a tag can hold more than one of this frame.
    pub multiple: bool,
}

impl FrameSpec {
    pub fn id_for(&self, version: Version) -> Option<&'static str> {
        match version {
            Version::V22 => self.v22_id,
            Version::V23 | Version::V24 => Some(self.id),
        }
    }
}

macro_rules! frame_specs {
    ($($alias:literal => $id:literal, $v22:expr, $kind:expr, $multiple:literal;)*) => {
        &[$(FrameSpec {
            alias: $alias,
            id: $id,
            v22_id: $v22,
            kind: $kind,
            multiple: $multiple,
        },)*]
    };
}

use FrameKind::{Special, Text, Url};

static FRAMES: &[FrameSpec] = frame_specs! {
    "album" => "TALB", Some("TAL"), Text, false;
    "bpm" => "TBPM", Some("TBP"), Text, false;
    "composer" => "TCOM", Some("TCM"), Text, false;
    "genre" => "TCON", Some("TCO"), Text, false;
    "copyright" => "TCOP", Some("TCR"), Text, false;
    "date" => "TDAT", Some("TDA"), Text, false;
    "playlistDelay" => "TDLY", Some("TDY"), Text, false;
    "encodedBy" => "TENC", Some("TEN"), Text, false;
    "textWriter" => "TEXT", Some("TXT"), Text, false;
    "fileType" => "TFLT", Some("TFT"), Text, false;
    "time" => "TIME", Some("TIM"), Text, false;
    "contentGroup" => "TIT1", Some("TT1"), Text, false;
    "title" => "TIT2", Some("TT2"), Text, false;
    "subtitle" => "TIT3", Some("TT3"), Text, false;
    "initialKey" => "TKEY", Some("TKE"), Text, false;
    "language" => "TLAN", Some("TLA"), Text, false;
    "length" => "TLEN", Some("TLE"), Text, false;
    "mediaType" => "TMED", Some("TMT"), Text, false;
    "originalTitle" => "TOAL", Some("TOT"), Text, false;
    "originalFilename" => "TOFN", Some("TOF"), Text, false;
    "originalTextwriter" => "TOLY", Some("TOL"), Text, false;
    "originalArtist" => "TOPE", Some("TOA"), Text, false;
    "originalYear" => "TORY", Some("TOR"), Text, false;
    "fileOwner" => "TOWN", None, Text, false;
    "artist" => "TPE1", Some("TP1"), Text, false;
    "performerInfo" => "TPE2", Some("TP2"), Text, false;
    "conductor" => "TPE3", Some("TP3"), Text, false;
    "remixArtist" => "TPE4", Some("TP4"), Text, false;
    "partOfSet" => "TPOS", Some("TPA"), Text, false;
    "publisher" => "TPUB", Some("TPB"), Text, false;
    "trackNumber" => "TRCK", Some("TRK"), Text, false;
    "recordingDates" => "TRDA", Some("TRD"), Text, false;
    "internetRadioName" => "TRSN", None, Text, false;
    "internetRadioOwner" => "TRSO", None, Text, false;
    "size" => "TSIZ", Some("TSI"), Text, false;
    "ISRC" => "TSRC", Some("TRC"), Text, false;
    "encodingTechnology" => "TSSE", Some("TSS"), Text, false;
    "year" => "TYER", Some("TYE"), Text, false;

    "commercialUrl" => "WCOM", Some("WCM"), Url, true;
    "copyrightUrl" => "WCOP", Some("WCP"), Url, false;
    "fileUrl" => "WOAF", Some("WAF"), Url, false;
    "artistUrl" => "WOAR", Some("WAR"), Url, true;
    "audioSourceUrl" => "WOAS", Some("WAS"), Url, false;
    "radioStationUrl" => "WORS", None, Url, false;
    "paymentUrl" => "WPAY", None, Url, false;
    "publisherUrl" => "WPUB", Some("WPB"), Url, false;

    "comment" => "COMM", Some("COM"), Special(SpecialKind::Comment), false;
    "image" => "APIC", Some("PIC"), Special(SpecialKind::Picture), false;
    "unsynchronisedLyrics" => "USLT", Some("ULT"), Special(SpecialKind::Lyrics), false;
    "userDefinedText" => "TXXX", Some("TXX"), Special(SpecialKind::UserText), true;
    "popularimeter" => "POPM", Some("POP"), Special(SpecialKind::Popularimeter), false;
    "private" => "PRIV", None, Special(SpecialKind::Private), true;
    "chapter" => "CHAP", None, Special(SpecialKind::Chapter), true;
    "userDefinedUrl" => "WXXX", Some("WXX"), Special(SpecialKind::UserUrl), true;
};

/// Finds the frame with the given alias.
pub fn by_alias(alias: &str) -> Option<&'static FrameSpec> {
    FRAMES.iter().find(|spec| spec.alias == alias)
}

/// Finds the frame with the given on-disk identifier in a particular revision.
pub fn by_id(id: &str, version: Version) -> Option<&'static FrameSpec> {
    FRAMES.iter().find(|spec| spec.id_for(version) == Some(id))
}

/// Resolves a key from a tag map, which may either be an alias or a frame ID. Aliases take
/// precedence, and ID3v2.2 identifiers are accepted as well.
pub fn resolve(key: &str) -> Option<&'static FrameSpec> {
    by_alias(key)
        .or_else(|| by_id(key, Version::V23))
        .or_else(|| by_id(key, Version::V22))
}

/// Finds the frame with the given identifier and decides how its body is laid out.
/// Identifiers starting with `T` or `W` are text and URL frames, except for the
/// user-defined frames of that revision.
pub fn classify(id: &str, version: Version) -> Option<(&'static FrameSpec, FrameKind)> {
    let spec = by_id(id, version)?;

    let user_defined = |kind| {
        FRAMES
            .iter()
            .find(|spec| spec.kind == Special(kind))
            .and_then(|spec| spec.id_for(version))
    };

    let kind = if id.starts_with('T') && Some(id) != user_defined(SpecialKind::UserText) {
        Text
    } else if id.starts_with('W') && Some(id) != user_defined(SpecialKind::UserUrl) {
        Url
    } else {
        spec.kind
    };

    Some((spec, kind))
}
