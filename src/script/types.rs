use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered list of segments describing how `old` turns into `new`.
pub type EditScript = Vec<Segment>;

/// What a span of text does between the two versions:
/// present in both (Equal)
/// only in the new text (Insert)
/// only in the old text (Delete)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    #[default]
    Equal,
    Insert,
    Delete,
}

impl Kind {
    pub fn is_changed(self) -> bool {
        self != Kind::Equal
    }
}

/// A contiguous span of an edit script. The text may hold any number of line breaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: Kind,
    pub text: String,
}

impl Segment {
    pub fn new(kind: Kind, text: impl Into<String>) -> Self {
        Segment {
            kind,
            text: text.into(),
        }
    }

    pub fn equal(text: impl Into<String>) -> Self {
        Segment::new(Kind::Equal, text)
    }

    pub fn insert(text: impl Into<String>) -> Self {
        Segment::new(Kind::Insert, text)
    }

    pub fn delete(text: impl Into<String>) -> Self {
        Segment::new(Kind::Delete, text)
    }
}

/// One of the two texts being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "old"),
            Side::Right => write!(f, "new"),
        }
    }
}
