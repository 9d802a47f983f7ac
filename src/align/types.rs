use crate::script::Kind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Atomic piece of a rendered line, tagged with what happened to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Element {
    text: String,
    kind: Kind,
}

impl Element {
    pub fn new(text: impl Into<String>, kind: Kind) -> Self {
        Element {
            text: text.into(),
            kind,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Element::new(text, Kind::Equal)
    }

    pub fn addition(text: impl Into<String>) -> Self {
        Element::new(text, Kind::Insert)
    }

    pub fn deletion(text: impl Into<String>) -> Self {
        Element::new(text, Kind::Delete)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn is_changed(&self) -> bool {
        self.kind.is_changed()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// The content of one side of one rendered line.
///
/// A holder with no elements stands for a missing line. A holder with a single
/// empty element is a blank line that exists in the text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Holder {
    elements: Vec<Element>,
    kind: Kind,
}

impl Holder {
    pub(crate) fn with(elem: Element) -> Self {
        let mut holder = Holder::default();
        holder.append(elem);
        holder
    }

    /// Adds `elem` at the end of the line.
    ///
    /// The last element absorbs `elem` when it has the same kind or when its
    /// text is empty, in which case it takes over the kind of `elem`. This is
    /// what lets an empty placeholder turn into the first real write.
    pub(crate) fn append(&mut self, elem: Element) {
        if self.kind == Kind::Equal {
            self.kind = elem.kind;
        }
        if let Some(last) = self.elements.last_mut() {
            if last.text.is_empty() || last.kind == elem.kind {
                last.text.push_str(&elem.text);
                last.kind = elem.kind;
                return;
            }
        }
        self.elements.push(elem);
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// First changed kind appended to this holder, `Kind::Equal` if none.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// True for a padding holder that stands for no line at all.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn text(&self) -> String {
        self.to_string()
    }

    /// Called when a line break closes this line. Drops the `\r` of a `\r\n`
    /// break, which may sit in an element of its own.
    pub(crate) fn end_line(&mut self) {
        let Some(pos) = self.elements.iter().rposition(|e| !e.text.is_empty()) else {
            return;
        };
        let text = &mut self.elements[pos].text;
        if !text.ends_with('\r') {
            return;
        }
        text.pop();
        if !text.is_empty() {
            return;
        }
        // the break left an empty element behind, merge what is left around it
        let elements = std::mem::take(&mut self.elements);
        let blank = elements.last().map(|e| Element::new("", e.kind));
        *self = elements.into_iter().filter(|e| !e.text.is_empty()).collect();
        if self.is_empty() {
            if let Some(blank) = blank {
                *self = Holder::with(blank);
            }
        }
    }

    pub(crate) fn has_empty_text(&self) -> bool {
        self.elements.iter().all(|e| e.text.is_empty())
    }
}

impl PartialEq for Holder {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl Eq for Holder {}

impl FromIterator<Element> for Holder {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        let mut holder = Holder::default();
        for elem in iter {
            holder.append(elem);
        }
        holder
    }
}

impl fmt::Display for Holder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for elem in &self.elements {
            f.write_str(&elem.text)?;
        }
        Ok(())
    }
}

/// A left/right line pair as decided by the aligner, before numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedPair {
    pub changed: bool,
    pub left: Holder,
    pub right: Holder,
}

impl AlignedPair {
    pub fn unchanged(left: Holder, right: Holder) -> Self {
        AlignedPair {
            changed: false,
            left,
            right,
        }
    }

    pub fn changed(left: Holder, right: Holder) -> Self {
        AlignedPair {
            changed: true,
            left,
            right,
        }
    }
}

/// One row of a side-by-side diff.
///
/// `left_no` is set iff `left` is not empty, and likewise on the right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineChange {
    pub changed: bool,
    pub left: Holder,
    pub left_no: Option<usize>,
    pub right: Holder,
    pub right_no: Option<usize>,
}
