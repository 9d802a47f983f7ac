use crate::script::Kind;

/// Result of the Myers diff function
pub type Diff<T> = Vec<Edit<T>>;

/// One step of a Myers edit path over single items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit<T> {
    Insert(T),
    Delete(T),
    Equal(T),
}

impl<T> Edit<T> {
    pub fn kind(&self) -> Kind {
        match self {
            Edit::Insert(_) => Kind::Insert,
            Edit::Delete(_) => Kind::Delete,
            Edit::Equal(_) => Kind::Equal,
        }
    }

    pub fn into_parts(self) -> (Kind, T) {
        match self {
            Edit::Insert(el) => (Kind::Insert, el),
            Edit::Delete(el) => (Kind::Delete, el),
            Edit::Equal(el) => (Kind::Equal, el),
        }
    }
}
