use crate::align::{LineAligner, LineNumberer};
use crate::script::{Engine, Myers, Segment};

/// Lazy stream of numbered side-by-side rows.
pub type LineChanges = LineNumberer<LineAligner<std::vec::IntoIter<Segment>>>;

/// Runs an [`Engine`] and feeds its edit script through the line aligner.
#[derive(Debug, Clone, Default)]
pub struct Calculator<E = Myers> {
    engine: E,
}

impl Calculator<Myers> {
    pub fn new() -> Self {
        Calculator { engine: Myers }
    }
}

impl<E: Engine> Calculator<E> {
    pub fn with_engine(engine: E) -> Self {
        Calculator { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn run(&self, old: &str, new: &str) -> LineChanges {
        let script = self.engine.edit_script(old, new);
        log::trace!("edit script has {} segment(s)", script.len());
        line_changes(script)
    }
}

/// Aligns and numbers an edit script produced elsewhere.
pub fn line_changes<I>(script: I) -> LineNumberer<LineAligner<I::IntoIter>>
where
    I: IntoIterator<Item = Segment>,
{
    LineNumberer::new(LineAligner::new(script))
}

/// Side-by-side diff of two texts using the character level Myers engine.
///
/// ```
/// let rows: Vec<_> = sidebyside::diff("foo\nbar\n", "foo\nbaz\n").collect();
/// assert_eq!(rows.len(), 2);
/// assert!(!rows[0].changed);
/// assert!(rows[1].changed);
/// assert_eq!((rows[1].left_no, rows[1].right_no), (Some(2), Some(2)));
/// ```
pub fn diff(old: &str, new: &str) -> LineChanges {
    Calculator::new().run(old, new)
}
