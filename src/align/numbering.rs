use crate::align::{AlignedPair, LineChange};
use std::iter::FusedIterator;

/// Attaches 1-based line numbers to aligned pairs. Each side counts only the
/// lines it actually has.
pub struct LineNumberer<I> {
    pairs: I,
    left_no: usize,
    right_no: usize,
}

impl<I> LineNumberer<I>
where
    I: Iterator<Item = AlignedPair>,
{
    pub fn new(pairs: I) -> Self {
        LineNumberer {
            pairs,
            left_no: 1,
            right_no: 1,
        }
    }
}

fn next_no(counter: &mut usize, present: bool) -> Option<usize> {
    if !present {
        return None;
    }
    let no = *counter;
    *counter += 1;
    Some(no)
}

impl<I> Iterator for LineNumberer<I>
where
    I: Iterator<Item = AlignedPair>,
{
    type Item = LineChange;

    fn next(&mut self) -> Option<LineChange> {
        let AlignedPair {
            changed,
            left,
            right,
        } = self.pairs.next()?;
        let left_no = next_no(&mut self.left_no, !left.is_empty());
        let right_no = next_no(&mut self.right_no, !right.is_empty());
        Some(LineChange {
            changed,
            left,
            left_no,
            right,
            right_no,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pairs.size_hint()
    }
}

impl<I> FusedIterator for LineNumberer<I> where I: FusedIterator<Item = AlignedPair> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::{Element, Holder};

    #[test]
    fn test_counters_advance_independently() {
        let line = |t: &str| Holder::with(Element::plain(t));
        let pairs = vec![
            AlignedPair::unchanged(line("a"), line("a")),
            AlignedPair::changed(Holder::default(), line("x")),
            AlignedPair::changed(line("y"), Holder::default()),
            AlignedPair::unchanged(line("b"), line("b")),
        ];
        let numbers: Vec<(Option<usize>, Option<usize>)> = LineNumberer::new(pairs.into_iter())
            .map(|c| (c.left_no, c.right_no))
            .collect();
        assert_eq!(
            numbers,
            vec![
                (Some(1), Some(1)),
                (None, Some(2)),
                (Some(2), None),
                (Some(3), Some(3)),
            ]
        );
    }

    #[test]
    fn test_blank_line_is_numbered() {
        let blank = Holder::with(Element::plain(""));
        let pairs = vec![AlignedPair::unchanged(blank.clone(), blank)];
        let change = LineNumberer::new(pairs.into_iter()).next();
        assert_eq!(change.map(|c| (c.left_no, c.right_no)), Some((Some(1), Some(1))));
    }
}
