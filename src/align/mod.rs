mod numbering;
mod types;

pub use numbering::*;
pub use types::*;

use crate::script::{Kind, Segment};
use itertools::{EitherOrBoth, Itertools};
use std::collections::VecDeque;
use std::iter::FusedIterator;

/// Lines of each side that are still accumulating text.
struct OpenEntry {
    left: Vec<Holder>,
    right: Vec<Holder>,
}

impl OpenEntry {
    fn new() -> Self {
        OpenEntry {
            left: vec![Holder::default()],
            right: vec![Holder::default()],
        }
    }

    fn seeded(elem: Element) -> Self {
        OpenEntry {
            left: vec![Holder::with(elem.clone())],
            right: vec![Holder::with(elem)],
        }
    }
}

fn append(side: &mut Vec<Holder>, elem: Element) {
    match side.last_mut() {
        Some(holder) => holder.append(elem),
        None => side.push(Holder::with(elem)),
    }
}

/// Closes the open line of `side` and starts a new one holding `elem`.
fn break_line(side: &mut Vec<Holder>, elem: Element) {
    if let Some(holder) = side.last_mut() {
        holder.end_line();
    }
    side.push(Holder::with(elem));
}

/// Turns a stream of edit script segments into aligned left/right lines.
///
/// Pairs are produced lazily: the aligner only pulls segments until it has
/// something to hand out.
pub struct LineAligner<I> {
    segments: I,
    open: OpenEntry,
    ready: VecDeque<AlignedPair>,
    finished: bool,
}

impl<I> LineAligner<I>
where
    I: Iterator<Item = Segment>,
{
    pub fn new<S>(segments: S) -> Self
    where
        S: IntoIterator<IntoIter = I>,
    {
        LineAligner {
            segments: segments.into_iter(),
            open: OpenEntry::new(),
            ready: VecDeque::new(),
            finished: false,
        }
    }

    fn feed(&mut self, segment: Segment) {
        let mut lines = segment.text.split('\n');
        let first = lines.next().unwrap_or_default();
        match segment.kind {
            Kind::Equal => {
                let elem = Element::plain(first);
                append(&mut self.open.left, elem.clone());
                append(&mut self.open.right, elem);
            }
            Kind::Insert => append(&mut self.open.right, Element::addition(first)),
            Kind::Delete => append(&mut self.open.left, Element::deletion(first)),
        }

        let rest: Vec<&str> = lines.collect();
        let Some((last, middle)) = rest.split_last() else {
            return;
        };
        match segment.kind {
            Kind::Equal => {
                let seed = OpenEntry::seeded(Element::plain(*last));
                let mut open = std::mem::replace(&mut self.open, seed);
                for holder in open.left.last_mut().into_iter().chain(open.right.last_mut()) {
                    holder.end_line();
                }
                self.ready.extend(pair_lines(open.left, open.right));
                for line in middle {
                    let mut holder = Holder::with(Element::plain(*line));
                    holder.end_line();
                    self.ready.push_back(AlignedPair::unchanged(holder.clone(), holder));
                }
            }
            Kind::Insert => {
                for line in &rest {
                    break_line(&mut self.open.right, Element::addition(*line));
                }
            }
            Kind::Delete => {
                for line in &rest {
                    break_line(&mut self.open.left, Element::deletion(*line));
                }
            }
        }
    }

    fn finish(&mut self) {
        let OpenEntry {
            mut left,
            mut right,
        } = std::mem::replace(&mut self.open, OpenEntry::new());
        // text after a trailing line break is not a line
        for side in [&mut left, &mut right] {
            if side.last().is_some_and(Holder::has_empty_text) {
                side.pop();
            }
        }
        self.ready.extend(pair_lines(left, right));
    }
}

impl<I> Iterator for LineAligner<I>
where
    I: Iterator<Item = Segment>,
{
    type Item = AlignedPair;

    fn next(&mut self) -> Option<AlignedPair> {
        loop {
            if let Some(pair) = self.ready.pop_front() {
                return Some(pair);
            }
            if self.finished {
                return None;
            }
            match self.segments.next() {
                Some(segment) => self.feed(segment),
                None => {
                    self.finished = true;
                    self.finish();
                }
            }
        }
    }
}

impl<I> FusedIterator for LineAligner<I> where I: Iterator<Item = Segment> {}

/// Resolves buffered lines into pairs, anchoring on a shared first line, else
/// on a shared last line. Without an anchor every pair counts as changed.
pub(crate) fn pair_lines(mut ls: Vec<Holder>, mut rs: Vec<Holder>) -> Vec<AlignedPair> {
    log::trace!("pairing {} old line(s) with {} new line(s)", ls.len(), rs.len());

    let first_anchor = matches!((ls.first(), rs.first()), (Some(l), Some(r)) if l == r);
    if first_anchor {
        let mut ls = ls.into_iter();
        let mut rs = rs.into_iter();
        let mut pairs = Vec::new();
        if let (Some(l), Some(r)) = (ls.next(), rs.next()) {
            pairs.push(AlignedPair::unchanged(l, r));
        }
        pairs.extend(zip_padded(ls, rs, false));
        return pairs;
    }

    let last_anchor = matches!((ls.last(), rs.last()), (Some(l), Some(r)) if l == r);
    if last_anchor {
        if let (Some(l), Some(r)) = (ls.pop(), rs.pop()) {
            let mut pairs: Vec<AlignedPair> = zip_padded(ls, rs, false).collect();
            pairs.push(AlignedPair::unchanged(l, r));
            return pairs;
        }
    }

    zip_padded(ls, rs, true).collect()
}

fn zip_padded<L, R>(ls: L, rs: R, force_changed: bool) -> impl Iterator<Item = AlignedPair>
where
    L: IntoIterator<Item = Holder>,
    R: IntoIterator<Item = Holder>,
{
    ls.into_iter().zip_longest(rs).map(move |pair| {
        let (left, right) = match pair {
            EitherOrBoth::Both(l, r) => (l, r),
            EitherOrBoth::Left(l) => (l, Holder::default()),
            EitherOrBoth::Right(r) => (Holder::default(), r),
        };
        AlignedPair {
            changed: force_changed || left != right,
            left,
            right,
        }
    })
}
