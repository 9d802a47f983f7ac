pub mod types;
pub use types::*;

use crate::script::{EditScript, Kind, Segment};

/// Furthest reaching x per diagonal `k`, indexed from `-max..=max`.
#[derive(Clone)]
struct Frontier {
    reach: Vec<usize>,
    offset: isize,
}

impl Frontier {
    fn new(max: usize) -> Self {
        Frontier {
            reach: vec![0; 2 * max + 1],
            offset: max as isize,
        }
    }

    fn get(&self, k: isize) -> usize {
        self.reach[(k + self.offset) as usize]
    }

    fn set(&mut self, k: isize, x: usize) {
        self.reach[(k + self.offset) as usize] = x;
    }
}

/// Character level diff of two strings, coalesced into an edit script where
/// no two neighbouring segments share a kind.
///
/// # Examples
///
/// ```
/// use sidebyside::myers::diff_chars;
/// use sidebyside::script::Segment;
///
/// assert_eq!(
///     diff_chars("bar", "baz"),
///     vec![Segment::equal("ba"), Segment::insert("z"), Segment::delete("r")]
/// );
/// ```
pub fn diff_chars(old: &str, new: &str) -> EditScript {
    let old: Vec<char> = old.chars().collect();
    let new: Vec<char> = new.chars().collect();
    diff(&old, &new)
        .into_iter()
        .fold(Vec::new(), |mut script: EditScript, edit| {
            let (kind, ch) = edit.into_parts();
            match script.last_mut() {
                Some(last) if last.kind == kind => last.text.push(ch),
                _ => script.push(Segment::new(kind, ch.to_string())),
            }
            script
        })
}

/// Inputs whose combined length is at most this are solved with a full search
/// trace. Larger ones are first split around a middle snake, which keeps memory
/// linear in the input length.
const TRACE_LIMIT: usize = 256;

/// Computes the diff between two sequences using the Myers algorithm.
///
/// Where a substitution happens the insertion is listed before the deletion.
///
/// # Examples
///
/// ```
/// use sidebyside::myers::{diff, Edit};
///
/// let old = vec![1, 2, 3];
/// let new = vec![1, 3, 4];
/// let result = diff(&old, &new);
/// assert_eq!(result, vec![
///     Edit::Equal(1),
///     Edit::Delete(2),
///     Edit::Equal(3),
///     Edit::Insert(4),
/// ]);
/// ```
pub fn diff<T: Eq + Clone>(old: &[T], new: &[T]) -> Diff<T> {
    diff_with_limit(old, new, TRACE_LIMIT)
}

fn diff_with_limit<T: Eq + Clone>(old: &[T], new: &[T], limit: usize) -> Diff<T> {
    let mut edits = Vec::with_capacity(old.len().max(new.len()));
    conquer(old, new, limit, &mut edits);
    inserts_first(&mut edits);
    edits
}

fn conquer<T: Eq + Clone>(old: &[T], new: &[T], limit: usize, edits: &mut Diff<T>) {
    if old.is_empty() {
        edits.extend(new.iter().cloned().map(Edit::Insert));
        return;
    }
    if new.is_empty() {
        edits.extend(old.iter().cloned().map(Edit::Delete));
        return;
    }
    if old.len() + new.len() <= limit {
        let trace = search(old, new);
        edits.extend(backtrack(old, new, &trace));
        return;
    }

    let prefix = old.iter().zip(new).take_while(|(a, b)| a == b).count();
    let suffix = old[prefix..]
        .iter()
        .rev()
        .zip(new[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();
    let old_mid = &old[prefix..old.len() - suffix];
    let new_mid = &new[prefix..new.len() - suffix];

    edits.extend(old[..prefix].iter().cloned().map(Edit::Equal));
    match middle_snake(old_mid, new_mid) {
        Some((x, y)) => {
            conquer(&old_mid[..x], &new_mid[..y], limit, edits);
            conquer(&old_mid[x..], &new_mid[y..], limit, edits);
        }
        None if old_mid.is_empty() || new_mid.is_empty() => {
            conquer(old_mid, new_mid, limit, edits)
        }
        None => edits.extend(backtrack(old_mid, new_mid, &search(old_mid, new_mid))),
    }
    edits.extend(old[old.len() - suffix..].iter().cloned().map(Edit::Equal));
}

/// Finds a point on an optimal edit path that splits its edits in half by
/// running the search from both ends until the two frontiers overlap.
///
/// Both inputs must be non-empty and differ in their first and in their last
/// item, so the point found always lies strictly inside the edit graph.
fn middle_snake<T: Eq>(old: &[T], new: &[T]) -> Option<(usize, usize)> {
    if old.is_empty() || new.is_empty() {
        return None;
    }
    let n = old.len() as isize;
    let m = new.len() as isize;
    let delta = n - m;
    let odd = delta & 1 == 1;
    let max = (n + m + 1) / 2;
    let mut forward = Frontier::new(max as usize + 1);
    // reach along each diagonal counted back from the end of both inputs
    let mut backward = Frontier::new(max as usize + 1);

    for d in 0..=max {
        for k in (-d..=d).step_by(2) {
            let start = if k == -d || (k != d && forward.get(k - 1) < forward.get(k + 1)) {
                forward.get(k + 1)
            } else {
                forward.get(k - 1) + 1
            };
            let start = start as isize;
            let (mut x, mut y) = (start, start - k);
            while x < n && y >= 0 && y < m && old[x as usize] == new[y as usize] {
                x += 1;
                y += 1;
            }
            forward.set(k, x as usize);
            let mirror = delta - k;
            if odd && mirror.abs() < d && x + backward.get(mirror) as isize >= n {
                return Some((start as usize, (start - k) as usize));
            }
        }
        for k in (-d..=d).step_by(2) {
            let start = if k == -d || (k != d && backward.get(k - 1) < backward.get(k + 1)) {
                backward.get(k + 1)
            } else {
                backward.get(k - 1) + 1
            };
            let start = start as isize;
            let (mut x, mut y) = (start, start - k);
            while x < n
                && y >= 0
                && y < m
                && old[(n - 1 - x) as usize] == new[(m - 1 - y) as usize]
            {
                x += 1;
                y += 1;
            }
            backward.set(k, x as usize);
            let mirror = delta - k;
            if !odd && mirror.abs() <= d && x + forward.get(mirror) as isize >= n {
                return Some(((n - x) as usize, (m - y) as usize));
            }
        }
    }
    None
}

/// Greedy forward search recording the frontier after every step.
fn search<T: Eq>(old: &[T], new: &[T]) -> Vec<Frontier> {
    let n = old.len();
    let m = new.len();
    let max = n + m;
    let mut frontier = Frontier::new(max);
    let mut trace: Vec<Frontier> = Vec::new();
    for d in 0..=max as isize {
        for k in (-d..=d).step_by(2) {
            let mut x = if k == -d {
                frontier.get(k + 1)
            } else if k == d {
                frontier.get(k - 1) + 1
            } else {
                frontier.get(k + 1).max(frontier.get(k - 1) + 1)
            };
            let mut y = (x as isize - k) as usize;
            while x < n && y < m && old[x] == new[y] {
                x += 1;
                y += 1;
            }
            frontier.set(k, x);
            if x >= n && y >= m {
                trace.push(frontier);
                return trace;
            }
        }
        trace.push(frontier.clone());
    }
    trace
}

/// Lists the insertions of every changed run ahead of its deletions.
fn inserts_first<T>(edits: &mut Diff<T>) {
    let mut start = 0;
    while start < edits.len() {
        if edits[start].kind() == Kind::Equal {
            start += 1;
            continue;
        }
        let end = edits[start..]
            .iter()
            .position(|edit| edit.kind() == Kind::Equal)
            .map_or(edits.len(), |len| start + len);
        edits[start..end].sort_by_key(|edit| edit.kind() == Kind::Delete);
        start = end;
    }
}

fn backtrack<T: Eq + Clone>(old: &[T], new: &[T], trace: &[Frontier]) -> Diff<T> {
    let mut x = old.len();
    let mut y = new.len();
    let mut edits: Diff<T> = Vec::new();
    for (d, frontier) in trace.iter().enumerate().skip(1).rev() {
        let d = d as isize;
        let k = x as isize - y as isize;
        let prev_k = if k == -d {
            k + 1
        } else if k == d || frontier.get(k - 1) + 1 >= frontier.get(k + 1) {
            k - 1
        } else {
            k + 1
        };
        let prev_x = frontier.get(prev_k);
        let prev_y = (prev_x as isize - prev_k) as usize;
        while x > prev_x && y > prev_y {
            edits.push(Edit::Equal(old[x - 1].clone()));
            x -= 1;
            y -= 1;
        }
        if prev_k == k - 1 {
            edits.push(Edit::Delete(old[x - 1].clone()));
        } else {
            edits.push(Edit::Insert(new[y - 1].clone()));
        }
        x = prev_x;
        y = prev_y;
    }
    // d = 0 is a single snake from the origin
    while x > 0 && y > 0 {
        edits.push(Edit::Equal(old[x - 1].clone()));
        x -= 1;
        y -= 1;
    }

    edits.reverse();
    edits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::reconstruct;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_length_invariant(old: Vec<u8>, new: Vec<u8>) {
            let result = diff(&old, &new);
            let count = |kind: Kind| result.iter().filter(|e| e.kind() == kind).count();
            prop_assert_eq!(old.len(), count(Kind::Delete) + count(Kind::Equal));
            prop_assert_eq!(new.len(), count(Kind::Insert) + count(Kind::Equal));
        }

        #[test]
        fn test_split_search_is_minimal(old in "[abc]{0,40}", new in "[abc]{0,40}") {
            let old: Vec<char> = old.chars().collect();
            let new: Vec<char> = new.chars().collect();
            let edits = |diff: &Diff<char>| diff.iter().filter(|e| e.kind() != Kind::Equal).count();
            let traced = diff_with_limit(&old, &new, usize::MAX);
            let split = diff_with_limit(&old, &new, 0);

            prop_assert_eq!(edits(&split), edits(&traced));
            let side = |skip: Kind| -> Vec<char> {
                split.iter().filter(|e| e.kind() != skip).map(|e| e.clone().into_parts().1).collect()
            };
            prop_assert_eq!(side(Kind::Insert), old);
            prop_assert_eq!(side(Kind::Delete), new);
        }

        #[test]
        fn test_chars_reconstruct(old in "[a-c\n]{0,24}", new in "[a-c\n]{0,24}") {
            let script = diff_chars(&old, &new);
            prop_assert_eq!(reconstruct(&script), (old, new));
        }

        #[test]
        fn test_chars_coalesced(old in "[ab\n]{0,16}", new in "[ab\n]{0,16}") {
            let script = diff_chars(&old, &new);
            prop_assert!(script.windows(2).all(|w| w[0].kind != w[1].kind));
            prop_assert!(script.iter().all(|s| !s.text.is_empty()));
        }

        #[test]
        fn test_chars_identical(text in "\\PC{0,32}") {
            let script = diff_chars(&text, &text);
            if text.is_empty() {
                prop_assert!(script.is_empty());
            } else {
                prop_assert_eq!(script, vec![Segment::equal(text.clone())]);
            }
        }
    }

    #[test]
    fn test_simple_diff() {
        let old = vec!["a", "b", "c"];
        let new = vec!["a", "x", "c"];
        let result = diff(&old, &new);
        assert_eq!(
            result,
            [
                Edit::Equal("a"),
                Edit::Insert("x"),
                Edit::Delete("b"),
                Edit::Equal("c")
            ]
        );
    }

    #[test]
    fn test_duplicates() {
        let old = vec!["a", "a", "b"];
        let new = vec!["a", "b", "b"];
        let result = diff(&old, &new);
        assert_eq!(
            result,
            vec![
                Edit::Equal("a"),
                Edit::Delete("a"),
                Edit::Equal("b"),
                Edit::Insert("b")
            ]
        );
    }

    #[test]
    fn test_chars_substitution_across_lines() {
        assert_eq!(
            diff_chars("foo\nbar\n", "foo\nbaz\n"),
            vec![
                Segment::equal("foo\nba"),
                Segment::insert("z"),
                Segment::delete("r"),
                Segment::equal("\n"),
            ]
        );
    }

    #[test]
    fn test_chars_one_side_empty() {
        assert_eq!(diff_chars("", "a\nb"), vec![Segment::insert("a\nb")]);
        assert_eq!(diff_chars("a\nb", ""), vec![Segment::delete("a\nb")]);
        assert!(diff_chars("", "").is_empty());
    }

    #[test]
    fn test_large_disjoint_inputs() {
        let old = "a".repeat(3000);
        let new = "b".repeat(3000);
        assert_eq!(
            diff_chars(&old, &new),
            vec![Segment::insert(new.clone()), Segment::delete(old.clone())]
        );
    }

    #[test]
    fn test_large_inputs_with_one_change() {
        let old = format!("{}a{}", "x".repeat(2000), "y".repeat(2000));
        let new = format!("{}b{}", "x".repeat(2000), "y".repeat(2000));
        assert_eq!(
            diff_chars(&old, &new),
            vec![
                Segment::equal("x".repeat(2000)),
                Segment::insert("b"),
                Segment::delete("a"),
                Segment::equal("y".repeat(2000)),
            ]
        );
    }

    #[test]
    fn test_large_inputs_reconstruct() {
        let old: String = (0..600).map(|i| format!("row {} {}\n", i, i % 7)).collect();
        let new: String = (0..600).map(|i| format!("row {} {}\n", i, i % 5)).collect();
        let script = diff_chars(&old, &new);
        assert_eq!(reconstruct(&script), (old, new));
    }

    #[test]
    fn test_chars_multibyte() {
        assert_eq!(
            diff_chars("café", "cafe"),
            vec![
                Segment::equal("caf"),
                Segment::insert("e"),
                Segment::delete("é")
            ]
        );
    }
}
