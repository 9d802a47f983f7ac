mod types;
pub use types::*;

use crate::error::{Error, Result};
use crate::myers;

/// Produces character level edit scripts. Anything satisfying the
/// reconstruction contract works, at any segment granularity.
pub trait Engine: Sync {
    fn edit_script(&self, old: &str, new: &str) -> EditScript;
}

/// Reference engine backed by [`myers::diff_chars`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Myers;

impl Engine for Myers {
    fn edit_script(&self, old: &str, new: &str) -> EditScript {
        myers::diff_chars(old, new)
    }
}

/// Rebuilds `(old, new)` from an edit script.
pub fn reconstruct(script: &[Segment]) -> (String, String) {
    let mut old = String::new();
    let mut new = String::new();
    for segment in script {
        match segment.kind {
            Kind::Equal => {
                old.push_str(&segment.text);
                new.push_str(&segment.text);
            }
            Kind::Delete => old.push_str(&segment.text),
            Kind::Insert => new.push_str(&segment.text),
        }
    }
    (old, new)
}

/// Checks that `script` rebuilds exactly `old` and `new`.
pub fn validate(old: &str, new: &str, script: &[Segment]) -> Result<()> {
    let (found_old, found_new) = reconstruct(script);
    if found_old != old {
        return Err(Error::ScriptMismatch {
            side: Side::Left,
            expected: old.to_string(),
            found: found_old,
        });
    }
    if found_new != new {
        return Err(Error::ScriptMismatch {
            side: Side::Right,
            expected: new.to_string(),
            found: found_new,
        });
    }
    Ok(())
}

/// Drops empty segments and merges neighbours of the same kind.
pub fn normalize<I>(script: I) -> EditScript
where
    I: IntoIterator<Item = Segment>,
{
    let mut result: EditScript = Vec::new();
    for segment in script.into_iter().filter(|s| !s.text.is_empty()) {
        match result.last_mut() {
            Some(last) if last.kind == segment.kind => last.text.push_str(&segment.text),
            _ => result.push(segment),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconstruct() {
        let script = vec![
            Segment::equal("foo\nba"),
            Segment::insert("z"),
            Segment::delete("r"),
            Segment::equal("\n"),
        ];
        assert_eq!(
            reconstruct(&script),
            ("foo\nbar\n".to_string(), "foo\nbaz\n".to_string())
        );
    }

    #[test]
    fn test_validate_accepts_matching_script() {
        let script = Myers.edit_script("a\nb", "a\nc");
        assert!(validate("a\nb", "a\nc", &script).is_ok());
    }

    #[test]
    fn test_validate_reports_side() {
        let script = vec![Segment::equal("a"), Segment::insert("b")];
        match validate("a", "ac", &script) {
            Err(Error::ScriptMismatch {
                side,
                expected,
                found,
            }) => {
                assert_eq!(side, Side::Right);
                assert_eq!(expected, "ac");
                assert_eq!(found, "ab");
            }
            other => panic!("unexpected result: {:?}", other),
        }

        let script = vec![Segment::delete("x")];
        assert!(matches!(
            validate("y", "", &script),
            Err(Error::ScriptMismatch {
                side: Side::Left,
                ..
            })
        ));
    }

    #[test]
    fn test_normalize() {
        let script = vec![
            Segment::equal("a"),
            Segment::equal(""),
            Segment::equal("b"),
            Segment::insert(""),
            Segment::delete("c"),
            Segment::delete("d"),
            Segment::insert("e"),
        ];
        assert_eq!(
            normalize(script),
            vec![
                Segment::equal("ab"),
                Segment::delete("cd"),
                Segment::insert("e")
            ]
        );
        assert!(normalize(vec![Segment::insert("")]).is_empty());
    }
}
