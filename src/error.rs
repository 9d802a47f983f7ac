use thiserror::Error;

use crate::script::Side;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The edit script does not rebuild the text it claims to describe.
    #[error("edit script does not reconstruct the {side} text: expected {expected:?}, found {found:?}")]
    ScriptMismatch {
        side: Side,
        expected: String,
        found: String,
    },

    #[error("failed to write rendered output: {0}")]
    Render(#[from] std::fmt::Error),
}
