//! Side-by-side diffs with line alignment and character level highlighting.
//!
//! An [`script::Engine`] turns two texts into an edit script, the
//! [`align::LineAligner`] folds that script into left/right line pairs and the
//! [`align::LineNumberer`] numbers them. [`render`] turns the rows into HTML
//! and [`table`] applies the whole pipeline to spreadsheet records.

pub mod align;
mod calculator;
pub mod error;
pub mod myers;
pub mod render;
pub mod script;
pub mod table;

pub use align::{AlignedPair, Element, Holder, LineChange};
pub use calculator::{diff, line_changes, Calculator, LineChanges};
pub use error::{Error, Result};
pub use script::{Kind, Segment};
