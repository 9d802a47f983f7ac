mod html;
pub use html::*;

use crate::align::LineChange;
use crate::error::Result;

/// Visitor over a side-by-side diff. Only `visit_row` is required, the
/// wrapping hooks default to doing nothing.
pub trait Generator {
    fn begin_result(&mut self) -> Result<()> {
        Ok(())
    }

    fn end_result(&mut self) -> Result<()> {
        Ok(())
    }

    fn begin_row(&mut self, _change: &LineChange) -> Result<()> {
        Ok(())
    }

    fn end_row(&mut self, _change: &LineChange) -> Result<()> {
        Ok(())
    }

    fn visit_row(&mut self, change: &LineChange) -> Result<()>;

    fn run<I>(&mut self, changes: I) -> Result<()>
    where
        I: IntoIterator<Item = LineChange>,
        Self: Sized,
    {
        self.begin_result()?;
        for change in changes {
            self.begin_row(&change)?;
            self.visit_row(&change)?;
            self.end_row(&change)?;
        }
        self.end_result()
    }
}
