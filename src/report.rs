/*!
Error printer used as the return type of `main`.

Prints the top-level error followed by its `source()` chain, which is far
more readable than the default `Debug` output of a snafu enum.
*/

use std::error::Error as StdError;

pub struct Report(Box<dyn StdError>);

impl Report {
    /// Iterates over the errors that caused the reported one, outermost first.
    fn causes(&self) -> impl Iterator<Item = &(dyn StdError + 'static)> {
        std::iter::successors(self.0.source(), |&e| e.source())
    }
}

impl std::fmt::Debug for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.0)?;

        let mut causes = self.causes().enumerate().peekable();
        if causes.peek().is_some() {
            writeln!(f, "\nCaused by:")?;
            for (i, e) in causes {
                writeln!(f, "  {}: {}", i, e)?;
            }
        }

        Ok(())
    }
}

impl<E: Into<Box<dyn StdError>>> From<E> for Report {
    fn from(e: E) -> Self {
        Report(e.into())
    }
}
