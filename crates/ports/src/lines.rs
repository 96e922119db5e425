// crates/ports/src/lines.rs
use word_count_shared_kernel::Result;

/// Producer of successive newline-delimited records.
///
/// Returned lines exclude the terminating `\n`. `Ok(None)` is returned once
/// the input is exhausted and no partial line remains; a trailing newline
/// does not produce an empty final record.
pub trait LineSource {
    fn next_line(&mut self) -> Result<Option<&[u8]>>;
}

impl<L: LineSource + ?Sized> LineSource for Box<L> {
    fn next_line(&mut self) -> Result<Option<&[u8]>> {
        (**self).next_line()
    }
}
