// crates/domain/src/tokenizer.rs

/// Word separators: space, tab, LF, CR, FF, VT and NUL.
const SEPARATORS: [bool; 256] = {
    let mut table = [false; 256];
    table[b' ' as usize] = true;
    table[b'\t' as usize] = true;
    table[b'\n' as usize] = true;
    table[b'\r' as usize] = true;
    table[0x0c] = true;
    table[0x0b] = true;
    table[0] = true;
    table
};

#[inline]
pub const fn is_separator(b: u8) -> bool {
    SEPARATORS[b as usize]
}

/// Iterator over the maximal runs of non-separator bytes of a line.
#[derive(Debug, Clone)]
pub struct Words<'a> {
    rest: &'a [u8],
}

pub fn words(line: &[u8]) -> Words<'_> {
    Words { rest: line }
}

impl<'a> Iterator for Words<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.rest.iter().position(|&b| !is_separator(b))?;
        let rest = &self.rest[start..];
        let len = rest.iter().position(|&b| is_separator(b)).unwrap_or(rest.len());
        let (word, tail) = rest.split_at(len);
        self.rest = tail;
        Some(word)
    }
}
