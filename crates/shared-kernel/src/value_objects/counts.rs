// crates/shared-kernel/src/value_objects/counts.rs
use serde::{Deserialize, Serialize};

/// Number of times a dictionary word has been seen in the input texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Occurrences(u32);

impl Occurrences {
    pub const ZERO: Self = Self(0);

    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// One more occurrence, or `None` when the counter is saturated.
    #[inline]
    pub const fn checked_increment(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl Default for Occurrences {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<u32> for Occurrences {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

/// Number of words seen across all input texts, dictionary words or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordTotal(u64);

impl WordTotal {
    pub const ZERO: Self = Self(0);

    #[inline]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn checked_add(self, words: u64) -> Option<Self> {
        match self.0.checked_add(words) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    #[inline]
    pub const fn checked_add_total(self, other: Self) -> Option<Self> {
        self.checked_add(other.0)
    }
}

impl Default for WordTotal {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<u64> for WordTotal {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

mod display {
    use std::fmt;

    use super::{Occurrences, WordTotal};

    impl fmt::Display for Occurrences {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.value())
        }
    }

    impl fmt::Display for WordTotal {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.value())
        }
    }
}
