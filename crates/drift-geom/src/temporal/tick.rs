// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

/// Discrete simulation tick.
///
/// The world advances in whole ticks; each call to its update counts one.
/// This newtype keeps tick counts from being confused with other integers
/// across APIs.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tick {
    index: u64,
}

impl Tick {
    /// The tick before any update has run.
    pub const ZERO: Self = Self::new(0);

    /// Creates a new tick with the given index.
    #[must_use]
    pub const fn new(index: u64) -> Self {
        Self { index }
    }

    /// Returns the tick index.
    #[must_use]
    pub const fn index(&self) -> u64 {
        self.index
    }

    /// Returns the following tick, saturating at `u64::MAX`.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self::new(self.index.saturating_add(1))
    }
}
