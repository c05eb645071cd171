//! Layout direction hints for relation arrows.

use std::fmt;

use serde::Deserialize;

/// A direction token attached to a relation arrow.
///
/// The external renderer understands `L`, `R`, `U` and `D`. Other tokens are
/// carried through untouched so the document author can use renderer
/// extensions this crate does not know about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct Direction(String);

impl Direction {
    /// Token used when no layout entry applies to a relation.
    pub const DEFAULT_TOKEN: &'static str = "D";

    /// Creates a direction from a raw token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if every character of the token is one of `L`, `R`, `U`, `D`.
    pub fn is_recognized(&self) -> bool {
        !self.0.is_empty() && self.0.chars().all(|c| matches!(c, 'L' | 'R' | 'U' | 'D'))
    }

    /// Returns the opposite direction.
    ///
    /// Reversal swaps `L` with `R` and `U` with `D` character by character;
    /// every other character is kept, so `reversed` is its own inverse.
    ///
    /// # Examples
    ///
    /// ```
    /// use archup_core::semantic::Direction;
    ///
    /// assert_eq!(Direction::new("L").reversed(), Direction::new("R"));
    /// assert_eq!(Direction::new("-U->").reversed(), Direction::new("-D->"));
    /// assert_eq!(Direction::new("X").reversed(), Direction::new("X"));
    /// ```
    pub fn reversed(&self) -> Self {
        let token = self
            .0
            .chars()
            .map(|c| match c {
                'L' => 'R',
                'R' => 'L',
                'U' => 'D',
                'D' => 'U',
                other => other,
            })
            .collect();
        Self(token)
    }
}

impl Default for Direction {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TOKEN)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Direction {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}
