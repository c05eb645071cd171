//! Entity identifiers backed by a process-wide string interner.
//!
//! Every entity id, relation target and layout key endpoint is compared many
//! times while selecting and rendering diagrams, so ids are interned once and
//! then handled as cheap `Copy` symbols.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner shared by every [`Id`].
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Interned entity identifier.
///
/// Two ids compare equal exactly when their underlying strings are equal.
///
/// # Examples
///
/// ```
/// use archup_core::identifier::Id;
///
/// let order = Id::new("order");
/// assert_eq!(order, Id::new("order"));
/// assert_eq!(order, "order");
/// assert_eq!(order.to_string(), "order");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Interns `name` and returns its identifier.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Runs `f` against the string this id was created from.
    ///
    /// The interner lock is held while `f` runs, so `f` must not create or
    /// format other ids.
    pub fn with_str<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        let interner = interner();
        f(interner.resolve(self.0).unwrap_or_default())
    }

    /// Returns `true` if the id is the empty string.
    pub fn is_empty(&self) -> bool {
        self.with_str(str::is_empty)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.with_str(str::to_owned);
        f.write_str(&value)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<&String> for Id {
    fn from(name: &String) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.with_str(|value| value == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_interns_equal_strings() {
        let a = Id::new("customer");
        let b = Id::new("customer");
        let c = Id::new("order");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display() {
        let id = Id::new("line_item");
        assert_eq!(format!("{id}"), "line_item");
    }

    #[test]
    fn test_compare_with_str() {
        let id = Id::new("invoice");
        let other = String::from("invoice");

        assert!(id == "invoice");
        assert!(id == other.as_str());
        assert!(id != "invoices");
    }

    #[test]
    fn test_is_empty() {
        assert!(Id::new("").is_empty());
        assert!(!Id::new("x").is_empty());
    }

    #[test]
    fn test_hash_lookup() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(Id::new("k1"), 1);
        map.insert(Id::from("k2"), 2);

        assert_eq!(map.get(&Id::new("k1")), Some(&1));
        assert_eq!(map.get(&Id::new("k2")), Some(&2));
        assert_eq!(map.len(), 2);
    }
}
