//! Identifier management using string interning for efficient string storage and comparison
//!
//! This module provides the [`Id`] type used for every domain identifier
//! (actors, interfaces, activities, processes) and for the node and edge ids
//! of a generated diagram.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// Efficient identifier type using string interning
///
/// Domain records arrive with either numeric database keys or string keys;
/// both are interned through their decimal/string form so that `7` and `"7"`
/// name the same actor.
///
/// # Examples
///
/// ```
/// use procflow_core::identifier::Id;
///
/// let app = Id::new("billing");
/// let numeric = Id::from(42_u64);
/// assert_eq!(numeric, "42");
///
/// let node = app.with_prefix("app");
/// assert_eq!(node, "app-billing");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    ///
    /// # Arguments
    ///
    /// * `name` - The string representation of the identifier
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Creates a derived id of the form `{prefix}-{self}`.
    ///
    /// Diagram node ids are derived from domain ids this way, e.g. the top
    /// lifeline node of actor `7` is `app-7`.
    pub fn with_prefix(&self, prefix: &str) -> Self {
        with_interner(|interner| {
            let own = interner
                .resolve(self.0)
                .expect("Symbol should exist in interner");
            let derived = format!("{prefix}-{own}");
            Self(interner.get_or_intern(derived))
        })
    }

    /// Creates a derived id of the form `{self}-{suffix}`.
    pub fn with_suffix(&self, suffix: impl fmt::Display) -> Self {
        with_interner(|interner| {
            let own = interner
                .resolve(self.0)
                .expect("Symbol should exist in interner");
            let derived = format!("{own}-{suffix}");
            Self(interner.get_or_intern(derived))
        })
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                .to_string()
        });
        f.write_str(&value)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<u64> for Id {
    fn from(value: u64) -> Self {
        Self::new(&value.to_string())
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                == other
        })
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(IdVisitor)
    }
}

struct IdVisitor;

impl de::Visitor<'_> for IdVisitor {
    type Value = Id;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or non-negative integer identifier")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Id, E> {
        Ok(Id::new(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Id, E> {
        Ok(Id::from(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Id, E> {
        u64::try_from(value)
            .map(Id::from)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
    }
}
