mod compare;


use crate::types::{Float64, Timestamp};
use std::borrow::Cow;
use ulid::Ulid;

// re-exports
pub use compare::canonical_cmp;

///
/// TextMode
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TextMode {
    Cs, // case-sensitive
    Ci, // case-insensitive
}

///
/// ValueEnum
///
/// A closed-enum field value. `rank` is the declaration position of the
/// variant, so ordering follows workflow order rather than spelling.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ValueEnum {
    pub variant: String,
    pub rank: u32,
}

impl ValueEnum {
    #[must_use]
    pub fn new(variant: impl Into<String>, rank: u32) -> Self {
        Self {
            variant: variant.into(),
            rank,
        }
    }
}

///
/// Value
///
/// Runtime representation of a single field or filter literal.
/// `Null` is a present field whose content is absent (no assignee,
/// no due date, ...).
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Value {
    Bool(bool),
    Enum(ValueEnum),
    Float64(Float64),
    Int(i64),
    List(Vec<Self>),
    Null,
    Text(String),
    Timestamp(Timestamp),
    Uint(u64),
    Ulid(Ulid),
}

impl Value {
    ///
    /// CONSTRUCTION
    ///

    /// Build a `Value::List` from any iterator of field values.
    pub fn from_list<T: crate::traits::FieldValue>(items: impl IntoIterator<Item = T>) -> Self {
        Self::List(items.into_iter().map(|item| item.to_value()).collect())
    }

    ///
    /// TYPES
    ///

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_text(&self) -> Option<&str> {
        if let Self::Text(s) = self {
            Some(s.as_str())
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_list(&self) -> Option<&[Self]> {
        if let Self::List(xs) = self {
            Some(xs.as_slice())
        } else {
            None
        }
    }

    ///
    /// TEXT COMPARISON
    ///

    fn fold_ci(s: &str) -> Cow<'_, str> {
        if s.is_ascii() {
            return Cow::Owned(s.to_ascii_lowercase());
        }
        // NOTE: Unicode fallback uses simple lowercasing, not full casefolding.
        Cow::Owned(s.to_lowercase())
    }

    fn text_with_mode(s: &str, mode: TextMode) -> Cow<'_, str> {
        match mode {
            TextMode::Cs => Cow::Borrowed(s),
            TextMode::Ci => Self::fold_ci(s),
        }
    }

    fn text_op(
        &self,
        other: &Self,
        mode: TextMode,
        f: impl Fn(&str, &str) -> bool,
    ) -> Option<bool> {
        let (a, b) = (self.as_text()?, other.as_text()?);
        let a = Self::text_with_mode(a, mode);
        let b = Self::text_with_mode(b, mode);
        Some(f(&a, &b))
    }

    #[must_use]
    /// Case-sensitive/insensitive equality check for text values.
    pub fn text_eq(&self, other: &Self, mode: TextMode) -> Option<bool> {
        self.text_op(other, mode, |a, b| a == b)
    }

    #[must_use]
    /// Check whether `needle` is a substring of `self` under the given text mode.
    /// Returns `None` when either side is not text.
    pub fn text_contains(&self, needle: &Self, mode: TextMode) -> Option<bool> {
        self.text_op(needle, mode, |a, b| a.contains(b))
    }

    ///
    /// MEMBERSHIP
    ///

    #[must_use]
    /// Check whether `self` equals any element of `haystack`.
    /// Returns `None` when `haystack` is not a list.
    pub fn in_list(&self, haystack: &Self) -> Option<bool> {
        haystack.as_list().map(|items| items.iter().any(|h| h == self))
    }

    #[must_use]
    /// Check whether any element of `self` appears in `needles`.
    /// Returns `None` when either side is not a list.
    pub fn any_in(&self, needles: &Self) -> Option<bool> {
        let (items, needles) = (self.as_list()?, needles.as_list()?);

        Some(items.iter().any(|item| needles.contains(item)))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Timestamp> for Value {
    fn from(v: Timestamp) -> Self {
        Self::Timestamp(v)
    }
}
