//! Type-agnostic scalar values for HTTP fields.
//!
//! Every field of a message (method, target, protocol, status, reason phrase,
//! header names and values, body) is held as an [`Item`]. An item is created
//! from text, an integer or raw bytes and always normalizes to a single
//! canonical byte sequence; the type it was created from is not retained.
//!
//! # Coercion rules
//!
//! - text is stored as its UTF-8 bytes
//! - integers are stored as their base-10 ASCII rendering (`404` -> `b"404"`)
//! - raw bytes are stored verbatim
//!
//! Equality against another item or against a bare value of any of these
//! categories coerces the operand with the same rules and compares bytes, so
//! `Item::from(404) == "404"`, `== b"404"` and `== 404` all hold.
//!
//! Ordering is numeric only, see [`Item::try_cmp`].

use std::borrow::{Borrow, Cow};
use std::cmp::Ordering;
use std::fmt;

use bytes::Bytes;
use serde_json::Value;

use crate::protocol::ItemError;

/// An immutable value holder with a canonical byte representation.
///
/// Cloning is cheap, the underlying buffer is reference counted.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Item {
    raw: Bytes,
}

impl Item {
    /// Creates an empty item, which is falsy.
    #[inline]
    pub const fn empty() -> Self {
        Self { raw: Bytes::new() }
    }

    /// Creates an item from a static string without copying.
    #[inline]
    pub const fn from_static(value: &'static str) -> Self {
        Self { raw: Bytes::from_static(value.as_bytes()) }
    }

    /// Returns the canonical byte form.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Returns a cheap clone of the canonical buffer.
    #[inline]
    pub fn raw(&self) -> Bytes {
        self.raw.clone()
    }

    /// Consumes the item and returns the canonical buffer.
    #[inline]
    pub fn into_bytes(self) -> Bytes {
        self.raw
    }

    /// Returns the text form, replacing invalid UTF-8 sequences.
    pub fn as_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.raw)
    }

    /// Returns the text form, failing if the bytes are not valid UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::Encoding`] when the canonical bytes can't be decoded.
    pub fn to_str(&self) -> Result<&str, ItemError> {
        Ok(std::str::from_utf8(&self.raw)?)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// An item is falsy iff its canonical byte form is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the numeric interpretation of the item if it fits an `i64`.
    pub fn as_int(&self) -> Option<i64> {
        std::str::from_utf8(&self.raw).ok()?.parse().ok()
    }

    /// Compares two items numerically.
    ///
    /// Any base-10 integer is accepted whatever its magnitude, so
    /// `u128::MAX` orders against small values without overflow.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::NotComparable`] unless both items are numeric-valued.
    /// There is no lexical fallback.
    pub fn try_cmp(&self, other: &Item) -> Result<Ordering, ItemError> {
        match (Decimal::parse(&self.raw), Decimal::parse(&other.raw)) {
            (Some(left), Some(right)) => Ok(left.cmp(&right)),
            _ => Err(ItemError::not_comparable(self.as_text(), other.as_text())),
        }
    }
}

/// A base-10 integer of arbitrary width, borrowed from an item's bytes.
#[derive(Debug, PartialEq, Eq)]
struct Decimal<'a> {
    negative: bool,
    /// Digits without leading zeros, empty for zero.
    digits: &'a [u8],
}

impl<'a> Decimal<'a> {
    fn parse(raw: &'a [u8]) -> Option<Self> {
        let (negative, digits) = match raw {
            [b'-', rest @ ..] => (true, rest),
            [b'+', rest @ ..] => (false, rest),
            _ => (false, raw),
        };
        if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
            return None;
        }

        let start = digits.iter().position(|b| *b != b'0').unwrap_or(digits.len());
        let digits = &digits[start..];
        // -0 is zero
        Some(Decimal { negative: negative && !digits.is_empty(), digits })
    }

    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        self.digits.len().cmp(&other.digits.len()).then_with(|| self.digits.cmp(other.digits))
    }
}

impl Ord for Decimal<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, false) => self.cmp_magnitude(other),
            (true, true) => other.cmp_magnitude(self),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Decimal<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Item").field(&self.as_text()).finish()
    }
}

impl AsRef<[u8]> for Item {
    fn as_ref(&self) -> &[u8] {
        &self.raw
    }
}

impl Borrow<[u8]> for Item {
    fn borrow(&self) -> &[u8] {
        &self.raw
    }
}

impl From<Item> for Bytes {
    fn from(item: Item) -> Self {
        item.raw
    }
}

impl From<&Item> for Item {
    fn from(item: &Item) -> Self {
        item.clone()
    }
}

impl From<Bytes> for Item {
    fn from(raw: Bytes) -> Self {
        Self { raw }
    }
}

impl From<&[u8]> for Item {
    fn from(value: &[u8]) -> Self {
        Self { raw: Bytes::copy_from_slice(value) }
    }
}

impl<const N: usize> From<&[u8; N]> for Item {
    fn from(value: &[u8; N]) -> Self {
        Self { raw: Bytes::copy_from_slice(value) }
    }
}

impl From<Vec<u8>> for Item {
    fn from(value: Vec<u8>) -> Self {
        Self { raw: Bytes::from(value) }
    }
}

impl From<&str> for Item {
    fn from(value: &str) -> Self {
        Self { raw: Bytes::copy_from_slice(value.as_bytes()) }
    }
}

impl From<&String> for Item {
    fn from(value: &String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<String> for Item {
    fn from(value: String) -> Self {
        Self { raw: Bytes::from(value) }
    }
}

impl From<Cow<'_, str>> for Item {
    fn from(value: Cow<'_, str>) -> Self {
        Self::from(value.into_owned())
    }
}

impl From<http::StatusCode> for Item {
    fn from(value: http::StatusCode) -> Self {
        Self::from(value.as_u16())
    }
}

impl From<http::Method> for Item {
    fn from(value: http::Method) -> Self {
        Self::from(value.as_str())
    }
}

macro_rules! int_item {
    ($($int:ty),* $(,)?) => {
        $(
            impl From<$int> for Item {
                fn from(value: $int) -> Self {
                    Self { raw: Bytes::from(value.to_string()) }
                }
            }

            impl PartialEq<$int> for Item {
                fn eq(&self, other: &$int) -> bool {
                    self.raw == other.to_string().as_bytes()
                }
            }

            impl PartialEq<$int> for &Item {
                fn eq(&self, other: &$int) -> bool {
                    **self == *other
                }
            }

            impl PartialEq<Item> for $int {
                fn eq(&self, other: &Item) -> bool {
                    other == self
                }
            }
        )*
    };
}

int_item!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! bytes_eq {
    ($($ty:ty),* $(,)?) => {
        $(
            impl PartialEq<$ty> for Item {
                fn eq(&self, other: &$ty) -> bool {
                    self.as_bytes() == AsRef::<[u8]>::as_ref(other)
                }
            }

            impl PartialEq<Item> for $ty {
                fn eq(&self, other: &Item) -> bool {
                    other == self
                }
            }
        )*
    };
}

bytes_eq!(str, &str, String, [u8], &[u8], Vec<u8>, Bytes);

// `&Item == &str` and friends are covered by the std reference impls.
macro_rules! ref_item_eq {
    ($($ty:ty),* $(,)?) => {
        $(
            impl PartialEq<$ty> for &Item {
                fn eq(&self, other: &$ty) -> bool {
                    **self == *other
                }
            }
        )*
    };
}

ref_item_eq!(str, String, Vec<u8>);

impl<const N: usize> PartialEq<[u8; N]> for Item {
    fn eq(&self, other: &[u8; N]) -> bool {
        self.as_bytes() == other
    }
}

impl<const N: usize> PartialEq<&[u8; N]> for Item {
    fn eq(&self, other: &&[u8; N]) -> bool {
        self.as_bytes() == *other
    }
}

/// Conversion from a dynamically typed value.
///
/// Only strings and integers are accepted; booleans, null, floats, arrays and
/// objects fail with [`ItemError::TypeMismatch`].
impl TryFrom<&Value> for Item {
    type Error = ItemError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(Item::from(s)),
            Value::Number(n) => {
                if let Some(n) = n.as_i64() {
                    Ok(Item::from(n))
                } else if let Some(n) = n.as_u64() {
                    Ok(Item::from(n))
                } else {
                    Err(ItemError::type_mismatch("float"))
                }
            }
            Value::Bool(_) => Err(ItemError::type_mismatch("boolean")),
            Value::Null => Err(ItemError::type_mismatch("null")),
            Value::Array(_) => Err(ItemError::type_mismatch("array")),
            Value::Object(_) => Err(ItemError::type_mismatch("object")),
        }
    }
}

impl TryFrom<Value> for Item {
    type Error = ItemError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(Item::from(s)),
            other => Item::try_from(&other),
        }
    }
}
