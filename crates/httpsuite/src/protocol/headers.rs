//! Ordered, name-normalized HTTP header storage.
//!
//! Header names are matched case-insensitively and treat `_` the same as `-`,
//! so `Content-Length`, `content-length` and `content_length` all address the
//! same entry. The spelling supplied the first time a name is inserted is the
//! one kept for display and serialization.
//!
//! Insertion order is preserved. Setting a name that already exists replaces
//! its value in place instead of appending a new entry.
//!
//! # Example
//!
//! ```
//! use httpsuite::protocol::Headers;
//!
//! let mut headers = Headers::from([("Host", "example.com")]);
//! headers.set("Content-Length", 5);
//!
//! assert_eq!(headers.get("content_length").unwrap(), 5);
//! assert_eq!(headers.to_string(), "Host: example.com\r\nContent-Length: 5");
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, Index};

use bytes::{BufMut, Bytes, BytesMut};
use indexmap::IndexMap;
use serde_json::Value;

use crate::protocol::{HeaderNotFound, Item, ItemError};

/// Returns the lookup key for a header name: ASCII lower-cased with `_` replaced by `-`.
pub fn normalize_name(name: &[u8]) -> Bytes {
    name.iter()
        .map(|b| match b {
            b'_' => b'-',
            b => b.to_ascii_lowercase(),
        })
        .collect::<Vec<u8>>()
        .into()
}

#[derive(Debug, Clone)]
struct Entry {
    name: Item,
    value: Item,
}

/// An ordered collection of header name/value pairs.
#[derive(Clone, Default)]
pub struct Headers {
    entries: IndexMap<Bytes, Entry>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: IndexMap::with_capacity(capacity) }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains<N: AsRef<[u8]>>(&self, name: N) -> bool {
        self.entries.contains_key(&normalize_name(name.as_ref()))
    }

    /// Looks up a header, returning `None` when it is absent.
    pub fn find<N: AsRef<[u8]>>(&self, name: N) -> Option<&Item> {
        self.entries.get(&normalize_name(name.as_ref())).map(|entry| &entry.value)
    }

    /// Looks up a header.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderNotFound`] when no header matches `name` after normalization.
    pub fn get<N: AsRef<[u8]>>(&self, name: N) -> Result<&Item, HeaderNotFound> {
        let name = name.as_ref();
        self.find(name).ok_or_else(|| HeaderNotFound::new(String::from_utf8_lossy(name)))
    }

    /// Sets a header, returning the previous value if the name was already present.
    ///
    /// An existing entry keeps its position and its original name spelling.
    pub fn set<N, V>(&mut self, name: N, value: V) -> Option<Item>
    where
        N: Into<Item>,
        V: Into<Item>,
    {
        let name = name.into();
        let value = value.into();
        let key = normalize_name(name.as_bytes());

        match self.entries.get_mut(&key) {
            Some(entry) => Some(std::mem::replace(&mut entry.value, value)),
            None => {
                self.entries.insert(key, Entry { name, value });
                None
            }
        }
    }

    /// Removes a header, keeping the relative order of the remaining ones.
    pub fn remove<N: AsRef<[u8]>>(&mut self, name: N) -> Option<Item> {
        self.entries.shift_remove(&normalize_name(name.as_ref())).map(|entry| entry.value)
    }

    /// Iterates `(name, value)` pairs in insertion order, names in their stored spelling.
    pub fn iter(&self) -> Iter<'_> {
        Iter { inner: self.entries.values() }
    }

    pub fn names(&self) -> impl Iterator<Item = &Item> {
        self.entries.values().map(|entry| &entry.name)
    }

    /// Returns the union of `self` and `other`; `other` wins on name collision.
    ///
    /// Names already present keep their position, new names are appended in
    /// `other`'s order.
    #[must_use]
    pub fn merge<I, K, V>(&self, other: I) -> Headers
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Item>,
        V: Into<Item>,
    {
        let mut merged = self.clone();
        merged.extend(other);
        merged
    }

    /// Writes every header as `Name: value\r\n` into `dst`.
    pub fn encode(&self, dst: &mut BytesMut) {
        for (name, value) in self.iter() {
            dst.reserve(name.len() + value.len() + 4);
            dst.put_slice(name.as_bytes());
            dst.put_slice(b": ");
            dst.put_slice(value.as_bytes());
            dst.put_slice(b"\r\n");
        }
    }

    /// Returns the wire form, each line CRLF-terminated.
    pub fn to_bytes(&self) -> Bytes {
        let mut dst = BytesMut::new();
        self.encode(&mut dst);
        dst.freeze()
    }
}

macro_rules! header_accessors {
    ($($get:ident, $set:ident => $name:literal;)*) => {
        /// Accessors for common header fields.
        ///
        /// Getters return `None` when the header is absent. Setters store the
        /// canonical hyphenated spelling for new entries.
        impl Headers {
            $(
                pub fn $get(&self) -> Option<&Item> {
                    self.find($name)
                }

                pub fn $set<V: Into<Item>>(&mut self, value: V) -> Option<Item> {
                    self.set(Item::from_static($name), value)
                }
            )*
        }
    };
}

header_accessors! {
    accept, set_accept => "Accept";
    accept_encoding, set_accept_encoding => "Accept-Encoding";
    accept_language, set_accept_language => "Accept-Language";
    authorization, set_authorization => "Authorization";
    cache_control, set_cache_control => "Cache-Control";
    connection, set_connection => "Connection";
    content_encoding, set_content_encoding => "Content-Encoding";
    content_length, set_content_length => "Content-Length";
    content_type, set_content_type => "Content-Type";
    cookie, set_cookie => "Cookie";
    date, set_date => "Date";
    host, set_host => "Host";
    location, set_location => "Location";
    server, set_server => "Server";
    transfer_encoding, set_transfer_encoding => "Transfer-Encoding";
    user_agent, set_user_agent => "User-Agent";
}

/// Headers compare equal when they hold the same normalized names with equal
/// values in the same order.
impl PartialEq for Headers {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .zip(other.entries.iter())
                .all(|((lk, le), (rk, re))| lk == rk && le.value == re.value)
    }
}

impl Eq for Headers {}

impl<N: AsRef<[u8]>> Index<N> for Headers {
    type Output = Item;

    /// # Panics
    ///
    /// Panics if the header is absent; use [`Headers::get`] or [`Headers::find`]
    /// for a fallible lookup.
    fn index(&self, name: N) -> &Item {
        let name = name.as_ref();
        match self.find(name) {
            Some(value) => value,
            None => panic!("header not found: {}", String::from_utf8_lossy(name)),
        }
    }
}

impl<K: Into<Item>, V: Into<Item>> Extend<(K, V)> for Headers {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.set(name, value);
        }
    }
}

impl<K: Into<Item>, V: Into<Item>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        headers.extend(iter);
        headers
    }
}

impl<K: Into<Item>, V: Into<Item>, const N: usize> From<[(K, V); N]> for Headers {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Into<Item>, V: Into<Item>> From<Vec<(K, V)>> for Headers {
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl IntoIterator for Headers {
    type Item = (Item, Item);
    type IntoIter = IntoIter;

    fn into_iter(self) -> IntoIter {
        IntoIter { inner: self.entries.into_values() }
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a Item, &'a Item);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Borrowing iterator over `(name, value)` pairs, created by [`Headers::iter`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: indexmap::map::Values<'a, Bytes, Entry>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Item, &'a Item);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (&entry.name, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

/// Owning iterator over `(name, value)` pairs.
#[derive(Debug)]
pub struct IntoIter {
    inner: indexmap::map::IntoValues<Bytes, Entry>,
}

impl Iterator for IntoIter {
    type Item = (Item, Item);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (entry.name, entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for IntoIter {}

impl<I, K, V> Add<I> for Headers
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<Item>,
    V: Into<Item>,
{
    type Output = Headers;

    fn add(mut self, other: I) -> Headers {
        self.extend(other);
        self
    }
}

impl<I, K, V> AddAssign<I> for Headers
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<Item>,
    V: Into<Item>,
{
    fn add_assign(&mut self, other: I) {
        self.extend(other);
    }
}

/// Builds headers from a JSON object whose values are strings or integers.
impl TryFrom<&Value> for Headers {
    type Error = ItemError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let Value::Object(map) = value else {
            return Err(ItemError::type_mismatch("non-object headers"));
        };

        let mut headers = Headers::with_capacity(map.len());
        for (name, value) in map {
            headers.set(name, Item::try_from(value)?);
        }
        Ok(headers)
    }
}

impl TryFrom<Value> for Headers {
    type Error = ItemError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Headers::try_from(&value)
    }
}

/// CRLF-joined `Name: value` lines, without a trailing line break.
impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (name, value)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str("\r\n")?;
            }
            write!(f, "{name}: {value}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter().map(|(name, value)| (name.as_text(), value.as_text()))).finish()
    }
}
