use std::fmt;

use indexmap::IndexMap;

use crate::protocol::Item;

/// A frozen mapping that can be queried from either side.
///
/// All keys and values are [`Item`]s, so a key can be looked up as an integer,
/// text or raw bytes interchangeably. The table can't be changed after it is
/// built.
#[derive(Clone, Default)]
pub struct TwoWayFrozenDict {
    forward: IndexMap<Item, Item>,
    backward: IndexMap<Item, Item>,
}

impl TwoWayFrozenDict {
    /// Looks `key` up on the left side first, then on the right side.
    pub fn get<K: Into<Item>>(&self, key: K) -> Option<&Item> {
        let key = key.into();
        self.forward.get(&key).or_else(|| self.backward.get(&key))
    }

    /// Looks `key` up on the left side only.
    pub fn forward<K: Into<Item>>(&self, key: K) -> Option<&Item> {
        self.forward.get(&key.into())
    }

    /// Looks `key` up on the right side only.
    pub fn backward<K: Into<Item>>(&self, key: K) -> Option<&Item> {
        self.backward.get(&key.into())
    }

    pub fn contains<K: Into<Item>>(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Iterates `(left, right)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Item, &Item)> {
        self.forward.iter()
    }
}

impl<K: Into<Item>, V: Into<Item>> FromIterator<(K, V)> for TwoWayFrozenDict {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut forward = IndexMap::new();
        let mut backward = IndexMap::new();
        for (left, right) in iter {
            let (left, right) = (left.into(), right.into());
            backward.insert(right.clone(), left.clone());
            forward.insert(left, right);
        }
        Self { forward, backward }
    }
}

impl fmt::Debug for TwoWayFrozenDict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.forward.iter()).finish()
    }
}
