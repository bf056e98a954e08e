use std::fmt;

use indexmap::IndexSet;

use crate::protocol::Item;

/// A frozen set of [`Item`]s, offering membership tests and enumeration.
#[derive(Clone, Default)]
pub struct FrozenSet {
    items: IndexSet<Item>,
}

impl FrozenSet {
    pub fn contains<K: Into<Item>>(&self, value: K) -> bool {
        self.items.contains(&value.into())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }
}

impl<T: Into<Item>> FromIterator<T> for FrozenSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self { items: iter.into_iter().map(Into::into).collect() }
    }
}

/// Renders as `{a, b, c}`.
impl fmt::Display for FrozenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, item) in self.items.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str("}")
    }
}

impl fmt::Debug for FrozenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.items.iter()).finish()
    }
}
