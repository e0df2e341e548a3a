use std::fmt;
use std::iter::FusedIterator;
use std::ops::{Index, IndexMut};

use crate::{NbtString, Value};

/// A map type with [`NbtString`] keys and [`Value`] values.
///
/// The key of each entry is the name of the child tag, so a child can never
/// disagree with its parent about what it is called. Iteration order is the
/// sorted key order unless the `preserve_order` feature is enabled, in which
/// case entries are kept in insertion (and therefore decode) order.
#[derive(Clone, PartialEq, Default)]
pub struct Compound {
    map: Map,
}

#[cfg(not(feature = "preserve_order"))]
type Map = std::collections::BTreeMap<NbtString, Value>;

#[cfg(feature = "preserve_order")]
type Map = indexmap::IndexMap<NbtString, Value>;

impl fmt::Debug for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.map.fmt(f)
    }
}

impl Compound {
    pub fn new() -> Self {
        Self { map: Map::new() }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            #[cfg(not(feature = "preserve_order"))]
            map: {
                // BTreeMap does not have with_capacity.
                let _ = cap;
                Map::new()
            },
            #[cfg(feature = "preserve_order")]
            map: Map::with_capacity(cap),
        }
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn get<K>(&self, k: &K) -> Option<&Value>
    where
        K: AsRef<[u8]> + ?Sized,
    {
        self.map.get(k.as_ref())
    }

    pub fn get_mut<K>(&mut self, k: &K) -> Option<&mut Value>
    where
        K: AsRef<[u8]> + ?Sized,
    {
        self.map.get_mut(k.as_ref())
    }

    pub fn contains_key<K>(&self, k: &K) -> bool
    where
        K: AsRef<[u8]> + ?Sized,
    {
        self.map.contains_key(k.as_ref())
    }

    /// Inserts a named child, returning the value previously stored under the
    /// same name.
    pub fn insert<K, V>(&mut self, k: K, v: V) -> Option<Value>
    where
        K: Into<NbtString>,
        V: Into<Value>,
    {
        self.map.insert(k.into(), v.into())
    }

    #[cfg(not(feature = "preserve_order"))]
    pub fn remove<K>(&mut self, k: &K) -> Option<Value>
    where
        K: AsRef<[u8]> + ?Sized,
    {
        self.map.remove(k.as_ref())
    }

    /// Removes the entry while keeping the order of the remaining entries.
    #[cfg(feature = "preserve_order")]
    pub fn remove<K>(&mut self, k: &K) -> Option<Value>
    where
        K: AsRef<[u8]> + ?Sized,
    {
        self.map.shift_remove(k.as_ref())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            iter: self.map.iter(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_> {
        IterMut {
            iter: self.map.iter_mut(),
        }
    }

    pub fn keys(&self) -> Keys<'_> {
        Keys {
            iter: self.map.keys(),
        }
    }

    pub fn values(&self) -> Values<'_> {
        Values {
            iter: self.map.values(),
        }
    }

    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&NbtString, &mut Value) -> bool,
    {
        self.map.retain(f);
    }
}

impl Extend<(NbtString, Value)> for Compound {
    fn extend<T>(&mut self, iter: T)
    where
        T: IntoIterator<Item = (NbtString, Value)>,
    {
        self.map.extend(iter);
    }
}

impl FromIterator<(NbtString, Value)> for Compound {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = (NbtString, Value)>,
    {
        Self {
            map: Map::from_iter(iter),
        }
    }
}

impl<K> Index<&'_ K> for Compound
where
    K: AsRef<[u8]> + ?Sized,
{
    type Output = Value;

    fn index(&self, index: &K) -> &Self::Output {
        self.map.index(index.as_ref())
    }
}

impl<K> IndexMut<&'_ K> for Compound
where
    K: AsRef<[u8]> + ?Sized,
{
    fn index_mut(&mut self, index: &K) -> &mut Self::Output {
        self.map
            .get_mut(index.as_ref())
            .expect("no entry found for key")
    }
}

macro_rules! impl_iterator_traits {
    (($name:ident $($generics:tt)*) => $item:ty) => {
        impl $($generics)* Iterator for $name $($generics)* {
            type Item = $item;
            #[inline]
            fn next(&mut self) -> Option<Self::Item> {
                self.iter.next()
            }
            #[inline]
            fn size_hint(&self) -> (usize, Option<usize>) {
                self.iter.size_hint()
            }
        }

        impl $($generics)* DoubleEndedIterator for $name $($generics)* {
            #[inline]
            fn next_back(&mut self) -> Option<Self::Item> {
                self.iter.next_back()
            }
        }

        impl $($generics)* ExactSizeIterator for $name $($generics)* {
            #[inline]
            fn len(&self) -> usize {
                self.iter.len()
            }
        }

        impl $($generics)* FusedIterator for $name $($generics)* {}
    }
}

impl<'a> IntoIterator for &'a Compound {
    type Item = (&'a NbtString, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Clone)]
pub struct Iter<'a> {
    #[cfg(not(feature = "preserve_order"))]
    iter: std::collections::btree_map::Iter<'a, NbtString, Value>,
    #[cfg(feature = "preserve_order")]
    iter: indexmap::map::Iter<'a, NbtString, Value>,
}

impl_iterator_traits!((Iter<'a>) => (&'a NbtString, &'a Value));

impl<'a> IntoIterator for &'a mut Compound {
    type Item = (&'a NbtString, &'a mut Value);
    type IntoIter = IterMut<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

pub struct IterMut<'a> {
    #[cfg(not(feature = "preserve_order"))]
    iter: std::collections::btree_map::IterMut<'a, NbtString, Value>,
    #[cfg(feature = "preserve_order")]
    iter: indexmap::map::IterMut<'a, NbtString, Value>,
}

impl_iterator_traits!((IterMut<'a>) => (&'a NbtString, &'a mut Value));

impl IntoIterator for Compound {
    type Item = (NbtString, Value);
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            iter: self.map.into_iter(),
        }
    }
}

pub struct IntoIter {
    #[cfg(not(feature = "preserve_order"))]
    iter: std::collections::btree_map::IntoIter<NbtString, Value>,
    #[cfg(feature = "preserve_order")]
    iter: indexmap::map::IntoIter<NbtString, Value>,
}

impl_iterator_traits!((IntoIter) => (NbtString, Value));

#[derive(Clone)]
pub struct Keys<'a> {
    #[cfg(not(feature = "preserve_order"))]
    iter: std::collections::btree_map::Keys<'a, NbtString, Value>,
    #[cfg(feature = "preserve_order")]
    iter: indexmap::map::Keys<'a, NbtString, Value>,
}

impl_iterator_traits!((Keys<'a>) => &'a NbtString);

#[derive(Clone)]
pub struct Values<'a> {
    #[cfg(not(feature = "preserve_order"))]
    iter: std::collections::btree_map::Values<'a, NbtString, Value>,
    #[cfg(feature = "preserve_order")]
    iter: indexmap::map::Values<'a, NbtString, Value>,
}

impl_iterator_traits!((Values<'a>) => &'a Value);
