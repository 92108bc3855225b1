#[cfg(not(feature = "std"))]
use alloc::collections::{BTreeMap, BTreeSet};
#[cfg(feature = "std")]
use std::collections::{HashMap, HashSet};

#[cfg(feature = "std")]
pub(crate) type KeyMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyMap<K, V> = BTreeMap<K, V>;

pub(crate) type KeySizeMap<K> = KeyMap<K, u32>;

/// A set of keys, hashed with `std` and ordered without it.
#[cfg(feature = "std")]
#[doc(hidden)]
pub type KeySet<K> = HashSet<K>;
#[cfg(not(feature = "std"))]
#[doc(hidden)]
pub type KeySet<K> = BTreeSet<K>;

/// Bound for anything used as a cache key (item keys, row/column keys, element ids).
#[cfg(feature = "std")]
#[doc(hidden)]
pub trait KeyCacheKey: core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq> KeyCacheKey for K {}

#[cfg(not(feature = "std"))]
#[doc(hidden)]
pub trait KeyCacheKey: Ord {}
#[cfg(not(feature = "std"))]
impl<K: Ord> KeyCacheKey for K {}
