use alloc::vec::Vec;

use crate::key::{KeyCacheKey, KeyMap, KeySet, KeySizeMap};

/// Read access to measured sizes, as seen by a [`crate::SizeResolver`].
pub trait MeasuredSizes<K> {
    fn measured_size(&self, key: &K) -> Option<u32>;
}

/// Measured sizes keyed by item key (not index), so reordering keeps them valid.
#[derive(Clone, Debug)]
pub struct MeasuredSizeCache<K> {
    sizes: KeySizeMap<K>,
}

impl<K: KeyCacheKey> Default for MeasuredSizeCache<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: KeyCacheKey> MeasuredSizeCache<K> {
    pub fn new() -> Self {
        Self {
            sizes: KeySizeMap::<K>::new(),
        }
    }

    pub fn get(&self, key: &K) -> Option<u32> {
        self.sizes.get(key).copied()
    }

    /// Writes a size, returning the previous one.
    pub fn insert(&mut self, key: K, size: u32) -> Option<u32> {
        self.sizes.insert(key, size)
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn clear(&mut self) {
        self.sizes.clear();
    }

    /// Keeps only the entries whose key is in `live`. Returns the number of dropped entries.
    pub fn retain_keys(&mut self, live: &KeySet<K>) -> usize {
        let before = self.sizes.len();
        self.sizes.retain(|k, _| live.contains(k));
        before - self.sizes.len()
    }

    pub fn for_each(&self, mut f: impl FnMut(&K, u32)) {
        for (k, v) in self.sizes.iter() {
            f(k, *v);
        }
    }

    pub fn export(&self) -> Vec<(K, u32)>
    where
        K: Clone,
    {
        let mut out = Vec::with_capacity(self.sizes.len());
        self.for_each(|k, v| out.push((k.clone(), v)));
        out
    }

    /// Replaces the content with `entries`.
    pub fn import(&mut self, entries: impl IntoIterator<Item = (K, u32)>) {
        self.sizes.clear();
        for (k, v) in entries {
            self.sizes.insert(k, v);
        }
    }
}

impl<K: KeyCacheKey> MeasuredSizes<K> for MeasuredSizeCache<K> {
    fn measured_size(&self, key: &K) -> Option<u32> {
        self.get(key)
    }
}

/// Identity of one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellKey<R, C> {
    pub row: R,
    pub column: C,
}

impl<R, C> CellKey<R, C> {
    pub fn new(row: R, column: C) -> Self {
        Self { row, column }
    }
}

/// Measured cell widths keyed by `(row key, column key)`.
///
/// Entries of rows that left the grid may stay cached (see [`crate::EvictionPolicy::Retain`]), so
/// the grid reads column widths through [`ColumnWidthCache::column_width_among`] with its live
/// row keys.
#[derive(Clone, Debug)]
pub struct ColumnWidthCache<R, C> {
    columns: KeyMap<C, KeySizeMap<R>>,
    len: usize,
}

impl<R: KeyCacheKey, C: KeyCacheKey> Default for ColumnWidthCache<R, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: KeyCacheKey, C: KeyCacheKey> ColumnWidthCache<R, C> {
    pub fn new() -> Self {
        Self {
            columns: KeyMap::new(),
            len: 0,
        }
    }

    pub fn get(&self, row: &R, column: &C) -> Option<u32> {
        self.columns.get(column)?.get(row).copied()
    }

    /// Writes a cell width, returning the previous one.
    pub fn insert(&mut self, cell: CellKey<R, C>, width: u32) -> Option<u32> {
        let prev = self
            .columns
            .entry(cell.column)
            .or_default()
            .insert(cell.row, width);
        if prev.is_none() {
            self.len += 1;
        }
        prev
    }

    /// The widest cached cell of `column`, whatever its row.
    pub fn column_width(&self, column: &C) -> Option<u32> {
        self.columns.get(column)?.values().copied().max()
    }

    /// The widest cell of `column` among the rows in `rows`.
    pub fn column_width_among(&self, column: &C, rows: &KeySet<R>) -> Option<u32> {
        self.columns
            .get(column)?
            .iter()
            .filter(|(row, _)| rows.contains(*row))
            .map(|(_, width)| *width)
            .max()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.columns.clear();
        self.len = 0;
    }

    /// Keeps only cells whose row and column keys are both live.
    pub fn retain_keys(&mut self, rows: &KeySet<R>, columns: &KeySet<C>) -> usize {
        let before = self.len;
        self.columns.retain(|column, cells| {
            if !columns.contains(column) {
                return false;
            }
            cells.retain(|row, _| rows.contains(row));
            !cells.is_empty()
        });
        self.len = self.columns.values().map(|cells| cells.len()).sum();
        before - self.len
    }

    pub fn for_each(&self, mut f: impl FnMut(&R, &C, u32)) {
        for (column, cells) in self.columns.iter() {
            for (row, width) in cells.iter() {
                f(row, column, *width);
            }
        }
    }

    pub fn export(&self) -> Vec<(CellKey<R, C>, u32)>
    where
        R: Clone,
        C: Clone,
    {
        let mut out = Vec::with_capacity(self.len);
        self.for_each(|row, column, width| {
            out.push((CellKey::new(row.clone(), column.clone()), width));
        });
        out
    }

    pub fn import(&mut self, entries: impl IntoIterator<Item = (CellKey<R, C>, u32)>) {
        self.clear();
        for (cell, width) in entries {
            self.insert(cell, width);
        }
    }
}

/// Column widths as laid out: only cells of live rows count.
pub(crate) struct LiveColumnWidths<'a, R, C> {
    cache: &'a ColumnWidthCache<R, C>,
    rows: &'a KeySet<R>,
}

impl<'a, R, C> LiveColumnWidths<'a, R, C> {
    pub(crate) fn new(cache: &'a ColumnWidthCache<R, C>, rows: &'a KeySet<R>) -> Self {
        Self { cache, rows }
    }
}

impl<R: KeyCacheKey, C: KeyCacheKey> MeasuredSizes<C> for LiveColumnWidths<'_, R, C> {
    fn measured_size(&self, column: &C) -> Option<u32> {
        self.cache.column_width_among(column, self.rows)
    }
}
