use crate::core::series::RateSeries;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Request parameters a loaded series is memoized under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Identifier of the source (or ordered source list) consulted.
    pub source: String,
}

impl CacheKey {
    pub fn new(start: NaiveDate, end: NaiveDate, source: impl Into<String>) -> Self {
        Self {
            start,
            end,
            source: source.into(),
        }
    }
}

/// Caller-owned memoization of loaded series.
///
/// The loader and the analysis pipeline stay stateless; whoever wants to
/// avoid repeated fetches for the same request keeps one of these.
#[derive(Debug, Default)]
pub struct SeriesCache {
    entries: HashMap<CacheKey, RateSeries>,
}

impl SeriesCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<&RateSeries> {
        self.entries.get(key)
    }

    /// Return the cached series for `key`, computing and storing it with
    /// `load` on a miss. A failed load stores nothing.
    pub fn get_or_try_insert_with<E, F>(&mut self, key: CacheKey, load: F) -> Result<&RateSeries, E>
    where
        F: FnOnce() -> Result<RateSeries, E>,
    {
        use std::collections::hash_map::Entry;
        match self.entries.entry(key) {
            Entry::Occupied(entry) => Ok(&*entry.into_mut()),
            Entry::Vacant(entry) => Ok(&*entry.insert(load()?)),
        }
    }

    pub fn invalidate(&mut self, key: &CacheKey) -> Option<RateSeries> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
