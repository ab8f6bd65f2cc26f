//! Data models for the report pipeline.
//!
//! Entries are parsed from the unmatched-assets log; resolved items pair an
//! entry with the outcome of a provider lookup. All of them are plain values
//! that live for a single run.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

/// A movie reported without a matching poster
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MovieEntry {
    pub name: String,
    /// Four-digit release year as written in the log
    pub year: String,
}

/// A series reported without a matching poster
///
/// Two entries with the same name and year but different missing seasons are
/// distinct values and are reported separately.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesEntry {
    pub name: String,
    pub year: String,
    /// Season numbers in log order
    pub missing_seasons: Vec<String>,
}

/// A collection reported without a matching poster
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectionEntry {
    pub name: String,
}

impl MovieEntry {
    pub fn new(name: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            year: year.into(),
        }
    }
}

impl SeriesEntry {
    pub fn new(
        name: impl Into<String>,
        year: impl Into<String>,
        missing_seasons: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            year: year.into(),
            missing_seasons,
        }
    }
}

impl CollectionEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Outcome of a movie or series lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Canonical provider URL, `None` when not found
    pub link: Option<String>,
    pub is_anime: bool,
}

impl Resolution {
    /// The "not found" outcome
    pub fn not_found() -> Self {
        Self::default()
    }

    pub fn found(link: impl Into<String>, is_anime: bool) -> Self {
        Self {
            link: Some(link.into()),
            is_anime,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMovie {
    pub entry: MovieEntry,
    pub link: Option<String>,
    pub is_anime: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSeries {
    pub entry: SeriesEntry,
    pub link: Option<String>,
    pub is_anime: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedCollection {
    pub entry: CollectionEntry,
    pub link: Option<String>,
}

impl ResolvedMovie {
    pub fn new(entry: MovieEntry, resolution: Resolution) -> Self {
        Self {
            entry,
            link: resolution.link,
            is_anime: resolution.is_anime,
        }
    }
}

impl ResolvedSeries {
    pub fn new(entry: SeriesEntry, resolution: Resolution) -> Self {
        Self {
            entry,
            link: resolution.link,
            is_anime: resolution.is_anime,
        }
    }
}

/// Output bucket, one family of batch files per variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Movies,
    AnimeMovies,
    Series,
    AnimeSeries,
    Collections,
}

impl ItemType {
    /// All buckets in console reporting order
    pub const ALL: [ItemType; 5] = [
        ItemType::Movies,
        ItemType::AnimeMovies,
        ItemType::Series,
        ItemType::AnimeSeries,
        ItemType::Collections,
    ];

    /// File name stem of the bucket's batch files
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Movies => "movies",
            ItemType::AnimeMovies => "anime_movies",
            ItemType::Series => "series",
            ItemType::AnimeSeries => "anime_series",
            ItemType::Collections => "collections",
        }
    }

    /// Prefix used on console summary lines
    pub fn console_label(&self) -> &'static str {
        match self {
            ItemType::Movies => "Movie",
            ItemType::AnimeMovies => "Anime Movie",
            ItemType::Series => "Series",
            ItemType::AnimeSeries => "Anime",
            ItemType::Collections => "Collection",
        }
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Insertion-ordered list that silently drops repeated values
#[derive(Debug, Clone)]
pub struct UniqueList<T> {
    items: Vec<T>,
    seen: HashSet<T>,
}

impl<T> Default for UniqueList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::new(),
        }
    }
}

impl<T: Clone + Eq + Hash> UniqueList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `item` unless an equal value is already present.
    ///
    /// Returns `true` if the item was added.
    pub fn push(&mut self, item: T) -> bool {
        if self.seen.contains(&item) {
            return false;
        }
        self.seen.insert(item.clone());
        self.items.push(item);
        true
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: Clone + Eq + Hash> FromIterator<T> for UniqueList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for item in iter {
            list.push(item);
        }
        list
    }
}

impl<T> IntoIterator for UniqueList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a UniqueList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
