//! Anime / non-anime partitioning of resolved items.

use shared::{ResolvedCollection, ResolvedMovie, ResolvedSeries};

/// Resolved items grouped into output buckets, each in input order
#[derive(Debug, Clone, Default)]
pub struct Buckets {
    pub movies: Vec<ResolvedMovie>,
    pub anime_movies: Vec<ResolvedMovie>,
    pub series: Vec<ResolvedSeries>,
    pub anime_series: Vec<ResolvedSeries>,
    pub collections: Vec<ResolvedCollection>,
}

impl Buckets {
    /// Partition movies and series by their anime flag. Collections are kept whole.
    pub fn classify(
        movies: Vec<ResolvedMovie>,
        series: Vec<ResolvedSeries>,
        collections: Vec<ResolvedCollection>,
    ) -> Self {
        let (anime_movies, movies): (Vec<_>, Vec<_>) = movies.into_iter().partition(|m| m.is_anime);
        let (anime_series, series): (Vec<_>, Vec<_>) = series.into_iter().partition(|s| s.is_anime);

        Self {
            movies,
            anime_movies,
            series,
            anime_series,
            collections,
        }
    }

    pub fn total(&self) -> usize {
        self.movies.len()
            + self.anime_movies.len()
            + self.series.len()
            + self.anime_series.len()
            + self.collections.len()
    }
}
