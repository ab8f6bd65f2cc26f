//! Metadata resolution.
//!
//! Looks each parsed entry up against its provider and turns it into a
//! resolved item carrying a canonical link and, for movies and series, an
//! anime flag. Every lookup is awaited on its own; nothing runs concurrently.
//!
//! Provider faults never abort a run: they are logged and reported as
//! "not found", the same outcome as a search with no matching year.

use crate::api::http::year_of;
use crate::api::{MovieSource, ProviderError, SeriesSource};
use shared::{
    CollectionEntry, MovieEntry, Resolution, ResolvedCollection, ResolvedMovie, ResolvedSeries,
    SeriesEntry,
};
use tracing::{debug, warn};

/// Substring that marks a keyword or genre as anime
const ANIME_TAG: &str = "anime";

/// Case-insensitive "anime" substring match over tags
pub fn is_anime<S: AsRef<str>>(tags: &[S]) -> bool {
    tags.iter()
        .any(|tag| tag.as_ref().to_lowercase().contains(ANIME_TAG))
}

/// Counters for one resolution pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverStats {
    pub lookups: usize,
    pub found: usize,
    pub not_found: usize,
    pub errors: usize,
}

impl ResolverStats {
    fn record(&mut self, found: bool) {
        self.lookups += 1;
        if found {
            self.found += 1;
        } else {
            self.not_found += 1;
        }
    }
}

/// Resolves entries against injected metadata sources
pub struct Resolver<M, S> {
    movies: M,
    series: S,
    stats: ResolverStats,
}

impl<M: MovieSource, S: SeriesSource> Resolver<M, S> {
    /// Create a resolver over a movie/collection source and a series source
    pub fn new(movies: M, series: S) -> Self {
        Self {
            movies,
            series,
            stats: ResolverStats::default(),
        }
    }

    pub fn stats(&self) -> &ResolverStats {
        &self.stats
    }

    /// Find the first search hit released in `year` and classify it by keywords.
    pub async fn resolve_movie(&mut self, name: &str, year: &str) -> Resolution {
        let result = self.lookup_movie(name, year).await;
        let resolution = match result {
            Ok(resolution) => resolution,
            Err(e) => self.fault(self.movies.id(), name, e),
        };
        self.stats.record(resolution.link.is_some());
        resolution
    }

    /// Find the first search hit first aired in `year` and classify it by genres.
    pub async fn resolve_series(&mut self, name: &str, year: &str) -> Resolution {
        let result = self.lookup_series(name, year).await;
        let resolution = match result {
            Ok(resolution) => resolution,
            Err(e) => self.fault(self.series.id(), name, e),
        };
        self.stats.record(resolution.link.is_some());
        resolution
    }

    /// Link of the first collection search hit, if any.
    pub async fn resolve_collection(&mut self, name: &str) -> Option<String> {
        let result = self.movies.search_collections(name).await;
        let link = match result {
            Ok(results) => results
                .first()
                .map(|hit| self.movies.collection_url(hit.id)),
            Err(e) => self.fault(self.movies.id(), name, e).link,
        };
        debug!(collection = name, found = link.is_some(), "Resolved collection");
        self.stats.record(link.is_some());
        link
    }

    async fn lookup_movie(
        &self,
        name: &str,
        year: &str,
    ) -> Result<Resolution, ProviderError> {
        let results = self.movies.search_movies(name).await?;
        let Some(hit) = results
            .iter()
            .find(|hit| year_of(hit.release_date.as_deref()) == Some(year))
        else {
            debug!(movie = name, year, candidates = results.len(), "No movie with matching year");
            return Ok(Resolution::not_found());
        };

        let keywords = self.movies.movie_keywords(hit.id).await?;
        let resolution = Resolution::found(self.movies.movie_url(hit.id), is_anime(keywords.as_slice()));
        debug!(movie = name, year, id = hit.id, anime = resolution.is_anime, "Resolved movie");
        Ok(resolution)
    }

    async fn lookup_series(
        &self,
        name: &str,
        year: &str,
    ) -> Result<Resolution, ProviderError> {
        let results = self.series.search_series(name).await?;
        let Some(hit) = results
            .iter()
            .find(|hit| year_of(hit.first_aired.as_deref()) == Some(year))
        else {
            debug!(series = name, year, candidates = results.len(), "No series with matching year");
            return Ok(Resolution::not_found());
        };

        let genres = self.series.series_genres(&hit.id).await?;
        let resolution = Resolution::found(self.series.series_url(&hit.slug), is_anime(genres.as_slice()));
        debug!(series = name, year, id = %hit.id, anime = resolution.is_anime, "Resolved series");
        Ok(resolution)
    }

    fn fault(&mut self, provider: &'static str, name: &str, error: ProviderError) -> Resolution {
        warn!(provider, name, error = %error, "Provider lookup failed, reporting as not found");
        self.stats.errors += 1;
        Resolution::not_found()
    }

    /// Resolve every movie in order
    pub async fn resolve_movies<'a, I>(&mut self, entries: I) -> Vec<ResolvedMovie>
    where
        I: IntoIterator<Item = &'a MovieEntry>,
    {
        let mut resolved = Vec::new();
        for entry in entries {
            let resolution = self.resolve_movie(&entry.name, &entry.year).await;
            resolved.push(ResolvedMovie::new(entry.clone(), resolution));
        }
        resolved
    }

    /// Resolve every series in order
    pub async fn resolve_all_series<'a, I>(&mut self, entries: I) -> Vec<ResolvedSeries>
    where
        I: IntoIterator<Item = &'a SeriesEntry>,
    {
        let mut resolved = Vec::new();
        for entry in entries {
            let resolution = self.resolve_series(&entry.name, &entry.year).await;
            resolved.push(ResolvedSeries::new(entry.clone(), resolution));
        }
        resolved
    }

    /// Resolve every collection in order
    pub async fn resolve_collections<'a, I>(&mut self, entries: I) -> Vec<ResolvedCollection>
    where
        I: IntoIterator<Item = &'a CollectionEntry>,
    {
        let mut resolved = Vec::new();
        for entry in entries {
            let link = self.resolve_collection(&entry.name).await;
            resolved.push(ResolvedCollection {
                entry: entry.clone(),
                link,
            });
        }
        resolved
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::error::Result;
    use crate::api::{CollectionCandidate, MovieCandidate, SeriesCandidate};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory movie source keyed by query
    #[derive(Default)]
    pub(crate) struct StubMovies {
        pub movies: HashMap<String, Vec<MovieCandidate>>,
        pub keywords: HashMap<i64, Vec<String>>,
        pub collections: HashMap<String, Vec<CollectionCandidate>>,
        pub fail: bool,
        pub keyword_calls: AtomicUsize,
    }

    #[async_trait]
    impl MovieSource for StubMovies {
        fn id(&self) -> &'static str {
            "stub-movies"
        }

        async fn search_movies(&self, query: &str) -> Result<Vec<MovieCandidate>> {
            if self.fail {
                return Err(ProviderError::Auth("stub failure".to_string()));
            }
            Ok(self.movies.get(query).cloned().unwrap_or_default())
        }

        async fn movie_keywords(&self, movie_id: i64) -> Result<Vec<String>> {
            self.keyword_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.keywords.get(&movie_id).cloned().unwrap_or_default())
        }

        async fn search_collections(&self, query: &str) -> Result<Vec<CollectionCandidate>> {
            if self.fail {
                return Err(ProviderError::Status {
                    provider: "stub",
                    status: 401,
                    message: "unauthorized".to_string(),
                });
            }
            Ok(self.collections.get(query).cloned().unwrap_or_default())
        }

        fn movie_url(&self, movie_id: i64) -> String {
            format!("https://example.test/movie/{}", movie_id)
        }

        fn collection_url(&self, collection_id: i64) -> String {
            format!("https://example.test/collection/{}", collection_id)
        }
    }

    /// In-memory series source keyed by query
    #[derive(Default)]
    pub(crate) struct StubSeries {
        pub series: HashMap<String, Vec<SeriesCandidate>>,
        pub genres: HashMap<String, Vec<String>>,
        pub fail: bool,
    }

    #[async_trait]
    impl SeriesSource for StubSeries {
        fn id(&self) -> &'static str {
            "stub-series"
        }

        async fn search_series(&self, query: &str) -> Result<Vec<SeriesCandidate>> {
            if self.fail {
                return Err(ProviderError::MissingApiKey("stub"));
            }
            Ok(self.series.get(query).cloned().unwrap_or_default())
        }

        async fn series_genres(&self, series_id: &str) -> Result<Vec<String>> {
            Ok(self.genres.get(series_id).cloned().unwrap_or_default())
        }

        fn series_url(&self, slug: &str) -> String {
            format!("https://example.test/series/{}", slug)
        }
    }

    fn movie(id: i64, date: Option<&str>) -> MovieCandidate {
        MovieCandidate {
            id,
            release_date: date.map(str::to_string),
        }
    }

    fn series(id: &str, slug: &str, date: &str) -> SeriesCandidate {
        SeriesCandidate {
            id: id.to_string(),
            slug: slug.to_string(),
            first_aired: Some(date.to_string()),
        }
    }

    #[test]
    fn test_is_anime() {
        assert!(is_anime(&["Based on Manga", "ANIME"]));
        assert!(is_anime(&["adult animation", "anime-style"]));
        assert!(!is_anime(&["Animation", "Drama"]));
        assert!(!is_anime::<&str>(&[]));
    }

    #[tokio::test]
    async fn test_movie_picks_first_exact_year() {
        let mut stub = StubMovies::default();
        stub.movies.insert(
            "Akira".to_string(),
            vec![movie(1, Some("2025-01-01")), movie(2, Some("1988-07-16")), movie(3, Some("1988-01-01"))],
        );
        stub.keywords.insert(2, vec!["cyberpunk".to_string(), "Anime".to_string()]);

        let mut resolver = Resolver::new(stub, StubSeries::default());
        let resolution = resolver.resolve_movie("Akira", "1988").await;

        assert_eq!(resolution, Resolution::found("https://example.test/movie/2", true));
    }

    #[tokio::test]
    async fn test_movie_without_year_match_is_not_found() {
        let mut stub = StubMovies::default();
        stub.movies.insert(
            "Heat".to_string(),
            vec![movie(1, Some("1986-01-01")), movie(2, None), movie(3, Some(""))],
        );

        let mut resolver = Resolver::new(stub, StubSeries::default());
        let resolution = resolver.resolve_movie("Heat", "1995").await;

        assert_eq!(resolution, Resolution::not_found());
        assert_eq!(resolver.movies.keyword_calls.load(Ordering::SeqCst), 0);
        assert_eq!(resolver.stats().not_found, 1);
    }

    #[tokio::test]
    async fn test_empty_search_is_not_found() {
        let mut resolver = Resolver::new(StubMovies::default(), StubSeries::default());

        assert_eq!(resolver.resolve_movie("Nothing", "2000").await, Resolution::not_found());
        assert_eq!(resolver.resolve_series("Nothing", "2000").await, Resolution::not_found());
        assert_eq!(resolver.resolve_collection("Nothing").await, None);
        assert_eq!(resolver.stats().lookups, 3);
        assert_eq!(resolver.stats().errors, 0);
    }

    #[tokio::test]
    async fn test_series_classified_by_genres() {
        let mut stub = StubSeries::default();
        stub.series.insert(
            "Cowboy Bebop".to_string(),
            vec![
                series("1", "cowboy-bebop-2021", "2021-11-19"),
                series("76885", "cowboy-bebop", "1998-04-03"),
            ],
        );
        stub.genres
            .insert("76885".to_string(), vec!["Anime".to_string(), "Action".to_string()]);

        let mut resolver = Resolver::new(StubMovies::default(), stub);

        assert_eq!(
            resolver.resolve_series("Cowboy Bebop", "1998").await,
            Resolution::found("https://example.test/series/cowboy-bebop", true)
        );
        assert_eq!(
            resolver.resolve_series("Cowboy Bebop", "2021").await,
            Resolution::found("https://example.test/series/cowboy-bebop-2021", false)
        );
    }

    #[tokio::test]
    async fn test_collection_uses_first_result() {
        let mut stub = StubMovies::default();
        stub.collections.insert(
            "Alien Collection".to_string(),
            vec![CollectionCandidate { id: 8091 }, CollectionCandidate { id: 1 }],
        );

        let mut resolver = Resolver::new(stub, StubSeries::default());
        assert_eq!(
            resolver.resolve_collection("Alien Collection").await.as_deref(),
            Some("https://example.test/collection/8091")
        );
    }

    #[tokio::test]
    async fn test_provider_faults_become_not_found() {
        let movies = StubMovies {
            fail: true,
            ..Default::default()
        };
        let series = StubSeries {
            fail: true,
            ..Default::default()
        };
        let mut resolver = Resolver::new(movies, series);

        assert_eq!(resolver.resolve_movie("Heat", "1995").await, Resolution::not_found());
        assert_eq!(resolver.resolve_series("Lost", "2004").await, Resolution::not_found());
        assert_eq!(resolver.resolve_collection("Alien Collection").await, None);
        assert_eq!(resolver.stats().errors, 3);
        assert_eq!(resolver.stats().not_found, 3);
    }

    #[tokio::test]
    async fn test_batch_resolution_keeps_entry_order() {
        let mut stub = StubMovies::default();
        stub.movies
            .insert("B".to_string(), vec![movie(2, Some("2001-01-01"))]);

        let entries = vec![MovieEntry::new("A", "2000"), MovieEntry::new("B", "2001")];
        let mut resolver = Resolver::new(stub, StubSeries::default());
        let resolved = resolver.resolve_movies(&entries).await;

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].entry, entries[0]);
        assert_eq!(resolved[0].link, None);
        assert_eq!(resolved[1].link.as_deref(), Some("https://example.test/movie/2"));
    }
}
