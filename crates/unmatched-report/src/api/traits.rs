use super::error::Result;
use super::types::{CollectionCandidate, MovieCandidate, SeriesCandidate};
use async_trait::async_trait;

/// Movie and collection metadata (TMDb)
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// Provider identifier used in logs and report files
    fn id(&self) -> &'static str;

    /// Search movies by title, in provider ranking order
    async fn search_movies(&self, query: &str) -> Result<Vec<MovieCandidate>>;

    /// Keyword names attached to a movie
    async fn movie_keywords(&self, movie_id: i64) -> Result<Vec<String>>;

    /// Search collections by name, in provider ranking order
    async fn search_collections(&self, query: &str) -> Result<Vec<CollectionCandidate>>;

    /// Canonical public URL of a movie
    fn movie_url(&self, movie_id: i64) -> String;

    /// Canonical public URL of a collection
    fn collection_url(&self, collection_id: i64) -> String;
}

/// Series metadata (TVDb)
#[async_trait]
pub trait SeriesSource: Send + Sync {
    /// Provider identifier used in logs and report files
    fn id(&self) -> &'static str;

    /// Search series by title, in provider ranking order
    async fn search_series(&self, query: &str) -> Result<Vec<SeriesCandidate>>;

    /// Genre names of a series
    async fn series_genres(&self, series_id: &str) -> Result<Vec<String>>;

    /// Canonical public URL of a series
    fn series_url(&self, slug: &str) -> String;
}
