//! Metadata provider clients.
//!
//! TMDb serves movies and collections, TVDb serves series. The resolver only
//! sees the [`MovieSource`] and [`SeriesSource`] traits, so tests can swap in
//! in-memory sources.

pub mod error;
pub mod http;
pub mod tmdb;
pub mod traits;
pub mod tvdb;
pub mod types;

pub use error::ProviderError;
pub use tmdb::TmdbClient;
pub use traits::{MovieSource, SeriesSource};
pub use tvdb::TvdbClient;
pub use types::{CollectionCandidate, MovieCandidate, SeriesCandidate};
