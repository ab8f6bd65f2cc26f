//! Provider response types.
//!
//! Only the fields the resolver reads are modelled; everything else in the
//! responses is ignored.

use serde::{Deserialize, Serialize};

/// A movie search hit, as seen by the resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCandidate {
    pub id: i64,
    pub release_date: Option<String>,
}

/// A series search hit, as seen by the resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesCandidate {
    pub id: String,
    pub slug: String,
    pub first_aired: Option<String>,
}

/// A collection search hit, as seen by the resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionCandidate {
    pub id: i64,
}

// ========== TMDb ==========

/// TMDb paginated search wrapper
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct TmdbSearchResponse<T> {
    #[serde(default)]
    pub results: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieResult {
    pub id: i64,
    #[serde(default)]
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCollectionResult {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbKeywordsResponse {
    #[serde(default)]
    pub keywords: Vec<TmdbKeyword>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbKeyword {
    pub name: String,
}

impl From<TmdbMovieResult> for MovieCandidate {
    fn from(result: TmdbMovieResult) -> Self {
        Self {
            id: result.id,
            release_date: result.release_date,
        }
    }
}

impl From<TmdbCollectionResult> for CollectionCandidate {
    fn from(result: TmdbCollectionResult) -> Self {
        Self { id: result.id }
    }
}

// ========== TVDb ==========

/// TVDb v4 envelope
#[derive(Debug, Clone, Deserialize)]
pub struct TvdbResponse<T> {
    #[serde(default)]
    pub status: Option<String>,
    pub data: Option<T>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TvdbLoginRequest<'a> {
    pub apikey: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin: Option<&'a str>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TvdbLoginData {
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TvdbSearchResult {
    pub tvdb_id: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, alias = "firstAired")]
    pub first_air_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TvdbSeriesExtended {
    #[serde(default)]
    pub genres: Vec<TvdbGenre>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TvdbGenre {
    pub name: String,
}

impl From<TvdbSearchResult> for SeriesCandidate {
    fn from(result: TvdbSearchResult) -> Self {
        let slug = result.slug.unwrap_or_else(|| result.tvdb_id.clone());
        Self {
            id: result.tvdb_id,
            slug,
            first_aired: result.first_air_time,
        }
    }
}
