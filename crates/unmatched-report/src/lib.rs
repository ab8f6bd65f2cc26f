//! Unmatched-assets report library.
//!
//! Parses the unmatched-assets log written by a media-library manager, looks
//! every movie, series and collection up on TMDb/TVDb, and writes grouped
//! report files split by media type and anime classification.

pub mod api;
pub mod classifier;
pub mod cleanup;
pub mod parser;
pub mod reporter;
pub mod resolver;
pub mod runner;

pub use api::{MovieSource, SeriesSource, TmdbClient, TvdbClient};
pub use classifier::Buckets;
pub use parser::{parse_file, parse_lines, LogParser, ParsedAssets};
pub use reporter::{ReportItem, Reporter};
pub use resolver::{Resolver, ResolverStats};
pub use runner::{ReportRunner, RunOptions, RunStats};
