//! Main report orchestrator.
//!
//! Coordinates one run: clean old output, parse the log, resolve every entry,
//! classify, then print and write the report.

use crate::api::{MovieSource, SeriesSource};
use crate::classifier::Buckets;
use crate::cleanup;
use crate::parser;
use crate::reporter::Reporter;
use crate::resolver::{Resolver, ResolverStats};
use anyhow::{Context, Result};
use shared::OutputPaths;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Statistics for one run
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub stale_files_removed: usize,
    pub movies: usize,
    pub anime_movies: usize,
    pub series: usize,
    pub anime_series: usize,
    pub collections: usize,
    pub resolver: ResolverStats,
    pub files_written: Vec<PathBuf>,
}

/// Options controlling a run
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub log_file: PathBuf,
    pub output_dir: PathBuf,
    pub batch_size: usize,
    pub cleanup: bool,
}

/// Report coordinator
pub struct ReportRunner<M, S> {
    resolver: Resolver<M, S>,
    options: RunOptions,
}

impl<M: MovieSource, S: SeriesSource> ReportRunner<M, S> {
    pub fn new(resolver: Resolver<M, S>, options: RunOptions) -> Self {
        Self { resolver, options }
    }

    /// Run the complete report, printing the console summary to `out`
    pub async fn run(&mut self, out: &mut impl Write) -> Result<RunStats> {
        let mut stats = RunStats::default();
        let paths = OutputPaths::new(&self.options.output_dir);

        if self.options.cleanup {
            stats.stale_files_removed =
                cleanup::remove_stale_outputs(&paths).context("Failed to clean previous output")?;
        }

        info!(log_file = %self.options.log_file.display(), "Phase 1: Parsing log");
        let parsed = parser::parse_file(&self.options.log_file)?;

        info!(
            movies = parsed.movies.len(),
            series = parsed.series.len(),
            collections = parsed.collections.len(),
            "Phase 2: Resolving entries"
        );
        let movies = self.resolver.resolve_movies(&parsed.movies).await;
        let series = self.resolver.resolve_all_series(&parsed.series).await;
        let collections = self.resolver.resolve_collections(&parsed.collections).await;
        stats.resolver = self.resolver.stats().clone();

        let buckets = Buckets::classify(movies, series, collections);
        stats.movies = buckets.movies.len();
        stats.anime_movies = buckets.anime_movies.len();
        stats.series = buckets.series.len();
        stats.anime_series = buckets.anime_series.len();
        stats.collections = buckets.collections.len();

        info!("Phase 3: Writing report");
        let reporter = Reporter::new(paths, self.options.batch_size);
        reporter
            .print_summary(out, &buckets)
            .context("Failed to print report summary")?;
        stats.files_written = reporter.write_files(&buckets)?.files_written;

        info!(
            movies = stats.movies,
            anime_movies = stats.anime_movies,
            series = stats.series,
            anime_series = stats.anime_series,
            collections = stats.collections,
            not_found = stats.resolver.not_found,
            provider_errors = stats.resolver.errors,
            files = stats.files_written.len(),
            "Report complete"
        );

        Ok(stats)
    }
}
