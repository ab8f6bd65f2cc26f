//! Console summary and batch file output.
//!
//! Every bucket is printed as one line per item and written to
//! `<item_type>-<N>.txt` files holding at most `batch_size` entries each.

use crate::classifier::Buckets;
use anyhow::{Context, Result};
use shared::{ItemType, OutputPaths, ResolvedCollection, ResolvedMovie, ResolvedSeries};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

const NOT_FOUND: &str = "Not found";
const MISSING_POSTER: &str = "Missing poster";

/// A resolved item that can be printed and written to a batch file
pub trait ReportItem {
    /// Console lines for the item, without trailing newlines
    fn console_lines(&self, item_type: ItemType) -> Vec<String>;

    /// Text block of the item inside a batch file, including its blank separator
    fn render(&self) -> String;
}

fn missing_seasons_line(seasons: &[String]) -> Option<String> {
    (!seasons.is_empty()).then(|| format!("Missing seasons: {}", seasons.join(", ")))
}

impl ReportItem for ResolvedMovie {
    fn console_lines(&self, item_type: ItemType) -> Vec<String> {
        vec![format!(
            "{} - {} ({}): {}",
            item_type.console_label(),
            self.entry.name,
            self.entry.year,
            self.link.as_deref().unwrap_or(NOT_FOUND)
        )]
    }

    fn render(&self) -> String {
        format!(
            "{} ({})\ntmdb: {}\n\n",
            self.entry.name,
            self.entry.year,
            self.link.as_deref().unwrap_or(NOT_FOUND)
        )
    }
}

impl ReportItem for ResolvedSeries {
    fn console_lines(&self, item_type: ItemType) -> Vec<String> {
        let mut lines = vec![format!(
            "{} - {} ({}): {}",
            item_type.console_label(),
            self.entry.name,
            self.entry.year,
            self.link.as_deref().unwrap_or(NOT_FOUND)
        )];
        if let Some(seasons) = missing_seasons_line(&self.entry.missing_seasons) {
            lines.push(format!("  {}", seasons));
        }
        lines
    }

    fn render(&self) -> String {
        let mut block = format!(
            "{} ({})\ntvdb: {}\n",
            self.entry.name,
            self.entry.year,
            self.link.as_deref().unwrap_or(NOT_FOUND)
        );
        match missing_seasons_line(&self.entry.missing_seasons) {
            Some(seasons) => {
                block.push_str(&seasons);
                block.push_str("\n\n");
            }
            None => block.push('\n'),
        }
        block
    }
}

impl ReportItem for ResolvedCollection {
    fn console_lines(&self, item_type: ItemType) -> Vec<String> {
        vec![format!(
            "{} - {}: {}",
            item_type.console_label(),
            self.entry.name,
            self.link.as_deref().unwrap_or(MISSING_POSTER)
        )]
    }

    fn render(&self) -> String {
        format!(
            "{}\ntmdb: {}\n\n",
            self.entry.name,
            self.link.as_deref().unwrap_or(NOT_FOUND)
        )
    }
}

/// Files written during one report
#[derive(Debug, Clone, Default)]
pub struct ReportStats {
    pub files_written: Vec<PathBuf>,
    pub items_written: usize,
}

/// Writes console summaries and batch files
pub struct Reporter {
    paths: OutputPaths,
    batch_size: usize,
}

impl Reporter {
    pub fn new(paths: OutputPaths, batch_size: usize) -> Self {
        Self {
            paths,
            batch_size: batch_size.max(1),
        }
    }

    /// Print every bucket in reporting order
    pub fn print_summary(&self, out: &mut impl Write, buckets: &Buckets) -> std::io::Result<()> {
        print_items(out, ItemType::Movies, &buckets.movies)?;
        print_items(out, ItemType::AnimeMovies, &buckets.anime_movies)?;
        print_items(out, ItemType::Series, &buckets.series)?;
        print_items(out, ItemType::AnimeSeries, &buckets.anime_series)?;
        print_items(out, ItemType::Collections, &buckets.collections)?;
        Ok(())
    }

    /// Write batch files for every bucket
    pub fn write_files(&self, buckets: &Buckets) -> Result<ReportStats> {
        self.paths.create_dirs().with_context(|| {
            format!("Failed to create output directory: {}", self.paths.root().display())
        })?;

        let mut stats = ReportStats::default();
        self.write_into(&mut stats, ItemType::Movies, &buckets.movies)?;
        self.write_into(&mut stats, ItemType::Series, &buckets.series)?;
        self.write_into(&mut stats, ItemType::Collections, &buckets.collections)?;
        self.write_into(&mut stats, ItemType::AnimeMovies, &buckets.anime_movies)?;
        self.write_into(&mut stats, ItemType::AnimeSeries, &buckets.anime_series)?;

        info!(
            files = stats.files_written.len(),
            items = stats.items_written,
            output_dir = %self.paths.root().display(),
            "Report files written"
        );
        Ok(stats)
    }

    fn write_into<T: ReportItem>(
        &self,
        stats: &mut ReportStats,
        item_type: ItemType,
        items: &[T],
    ) -> Result<()> {
        let files = self.write_batches(item_type, items)?;
        stats.files_written.extend(files);
        stats.items_written += items.len();
        Ok(())
    }

    /// Write `items` in chunks of at most `batch_size`, returning the files created in order
    pub fn write_batches<T: ReportItem>(
        &self,
        item_type: ItemType,
        items: &[T],
    ) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for (idx, chunk) in items.chunks(self.batch_size).enumerate() {
            let path = self.paths.batch_file(item_type, idx + 1);
            let content: String = chunk.iter().map(ReportItem::render).collect();

            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write report file: {}", path.display()))?;

            debug!(path = %path.display(), items = chunk.len(), "Wrote batch file");
            files.push(path);
        }

        Ok(files)
    }
}

fn print_items<T: ReportItem>(
    out: &mut impl Write,
    item_type: ItemType,
    items: &[T],
) -> std::io::Result<()> {
    for item in items {
        for line in item.console_lines(item_type) {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{CollectionEntry, MovieEntry, Resolution, SeriesEntry};
    use tempfile::TempDir;

    fn movie(name: &str, year: &str, link: Option<&str>) -> ResolvedMovie {
        ResolvedMovie::new(
            MovieEntry::new(name, year),
            Resolution {
                link: link.map(str::to_string),
                is_anime: false,
            },
        )
    }

    fn series(name: &str, seasons: &[&str], link: Option<&str>) -> ResolvedSeries {
        ResolvedSeries::new(
            SeriesEntry::new(name, "2004", seasons.iter().map(|s| s.to_string()).collect()),
            Resolution {
                link: link.map(str::to_string),
                is_anime: false,
            },
        )
    }

    #[test]
    fn test_movie_file_block() {
        let item = movie("Inception", "2010", Some("https://example.test/1"));
        assert_eq!(item.render(), "Inception (2010)\ntmdb: https://example.test/1\n\n");
    }

    #[test]
    fn test_series_file_block_has_single_blank_separator() {
        let with_seasons = series("Lost", &["1", "3"], Some("https://example.test/lost"));
        assert_eq!(
            with_seasons.render(),
            "Lost (2004)\ntvdb: https://example.test/lost\nMissing seasons: 1, 3\n\n"
        );

        let without = series("Lost", &[], None);
        assert_eq!(without.render(), "Lost (2004)\ntvdb: Not found\n\n");
    }

    #[test]
    fn test_collection_lines() {
        let item = ResolvedCollection {
            entry: CollectionEntry::new("Alien Collection"),
            link: None,
        };
        assert_eq!(
            item.console_lines(ItemType::Collections),
            vec!["Collection - Alien Collection: Missing poster"]
        );
        assert_eq!(item.render(), "Alien Collection\ntmdb: Not found\n\n");
    }

    #[test]
    fn test_console_summary_order_and_format() {
        let buckets = Buckets {
            movies: vec![movie("Heat", "1995", None)],
            anime_movies: vec![movie("Akira", "1988", Some("https://example.test/akira"))],
            series: vec![series("Lost", &["2"], Some("https://example.test/lost"))],
            anime_series: vec![series("Naruto", &[], None)],
            collections: vec![ResolvedCollection {
                entry: CollectionEntry::new("Ghibli"),
                link: Some("https://example.test/ghibli".to_string()),
            }],
        };
        let reporter = Reporter::new(OutputPaths::new("unused"), 5);

        let mut out = Vec::new();
        reporter.print_summary(&mut out, &buckets).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Movie - Heat (1995): Not found\n\
             Anime Movie - Akira (1988): https://example.test/akira\n\
             Series - Lost (2004): https://example.test/lost\n\
             \x20 Missing seasons: 2\n\
             Anime - Naruto (2004): Not found\n\
             Collection - Ghibli: https://example.test/ghibli\n"
        );
    }

    #[test]
    fn test_batches_of_five() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let reporter = Reporter::new(OutputPaths::new(temp_dir.path()), 5);
        let items: Vec<ResolvedMovie> = (0..12)
            .map(|i| movie(&format!("Movie {}", i), "2000", None))
            .collect();

        let files = reporter.write_batches(ItemType::Movies, &items)?;

        assert_eq!(files.len(), 3);
        assert_eq!(files[2], temp_dir.path().join("movies-3.txt"));

        let mut combined = String::new();
        for (idx, file) in files.iter().enumerate() {
            let content = std::fs::read_to_string(file)?;
            let entries = content.matches("tmdb: ").count();
            assert_eq!(entries, if idx < 2 { 5 } else { 2 });
            combined.push_str(&content);
        }
        let expected: String = items.iter().map(ReportItem::render).collect();
        assert_eq!(combined, expected);

        Ok(())
    }

    #[test]
    fn test_no_items_writes_no_files() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let reporter = Reporter::new(OutputPaths::new(temp_dir.path()), 5);

        let files = reporter.write_batches::<ResolvedMovie>(ItemType::Movies, &[])?;
        assert!(files.is_empty());
        assert_eq!(std::fs::read_dir(temp_dir.path())?.count(), 0);

        Ok(())
    }

    #[test]
    fn test_write_files_uses_bucket_names() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let reporter = Reporter::new(OutputPaths::new(temp_dir.path().join("out")), 5);
        let buckets = Buckets {
            anime_series: vec![series("Naruto", &["1"], None)],
            movies: vec![movie("Inception", "2010", Some("https://example.test/1"))],
            ..Default::default()
        };

        let stats = reporter.write_files(&buckets)?;

        assert_eq!(stats.items_written, 2);
        assert_eq!(
            stats.files_written,
            vec![
                temp_dir.path().join("out/movies-1.txt"),
                temp_dir.path().join("out/anime_series-1.txt"),
            ]
        );
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("out/movies-1.txt"))?,
            "Inception (2010)\ntmdb: https://example.test/1\n\n"
        );

        Ok(())
    }
}
