//! Cache and build statistics
//!
//! This module provides functionality for summarizing the page cache and a
//! finished build for the command line.

use crate::cache::CacheStore;
use crate::crawler::BuildReport;
use std::path::PathBuf;

/// Page cache summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStatistics {
    /// Location of the cache file
    pub path: PathBuf,

    /// Number of cached pages
    pub entries: usize,

    /// Bytes of URLs and bodies held in memory
    pub size_bytes: u64,

    /// Size of the cache file on disk, if it exists
    pub file_bytes: Option<u64>,
}

impl CacheStatistics {
    /// Collects statistics from a loaded cache
    pub fn collect(cache: &CacheStore) -> Self {
        Self {
            path: cache.path().to_path_buf(),
            entries: cache.len(),
            size_bytes: cache.size_bytes(),
            file_bytes: std::fs::metadata(cache.path()).ok().map(|m| m.len()),
        }
    }
}

/// Prints cache statistics to stdout
pub fn print_cache_statistics(stats: &CacheStatistics) {
    println!("=== Cache Statistics ===\n");
    println!("  Path: {}", stats.path.display());
    println!("  Cached pages: {}", stats.entries);
    println!("  Content size: {}", format_bytes(stats.size_bytes));
    match stats.file_bytes {
        Some(bytes) => println!("  File size: {}", format_bytes(bytes)),
        None => println!("  File size: (no cache file yet)"),
    }
}

/// Prints the directory listing and fetch counts of a build
pub fn print_build_summary(report: &BuildReport) {
    println!("=== State Directory ({} states) ===\n", report.directory.len());

    for state in report.directory.sorted() {
        println!("  {:<3} {:<28} {}", state.abbreviation(), state.name(), state.election_url());
    }

    if !report.skipped.is_empty() {
        println!("\nSkipped ({}):", report.skipped.len());
        for skipped in &report.skipped {
            println!("  - {}: {}", skipped.name, skipped.reason);
        }
    }

    println!(
        "\nPages: {} from cache, {} fetched",
        report.fetch_stats.hits, report.fetch_stats.misses
    );
}

/// Formats a byte count with a binary unit
fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
