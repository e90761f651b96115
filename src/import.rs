//! Catalog import from definition files
//!
//! Walks a directory for `*.catalog` files and loads every malt, hop and
//! commercial beer they define into the database. One entry per line:
//!
//! ```text
//! # comment
//! malt: Golden Promise | yield=79 | ebc=5.5
//! hop: Nelson Sauvin | aa=12.5
//! beer: Orval | Brasserie d'Orval | Saison | 6.2 | herbal, spice, citrus
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use rusqlite::Connection;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::db;
use crate::models::{CommercialBeer, HopSpec, MaltSpec, Style};

const CATALOG_EXTENSION: &str = "catalog";

/// Entries parsed from a single definition file
#[derive(Debug, Default)]
struct ParsedCatalog {
    malts: Vec<MaltSpec>,
    hops: Vec<HopSpec>,
    beers: Vec<CommercialBeer>,
    rejected: usize,
}

struct LinePatterns {
    malt: Regex,
    hop: Regex,
    beer: Regex,
}

impl LinePatterns {
    fn new() -> Result<Self> {
        Ok(Self {
            malt: Regex::new(
                r"(?i)^malt\s*:\s*(.+?)\s*\|\s*yield\s*=\s*([\d.]+)\s*%?\s*\|\s*ebc\s*=\s*([\d.]+)\s*$",
            )?,
            hop: Regex::new(r"(?i)^hop\s*:\s*(.+?)\s*\|\s*aa\s*=\s*([\d.]+)\s*%?\s*$")?,
            beer: Regex::new(
                r"(?i)^beer\s*:\s*(.+?)\s*\|\s*(.+?)\s*\|\s*(\w+)\s*\|\s*([\d.]+)\s*%?\s*\|\s*(.*?)\s*$",
            )?,
        })
    }
}

/// Find all catalog definition files below `dir`, in a stable order
pub fn find_catalog_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if entry.file_type().is_file()
            && path.extension().is_some_and(|ext| ext == CATALOG_EXTENSION)
        {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

fn parse_percent(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| (0.0..=100.0).contains(v))
}

/// Parse one definition file
fn parse_catalog_file(filepath: &Path, patterns: &LinePatterns) -> Result<ParsedCatalog> {
    let content = fs::read_to_string(filepath)
        .with_context(|| format!("Failed to read {}", filepath.display()))?;

    let mut parsed = ParsedCatalog::default();

    for (index, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(cap) = patterns.malt.captures(line) {
            let color = cap[3].parse::<f64>().ok();
            if let (Some(yield_percent), Some(color_ebc)) = (parse_percent(&cap[2]), color) {
                parsed.malts.push(MaltSpec {
                    name: cap[1].to_string(),
                    extraction_yield_percent: yield_percent,
                    color_ebc,
                });
                continue;
            }
        } else if let Some(cap) = patterns.hop.captures(line) {
            if let Some(alpha) = parse_percent(&cap[2]) {
                parsed.hops.push(HopSpec {
                    name: cap[1].to_string(),
                    alpha_acid_percent: alpha,
                });
                continue;
            }
        } else if let Some(cap) = patterns.beer.captures(line) {
            let style = cap[3].parse::<Style>().ok();
            if let (Some(style), Some(abv)) = (style, parse_percent(&cap[4])) {
                parsed.beers.push(CommercialBeer {
                    name: cap[1].to_string(),
                    brewery: cap[2].to_string(),
                    style,
                    abv,
                    flavor_notes: cap[5].to_string(),
                });
                continue;
            }
        }

        warn!(file = %filepath.display(), line = index + 1, "skipping unrecognized catalog entry");
        parsed.rejected += 1;
    }

    Ok(parsed)
}

/// Write one parsed file in a single transaction
fn store_parsed(conn: &mut Connection, parsed: &ParsedCatalog) -> Result<()> {
    let tx = conn.transaction()?;
    for malt in &parsed.malts {
        db::upsert_malt(&tx, malt)?;
    }
    for hop in &parsed.hops {
        db::upsert_hop(&tx, hop)?;
    }
    for beer in &parsed.beers {
        db::upsert_commercial_beer(&tx, beer)?;
    }
    tx.commit()?;
    Ok(())
}

/// Import all catalog files below `dir` into the database
///
/// Each file is written atomically; importing the same files again
/// updates entries rather than duplicating them.
pub fn import_to_database(conn: &mut Connection, dir: &Path) -> Result<ImportStats> {
    let mut stats = ImportStats::default();
    let patterns = LinePatterns::new()?;

    info!(dir = %dir.display(), "scanning for catalog files");
    let files = find_catalog_files(dir)?;
    info!(count = files.len(), "found catalog files");

    for filepath in &files {
        match parse_catalog_file(filepath, &patterns) {
            Ok(parsed) => {
                store_parsed(conn, &parsed)
                    .with_context(|| format!("Failed to store {}", filepath.display()))?;

                stats.files += 1;
                stats.malts += parsed.malts.len();
                stats.hops += parsed.hops.len();
                stats.beers += parsed.beers.len();
                stats.rejected += parsed.rejected;

                info!(
                    file = %filepath.display(),
                    malts = parsed.malts.len(),
                    hops = parsed.hops.len(),
                    beers = parsed.beers.len(),
                    "imported"
                );
            }
            Err(e) => {
                warn!(file = %filepath.display(), error = %e, "failed to import catalog file");
                stats.errors += 1;
            }
        }
    }

    Ok(stats)
}

#[derive(Debug, Default)]
pub struct ImportStats {
    pub files: usize,
    pub malts: usize,
    pub hops: usize,
    pub beers: usize,
    pub rejected: usize,
    pub errors: usize,
}

impl std::fmt::Display for ImportStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Imported {} files ({} malts, {} hops, {} beers). Rejected lines: {}, Errors: {}",
            self.files, self.malts, self.hops, self.beers, self.rejected, self.errors
        )
    }
}
