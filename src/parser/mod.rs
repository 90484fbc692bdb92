pub mod cards;
pub mod index;
pub mod normalize;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

pub use normalize::ProjectRecord;

/// Tallies from one extraction run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExtractStats {
    pub index_rows: usize,
    pub missing_card: usize,
    pub dropped_no_coords: usize,
    pub records: usize,
}

impl ExtractStats {
    pub fn print(&self) {
        println!(
            "Extracted {} records from {} index rows ({} without detail card, {} without coordinates).",
            self.records, self.index_rows, self.missing_card, self.dropped_no_coords,
        );
    }
}

/// Three-pass pipeline: document → index entries → raw fields → typed records.
pub fn extract_records(document: &str) -> (Vec<ProjectRecord>, ExtractStats) {
    let entries = index::index_entries(document);
    let cards = cards::card_table(document);

    let mut stats = ExtractStats {
        index_rows: entries.len(),
        ..Default::default()
    };

    let pb = ProgressBar::new(entries.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    let mut records = Vec::new();
    for entry in &entries {
        pb.inc(1);
        let Some(card) = cards.get(entry.id.as_str()) else {
            // Orphaned index row; the dataset has these.
            stats.missing_card += 1;
            continue;
        };
        let raw = cards::extract_fields(entry, card);
        match normalize::normalize(&raw) {
            Some(record) => records.push(record),
            None => {
                stats.dropped_no_coords += 1;
                warn!("Project {}: no coordinates in {:?}, dropped", entry.id, raw.location);
            }
        }
    }
    pb.finish_and_clear();

    stats.records = records.len();
    info!(
        "Extracted {} records ({} orphaned rows, {} dropped without coordinates)",
        stats.records, stats.missing_card, stats.dropped_no_coords
    );
    (records, stats)
}

// ── Tests ──
