use std::path::PathBuf;

use crate::classify::{BucketRule, GroupRule, Outline};

/// Immutable knobs for one pipeline run. Built once in `main` and passed
/// by reference into every stage; nothing downstream mutates it.
#[derive(Debug, Clone)]
pub struct MapConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// (latitude, longitude) the map opens on.
    pub center: (f64, f64),
    pub zoom: u8,
    pub title: String,
    pub attribution: String,
    pub marker_radius: f64,
    pub fill_opacity: f64,
    /// Outline weight for records outside every contractor group.
    pub default_outline_weight: u32,
    /// Ordered cost ranges; the last entry must be unbounded.
    pub buckets: Vec<BucketRule>,
    /// Contractor groups in match-priority order.
    pub groups: Vec<GroupRule>,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            input: PathBuf::from("resources/all_national_data.txt"),
            output: PathBuf::from("index.html"),
            center: (11.5531, 124.7341),
            zoom: 6,
            title: "National Flood Control Projects (2020–2024)".to_string(),
            attribution: "Data from sumbongsapangulo.ph".to_string(),
            marker_radius: 8.0,
            fill_opacity: 0.7,
            default_outline_weight: 1,
            buckets: vec![
                bucket("<50M", Some(50_000_000.0), "grey", false),
                bucket("50M–100M", Some(100_000_000.0), "yellow", true),
                bucket("100M–200M", Some(200_000_000.0), "orange", true),
                bucket("200M+", None, "red", true),
            ],
            groups: vec![
                group("QM CORP", &["QM BUILDER", "QUIRANTE", "QG", "ADAMANT"], "black"),
                group("ZALDY CO", &["SUNWEST", "HI-TONE"], "blue"),
                group(
                    "DISCAYA",
                    &["ST. TIMOTHY", "ST. GERRARD", "ALPHA & OMEGA", "ST. MATTHEW"],
                    "red",
                ),
                group("LEGACY", &["LEGACY CONSTRUCTION"], "green"),
            ],
        }
    }
}

fn bucket(label: &str, upper: Option<f64>, fill: &str, show: bool) -> BucketRule {
    BucketRule {
        label: label.to_string(),
        upper,
        fill: fill.to_string(),
        show,
    }
}

fn group(name: &str, keywords: &[&str], color: &str) -> GroupRule {
    GroupRule {
        name: name.to_string(),
        // Stored uppercase; matching is prefix-on-uppercased-name.
        keywords: keywords.iter().map(|k| k.to_uppercase()).collect(),
        outline: Outline {
            color: color.to_string(),
            weight: 2,
        },
    }
}

// ── Tests ──
