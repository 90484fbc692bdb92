use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::warn;

use super::cards::RawFieldSet;

static COORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(([-+]?[0-9]*\.?[0-9]+)\s*,\s*([-+]?[0-9]*\.?[0-9]+)\)").unwrap()
});

/// One placeable project. Exists only when both coordinates parsed;
/// every other field degrades instead of dropping the record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectRecord {
    pub title: String,
    pub contractor: String,
    pub start_date: String,
    pub cost: f64,
    pub latitude: f64,
    pub longitude: f64,
    /// Raw location string, kept for diagnostics.
    pub location_text: String,
}

/// RawFieldSet → typed record, or `None` when the location text carries
/// no coordinate pair (an unlocated record cannot be rendered).
pub fn normalize(raw: &RawFieldSet) -> Option<ProjectRecord> {
    let (latitude, longitude) = parse_coordinates(&raw.location)?;
    Some(ProjectRecord {
        title: raw.title.trim().to_string(),
        contractor: raw.contractor.trim().to_string(),
        start_date: raw.start_date.trim().to_string(),
        cost: parse_cost(&raw.cost, &raw.id),
        latitude,
        longitude,
        location_text: raw.location.clone(),
    })
}

/// First parenthesized signed-decimal pair in the text, e.g.
/// `(11.5531, 124.7341)`.
pub fn parse_coordinates(location: &str) -> Option<(f64, f64)> {
    let caps = COORD_RE.captures(location)?;
    let lat = caps[1].parse().ok()?;
    let lon = caps[2].parse().ok()?;
    Some((lat, lon))
}

/// Currency text → non-negative amount. Thousands separators and the peso
/// glyph are stripped; anything that still fails to parse (or is negative)
/// becomes 0 and is logged as a data-quality concern.
fn parse_cost(text: &str, id: &str) -> f64 {
    let cleaned: String = text.chars().filter(|c| *c != ',' && *c != '₱').collect();
    let cleaned = cleaned.trim();
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v,
        _ => {
            warn!("Project {}: unparseable cost {:?}, defaulting to 0", id, text);
            0.0
        }
    }
}

// ── Tests ──
