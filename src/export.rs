use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::parser::ProjectRecord;

const HEADER: &[&str] = &[
    "Title",
    "Contractor",
    "Start Date",
    "Cost",
    "Latitude",
    "Longitude",
    "Location",
];

/// CSV rendition of the record table: header row plus one row per record.
pub fn to_csv(records: &[ProjectRecord]) -> String {
    let mut out = String::new();
    write_row(&mut out, &HEADER.iter().map(|h| h.to_string()).collect::<Vec<_>>());
    for r in records {
        write_row(
            &mut out,
            &[
                r.title.clone(),
                r.contractor.clone(),
                r.start_date.clone(),
                r.cost.to_string(),
                r.latitude.to_string(),
                r.longitude.to_string(),
                r.location_text.clone(),
            ],
        );
    }
    out
}

/// Write the export file. Failure is fatal for the run.
pub fn write_csv(path: &Path, records: &[ProjectRecord]) -> Result<()> {
    fs::write(path, to_csv(records))
        .with_context(|| format!("Failed to write export to {}", path.display()))?;
    Ok(())
}

fn write_row(out: &mut String, row: &[String]) {
    let mut first = true;
    for cell in row {
        if !first {
            out.push(',');
        } else {
            first = false;
        }
        if needs_quotes(cell) {
            out.push('"');
            out.push_str(&cell.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(cell);
        }
    }
    out.push('\n');
}

fn needs_quotes(cell: &str) -> bool {
    cell.contains(',') || cell.contains('"') || cell.contains('\n') || cell.contains('\r')
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ProjectRecord {
        ProjectRecord {
            title: "Flood Wall A".into(),
            contractor: "ST. TIMOTHY BUILDERS".into(),
            start_date: "2022-03-01".into(),
            cost: 150_000_000.0,
            latitude: 11.5,
            longitude: 124.7,
            location_text: "(11.5, 124.7)".into(),
        }
    }

    #[test]
    fn header_and_one_row() {
        let csv = to_csv(&[record()]);
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Title,Contractor,Start Date,Cost,Latitude,Longitude,Location");
        assert_eq!(
            lines[1],
            "Flood Wall A,ST. TIMOTHY BUILDERS,2022-03-01,150000000,11.5,124.7,\"(11.5, 124.7)\""
        );
    }

    #[test]
    fn commas_and_quotes_are_quoted() {
        let mut r = record();
        r.title = "Dike, Phase \"2\"".into();
        let csv = to_csv(&[r]);
        assert!(csv.contains("\"Dike, Phase \"\"2\"\"\""));
    }

    #[test]
    fn empty_set_is_header_only() {
        let csv = to_csv(&[]);
        assert_eq!(csv.lines().count(), 1);
    }
}
