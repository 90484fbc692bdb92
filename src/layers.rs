use serde::Serialize;
use tracing::warn;

use crate::classify;
use crate::config::MapConfig;
use crate::html;
use crate::parser::ProjectRecord;

/// One styled map point. Fill encodes the cost bucket, outline the
/// contractor group; the two axes stay independent on purpose.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub lat: f64,
    pub lon: f64,
    pub radius: f64,
    pub fill_color: String,
    pub fill_opacity: f64,
    pub outline_color: String,
    pub outline_weight: u32,
    pub tooltip: String,
    pub popup: String,
}

/// Legend square shown next to the layer checkbox.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Swatch {
    pub fill: String,
    pub border: String,
    pub border_weight: u32,
}

/// Named, independently toggleable collection of annotations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub name: String,
    pub show: bool,
    pub swatch: Swatch,
    pub markers: Vec<Annotation>,
}

/// Declare every layer up front (buckets first, then groups, in config
/// order), then place each record in exactly one: its group's layer when a
/// group matched, its cost bucket's layer otherwise.
pub fn build_layers(records: &[ProjectRecord], cfg: &MapConfig) -> Vec<Layer> {
    let mut layers: Vec<Layer> = Vec::new();
    for b in &cfg.buckets {
        layers.push(Layer {
            name: b.label.clone(),
            show: b.show,
            swatch: Swatch {
                fill: b.fill.clone(),
                border: "black".into(),
                border_weight: 1,
            },
            markers: Vec::new(),
        });
    }
    for g in &cfg.groups {
        layers.push(Layer {
            name: g.name.clone(),
            show: true,
            swatch: Swatch {
                fill: "white".into(),
                border: g.outline.color.clone(),
                border_weight: g.outline.weight,
            },
            markers: Vec::new(),
        });
    }

    for record in records {
        let Some(cat) = classify::classify(record, &cfg.buckets, &cfg.groups) else {
            warn!("No bucket table configured, skipping {:?}", record.title);
            continue;
        };
        let target = match cat.group {
            Some(g) => g.name.as_str(),
            None => cat.bucket.label.as_str(),
        };
        let annotation = annotate(record, &cat, cfg);
        if let Some(layer) = layers.iter_mut().find(|l| l.name == target) {
            layer.markers.push(annotation);
        }
    }

    layers
}

fn annotate(record: &ProjectRecord, cat: &classify::Category, cfg: &MapConfig) -> Annotation {
    let (outline_color, outline_weight) = match cat.group {
        Some(g) => (g.outline.color.clone(), g.outline.weight),
        None => (cat.bucket.fill.clone(), cfg.default_outline_weight),
    };
    Annotation {
        lat: record.latitude,
        lon: record.longitude,
        radius: cfg.marker_radius,
        fill_color: cat.bucket.fill.clone(),
        fill_opacity: cfg.fill_opacity,
        outline_color,
        outline_weight,
        tooltip: tooltip_html(record),
        popup: popup_html(record),
    }
}

fn tooltip_html(record: &ProjectRecord) -> String {
    format!(
        "<div style='text-align:center; max-width:600px; white-space: normal;'>\
         <span style='color:red; font-weight:bold; font-size:14px;'>{}</span><br>\
         <span style='font-size:10px;'>{}</span><br>\
         <span style='font-size:10px;'>{}</span></div>",
        format_peso(record.cost),
        html::escape(truncate(&record.contractor, 21)),
        html::escape(&record.start_date),
    )
}

fn popup_html(record: &ProjectRecord) -> String {
    format!(
        "<b>{}</b><br>\
         Contractor: {}<br>\
         Start Date: {}<br>\
         Cost: <span style=\"color:red; font-size:14px; font-weight:bold;\">{}</span><br>\
         <a href='https://www.google.com/maps?q={},{}' target='_blank' \
         style=\"color:#1a73e8; text-decoration:none; font-weight:bold;\">\
         📍 View on Google Maps</a>",
        html::escape(&record.title),
        html::escape(&record.contractor),
        html::escape(&record.start_date),
        format_peso(record.cost),
        record.latitude,
        record.longitude,
    )
}

/// Whole pesos with comma grouping: `₱150,000,000`. Costs are
/// non-negative by normalization.
pub fn format_peso(cost: f64) -> String {
    let whole = cost.round().max(0.0) as u64;
    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("₱{}", out)
}

/// First `max` characters, on char boundaries.
fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, contractor: &str, cost: f64) -> ProjectRecord {
        ProjectRecord {
            title: title.into(),
            contractor: contractor.into(),
            start_date: "2022-03-01".into(),
            cost,
            latitude: 11.5,
            longitude: 124.7,
            location_text: "(11.5, 124.7)".into(),
        }
    }

    #[test]
    fn layers_declared_in_order_with_visibility() {
        let layers = build_layers(&[], &MapConfig::default());
        let names: Vec<_> = layers.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(
            names,
            ["<50M", "50M–100M", "100M–200M", "200M+", "QM CORP", "ZALDY CO", "DISCAYA", "LEGACY"]
        );
        assert!(!layers[0].show);
        assert!(layers[1..].iter().all(|l| l.show));
    }

    #[test]
    fn group_layer_takes_precedence_over_bucket() {
        let cfg = MapConfig::default();
        let records = vec![record("Flood Wall A", "ST. TIMOTHY BUILDERS", 150_000_000.0)];
        let layers = build_layers(&records, &cfg);
        let discaya = layers.iter().find(|l| l.name == "DISCAYA").unwrap();
        assert_eq!(discaya.markers.len(), 1);
        let mid = layers.iter().find(|l| l.name == "100M–200M").unwrap();
        assert!(mid.markers.is_empty());
        // Fill still encodes the cost bucket, outline the group.
        assert_eq!(discaya.markers[0].fill_color, "orange");
        assert_eq!(discaya.markers[0].outline_color, "red");
        assert_eq!(discaya.markers[0].outline_weight, 2);
    }

    #[test]
    fn ungrouped_record_lands_in_its_bucket() {
        let cfg = MapConfig::default();
        let records = vec![record("Drainage C", "LOCAL BUILDER", 4_500_000.0)];
        let layers = build_layers(&records, &cfg);
        let low = layers.iter().find(|l| l.name == "<50M").unwrap();
        assert_eq!(low.markers.len(), 1);
        assert_eq!(low.markers[0].fill_color, "grey");
        assert_eq!(low.markers[0].outline_color, "grey");
        assert_eq!(low.markers[0].outline_weight, 1);
    }

    #[test]
    fn strict_partition_over_many_records() {
        let cfg = MapConfig::default();
        let records = vec![
            record("A", "ST. TIMOTHY BUILDERS", 150e6),
            record("B", "QM BUILDERS CORP", 10e6),
            record("C", "LOCAL BUILDER", 75e6),
            record("D", "SUNWEST INC", 300e6),
            record("E", "N/A", 0.0),
            record("F", "LEGACY CONSTRUCTION CORP", 120e6),
        ];
        let layers = build_layers(&records, &cfg);
        let total: usize = layers.iter().map(|l| l.markers.len()).sum();
        assert_eq!(total, records.len());
    }

    #[test]
    fn popup_carries_label_content() {
        let cfg = MapConfig::default();
        let layers = build_layers(&[record("Flood Wall A", "ST. TIMOTHY BUILDERS", 150e6)], &cfg);
        let m = &layers.iter().find(|l| l.name == "DISCAYA").unwrap().markers[0];
        assert!(m.popup.contains("Flood Wall A"));
        assert!(m.popup.contains("₱150,000,000"));
        assert!(m.popup.contains("https://www.google.com/maps?q=11.5,124.7"));
        assert!(m.tooltip.contains("2022-03-01"));
    }

    #[test]
    fn tooltip_truncates_contractor() {
        let cfg = MapConfig::default();
        let long_name = "VERY LONG CONTRACTOR NAME INCORPORATED";
        let layers = build_layers(&[record("X", long_name, 10e6)], &cfg);
        let m = &layers.iter().find(|l| l.name == "<50M").unwrap().markers[0];
        assert!(m.tooltip.contains("VERY LONG CONTRACTOR "));
        assert!(!m.tooltip.contains(long_name));
    }

    #[test]
    fn markup_in_fields_is_escaped() {
        let cfg = MapConfig::default();
        let layers = build_layers(&[record("<script>x</script>", "A & B", 10e6)], &cfg);
        let m = &layers.iter().find(|l| l.name == "<50M").unwrap().markers[0];
        assert!(m.popup.contains("&lt;script&gt;"));
        assert!(m.popup.contains("A &amp; B"));
    }

    #[test]
    fn peso_formatting() {
        assert_eq!(format_peso(0.0), "₱0");
        assert_eq!(format_peso(999.0), "₱999");
        assert_eq!(format_peso(1_000.0), "₱1,000");
        assert_eq!(format_peso(150_000_000.0), "₱150,000,000");
        assert_eq!(format_peso(4_500_000.5), "₱4,500,001");
    }
}
