use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::index::IndexEntry;
use crate::html;

static TEMPLATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<template\b[^>]*\bid="proj-card-([^"]+)"[^>]*>(.*?)</template>"#).unwrap()
});
static LOCATION_DIV_RE: LazyLock<Regex> = LazyLock::new(|| field_div("longi"));
static CONTRACTOR_DIV_RE: LazyLock<Regex> = LazyLock::new(|| field_div("contractor"));
static COST_DIV_RE: LazyLock<Regex> = LazyLock::new(|| field_div("const"));
static DATE_DIV_RE: LazyLock<Regex> = LazyLock::new(|| field_div("start-date"));
static SPAN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<span[^>]*>(.*?)</span>").unwrap());
static P_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<p[^>]*>(.*?)</p>").unwrap());

fn field_div(class: &str) -> Regex {
    Regex::new(&format!(
        r#"(?s)<div\b[^>]*\bclass="[^"]*\b{}\b[^"]*"[^>]*>(.*?)</div>"#,
        regex::escape(class)
    ))
    .unwrap()
}

/// Raw per-project field texts, one step short of typed values. Missing
/// structural paths degrade to sentinels here; nothing in a card is fatal.
#[derive(Debug, Clone)]
pub struct RawFieldSet {
    pub id: String,
    pub title: String,
    pub location: String,
    pub contractor: String,
    pub cost: String,
    pub start_date: String,
}

/// Detail fragments keyed by project id (the `proj-card-` prefix is part
/// of the template id, not of the key).
pub fn card_table(document: &str) -> HashMap<String, &str> {
    TEMPLATE_RE
        .captures_iter(document)
        .filter_map(|caps| {
            let id = caps.get(1)?.as_str().to_string();
            Some((id, caps.get(2)?.as_str()))
        })
        .collect()
}

/// Pull the four sub-fields out of one detail fragment. Each path is
/// independent and optional.
pub fn extract_fields(entry: &IndexEntry, card: &str) -> RawFieldSet {
    RawFieldSet {
        id: entry.id.clone(),
        title: entry.title.clone(),
        location: field_text(card, &LOCATION_DIV_RE, &SPAN_RE).unwrap_or_else(|| "Unknown".into()),
        contractor: field_text(card, &CONTRACTOR_DIV_RE, &P_RE).unwrap_or_else(|| "N/A".into()),
        cost: field_text(card, &COST_DIV_RE, &SPAN_RE).unwrap_or_else(|| "0".into()),
        start_date: field_text(card, &DATE_DIV_RE, &SPAN_RE).unwrap_or_else(|| "Unknown".into()),
    }
}

/// Text of the first `inner_re` element inside the first `div_re` block,
/// or `None` when either structural step is absent.
fn field_text(card: &str, div_re: &Regex, inner_re: &Regex) -> Option<String> {
    let block = div_re.captures(card)?.get(1)?.as_str();
    let inner = inner_re.captures(block)?.get(1)?.as_str();
    Some(html::text(inner))
}

// ── Tests ──
