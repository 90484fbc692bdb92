use std::sync::LazyLock;

use regex::Regex;

use crate::html;

static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<a\b([^>]*\bclass="[^"]*\bload-project-card\b[^"]*"[^>]*)>(.*?)</a>"#)
        .unwrap()
});
static DATA_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"\bdata-id="([^"]+)""#).unwrap());

/// One clickable row of the project index: the id keys the detail
/// fragment, the anchor text is the display title.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub id: String,
    pub title: String,
}

/// All index rows in document order. Anchors without a data-id cannot be
/// joined to a detail fragment and are skipped.
pub fn index_entries(document: &str) -> Vec<IndexEntry> {
    ANCHOR_RE
        .captures_iter(document)
        .filter_map(|caps| {
            let id = DATA_ID_RE.captures(&caps[1]).map(|c| c[1].to_string())?;
            Some(IndexEntry {
                id,
                title: html::text(&caps[2]),
            })
        })
        .collect()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_with_id_and_title() {
        let doc = r##"<tr><td class="desc-a"><a class="load-project-card" data-id="42" href="#">Flood Wall A</a></td></tr>"##;
        let entries = index_entries(doc);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "42");
        assert_eq!(entries[0].title, "Flood Wall A");
    }

    #[test]
    fn attribute_order_does_not_matter() {
        let doc = r#"<a data-id="7" class="btn load-project-card small">Dike</a>"#;
        let entries = index_entries(doc);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "7");
    }

    #[test]
    fn anchor_without_data_id_is_skipped() {
        let doc = r#"<a class="load-project-card">No id here</a>"#;
        assert!(index_entries(doc).is_empty());
    }

    #[test]
    fn unrelated_anchors_ignored() {
        let doc = r#"<a class="nav-link" data-id="9">Home</a>"#;
        assert!(index_entries(doc).is_empty());
    }

    #[test]
    fn nested_markup_in_title_stripped() {
        let doc = r#"<a class="load-project-card" data-id="3"><b>Seawall</b> &amp; Dike</a>"#;
        let entries = index_entries(doc);
        assert_eq!(entries[0].title, "Seawall & Dike");
    }
}
