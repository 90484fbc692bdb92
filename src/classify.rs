use crate::parser::ProjectRecord;

/// One cost range in the ordered bucket table. `upper` is exclusive;
/// the last rule must leave it `None` so the table covers all of [0, ∞).
#[derive(Debug, Clone)]
pub struct BucketRule {
    pub label: String,
    pub upper: Option<f64>,
    pub fill: String,
    pub show: bool,
}

#[derive(Debug, Clone)]
pub struct Outline {
    pub color: String,
    pub weight: u32,
}

/// One contractor group in the ordered decision list. Keywords are
/// uppercase prefixes tested against the uppercased contractor name;
/// list order is the tie-break when a name could match several groups.
#[derive(Debug, Clone)]
pub struct GroupRule {
    pub name: String,
    pub keywords: Vec<String>,
    pub outline: Outline,
}

pub struct Category<'a> {
    pub bucket: &'a BucketRule,
    pub group: Option<&'a GroupRule>,
}

pub fn classify<'a>(
    record: &ProjectRecord,
    buckets: &'a [BucketRule],
    groups: &'a [GroupRule],
) -> Option<Category<'a>> {
    let bucket = bucket_for(record.cost, buckets)?;
    let group = group_for(&record.contractor, groups);
    Some(Category { bucket, group })
}

/// First rule whose (exclusive) upper bound exceeds the cost. Returns the
/// last rule for costs past every bound, `None` only on an empty table.
pub fn bucket_for(cost: f64, buckets: &[BucketRule]) -> Option<&BucketRule> {
    buckets
        .iter()
        .find(|b| b.upper.map_or(true, |u| cost < u))
        .or_else(|| buckets.last())
}

pub fn group_for<'a>(contractor: &str, groups: &'a [GroupRule]) -> Option<&'a GroupRule> {
    let name = contractor.to_uppercase();
    groups
        .iter()
        .find(|g| g.keywords.iter().any(|kw| name.starts_with(kw.as_str())))
}

// ── Tests ──
