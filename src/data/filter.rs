use std::collections::HashSet;

use super::model::{FounderRecord, Record};

/// Selector value meaning "do not filter on this column".
pub const ALL: &str = "All";

// ---------------------------------------------------------------------------
// Equality constraints
// ---------------------------------------------------------------------------

/// `row[column] == value`, unless `value` is [`ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub column: String,
    pub value: String,
}

impl Constraint {
    pub fn new(column: &str, value: &str) -> Self {
        Self {
            column: column.to_string(),
            value: value.to_string(),
        }
    }

    pub fn is_all(&self) -> bool {
        self.value == ALL
    }

    fn matches<R: Record>(&self, record: &R) -> bool {
        record.text(&self.column).as_deref() == Some(self.value.as_str())
    }
}

/// Return the records that satisfy every active constraint, in input order.
///
/// A constraint is inactive when:
/// * its value is [`ALL`]
/// * `has_column` reports that its column is not part of the table
///
/// Records with a missing cell never match an active constraint.
pub fn apply_filters<R, F>(records: &[R], has_column: F, constraints: &[Constraint]) -> Vec<R>
where
    R: Record + Clone,
    F: Fn(&str) -> bool,
{
    let active: Vec<&Constraint> = constraints
        .iter()
        .filter(|c| !c.is_all() && has_column(&c.column))
        .collect();

    if active.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|r| active.iter().all(|c| c.matches(*r)))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Selector options
// ---------------------------------------------------------------------------

/// `"All"` followed by the distinct non-missing values of `column`, in
/// order of first appearance. `None` when the table has no such column.
pub fn filter_options<R: Record>(
    records: &[R],
    has_column: bool,
    column: &str,
) -> Option<Vec<String>> {
    if !has_column {
        return None;
    }
    let mut seen = HashSet::new();
    let mut options = vec![ALL.to_string()];
    for value in records.iter().filter_map(|r| r.text(column)) {
        if seen.insert(value.clone()) {
            options.push(value);
        }
    }
    Some(options)
}

// ---------------------------------------------------------------------------
// Year range
// ---------------------------------------------------------------------------

/// Founders whose year lies in `lo..=hi`.
pub fn filter_year_range(records: &[FounderRecord], lo: i32, hi: i32) -> Vec<FounderRecord> {
    records
        .iter()
        .filter(|r| (lo..=hi).contains(&r.year))
        .cloned()
        .collect()
}
