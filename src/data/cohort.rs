use anyhow::{Result, bail};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::model::{COHORT, CellValue, FACULTY, FounderRecord, FoundersSchema, FoundersTable, Table};

/// First run of ASCII digits in a cohort label. Other scripts' digits are
/// ordinary characters here.
static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("valid digit regex"));

pub const DEFAULT_START_YEAR: i32 = 2019;
pub const DEFAULT_CURRENT_LABEL: &str = "Current";
pub const DEFAULT_CURRENT_COHORT: u32 = 12;
pub const DEFAULT_SENTINELS: [&str; 2] = ["Cactus Academy", "Checks"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CohortError {
    #[error("cohort numbers start at 1, got {0}")]
    NonPositive(u32),
    #[error("cohort {cohort} does not map to a representable year from {start_year}")]
    YearOverflow { cohort: u32, start_year: i32 },
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// How raw cohort labels are mapped to cohort numbers and calendar years.
#[derive(Debug, Clone, PartialEq)]
pub struct CohortRules {
    /// Labels that mark a row as not belonging to any numbered cohort.
    pub sentinels: Vec<String>,
    /// Label standing for the cohort currently running.
    pub current_label: String,
    pub current_cohort: u32,
    /// Calendar year of cohorts 1 and 2.
    pub start_year: i32,
}

impl Default for CohortRules {
    fn default() -> Self {
        Self {
            sentinels: DEFAULT_SENTINELS.iter().map(|s| s.to_string()).collect(),
            current_label: DEFAULT_CURRENT_LABEL.to_string(),
            current_cohort: DEFAULT_CURRENT_COHORT,
            start_year: DEFAULT_START_YEAR,
        }
    }
}

impl CohortRules {
    /// Map a raw cohort cell to a cohort number.
    ///
    /// Checks run in a fixed order: missing or sentinel, then the "current"
    /// label, then the first digit run. A digit run that does not fit a
    /// `u32` yields `None` like any other unusable label.
    pub fn normalize(&self, raw: &CellValue) -> Option<u32> {
        let text = raw.as_text()?;
        if self.sentinels.iter().any(|s| *s == text) {
            return None;
        }
        if text == self.current_label {
            return Some(self.current_cohort);
        }
        let run = DIGIT_RUN.find(&text)?;
        match run.as_str().parse::<u32>() {
            Ok(n) => Some(n),
            Err(e) => {
                log::debug!("Cohort label {text:?}: digit run {:?} unusable: {e}", run.as_str());
                None
            }
        }
    }

    pub fn year_of(&self, cohort: u32) -> Result<i32, CohortError> {
        cohort_to_year(cohort, self.start_year)
    }
}

// ---------------------------------------------------------------------------
// Free functions with the default rules
// ---------------------------------------------------------------------------

/// Normalize with the default sentinel set and `"Current"` → 12.
pub fn normalize_cohort(raw: &CellValue) -> Option<u32> {
    static RULES: Lazy<CohortRules> = Lazy::new(CohortRules::default);
    RULES.normalize(raw)
}

/// Two cohorts per calendar year: 1 and 2 fall in `start_year`, 3 and 4 in
/// the year after, and so on.
pub fn cohort_to_year(cohort: u32, start_year: i32) -> Result<i32, CohortError> {
    if cohort == 0 {
        return Err(CohortError::NonPositive(cohort));
    }
    let offset = (cohort - 1) / 2;
    i32::try_from(offset)
        .ok()
        .and_then(|o| start_year.checked_add(o))
        .ok_or(CohortError::YearOverflow { cohort, start_year })
}

// ---------------------------------------------------------------------------
// Table-level transform
// ---------------------------------------------------------------------------

/// Type the raw founders table, dropping rows whose cohort is unusable.
pub fn normalize_founders(table: Table, rules: &CohortRules) -> Result<FoundersTable> {
    if !table.has_column(COHORT) {
        bail!("Founders table has no '{COHORT}' column");
    }
    let schema = FoundersSchema {
        has_faculty: table.has_column(FACULTY),
    };
    if !schema.has_faculty {
        log::warn!("Founders table has no '{FACULTY}' column; faculty filter disabled");
    }

    let total = table.len();
    let mut records = Vec::with_capacity(total);
    let mut dropped = 0;

    for (row_no, mut row) in table.rows.into_iter().enumerate() {
        let raw_cohort = row.remove(COHORT).unwrap_or(CellValue::Null);
        let Some(cohort) = rules.normalize(&raw_cohort) else {
            dropped += 1;
            continue;
        };
        let year = match rules.year_of(cohort) {
            Ok(year) => year,
            Err(e) => {
                log::debug!("Founders row {row_no}: skipped, {e}");
                dropped += 1;
                continue;
            }
        };
        let faculty = row.remove(FACULTY).and_then(|v| v.as_text());
        records.push(FounderRecord {
            faculty,
            raw_cohort,
            cohort,
            year,
            fields: row,
        });
    }

    log::info!(
        "Normalized cohorts: kept {} of {total} founder rows ({dropped} dropped)",
        records.len()
    );

    Ok(FoundersTable {
        schema,
        records,
        dropped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Row;

    #[test]
    fn missing_and_sentinel_labels_are_absent() {
        assert_eq!(normalize_cohort(&CellValue::Null), None);
        assert_eq!(normalize_cohort(&"Checks".into()), None);
        assert_eq!(normalize_cohort(&"Cactus Academy".into()), None);
    }

    #[test]
    fn current_maps_to_twelve() {
        assert_eq!(normalize_cohort(&"Current".into()), Some(12));
        // Only the exact label counts.
        assert_eq!(normalize_cohort(&"current".into()), None);
    }

    #[test]
    fn first_digit_run_is_extracted() {
        assert_eq!(normalize_cohort(&"Cohort 7".into()), Some(7));
        assert_eq!(normalize_cohort(&CellValue::Integer(7)), Some(7));
        assert_eq!(normalize_cohort(&CellValue::Float(7.0)), Some(7));
        assert_eq!(normalize_cohort(&"10th cohort, 2nd intake".into()), Some(10));
        assert_eq!(normalize_cohort(&"no digits here".into()), None);
    }

    #[test]
    fn oversized_digit_run_is_absent() {
        assert_eq!(normalize_cohort(&"Cohort 99999999999".into()), None);
    }

    #[test]
    fn only_ascii_digits_count() {
        assert_eq!(normalize_cohort(&"Cohort \u{663}".into()), None);
        assert_eq!(normalize_cohort(&"Cohort \u{663} / 5".into()), Some(5));
    }

    #[test]
    fn sentinel_check_precedes_digit_extraction() {
        let rules = CohortRules {
            sentinels: vec!["Batch 3".to_string()],
            ..CohortRules::default()
        };
        assert_eq!(rules.normalize(&"Batch 3".into()), None);
        assert_eq!(rules.normalize(&"Batch 4".into()), Some(4));
    }

    #[test]
    fn cohorts_pair_up_into_years() {
        assert_eq!(cohort_to_year(1, 2019), Ok(2019));
        assert_eq!(cohort_to_year(2, 2019), Ok(2019));
        assert_eq!(cohort_to_year(3, 2019), Ok(2020));
        assert_eq!(cohort_to_year(12, 2019), Ok(2024));
    }

    #[test]
    fn cohort_zero_is_rejected() {
        assert_eq!(cohort_to_year(0, 2019), Err(CohortError::NonPositive(0)));
        assert!(matches!(
            cohort_to_year(u32::MAX, i32::MAX),
            Err(CohortError::YearOverflow { .. })
        ));
    }

    #[test]
    fn founders_rows_with_bad_cohorts_are_dropped() {
        let rows: Vec<Row> = [
            ("Science", CellValue::from("Cohort 1")),
            ("Arts", CellValue::from("Checks")),
            ("Science", CellValue::Null),
            ("Law", CellValue::from("Current")),
            ("Arts", CellValue::Integer(0)),
        ]
        .into_iter()
        .map(|(faculty, cohort)| {
            Row::from([
                (FACULTY.to_string(), CellValue::from(faculty)),
                (COHORT.to_string(), cohort),
            ])
        })
        .collect();
        let table = Table {
            column_names: vec![FACULTY.to_string(), COHORT.to_string()],
            rows,
        };

        let founders = normalize_founders(table, &CohortRules::default()).unwrap();

        assert!(founders.schema.has_faculty);
        assert_eq!(founders.dropped, 3);
        let kept: Vec<_> = founders
            .records
            .iter()
            .map(|r| (r.faculty.as_deref(), r.cohort, r.year))
            .collect();
        assert_eq!(kept, vec![(Some("Science"), 1, 2019), (Some("Law"), 12, 2024)]);
    }

    #[test]
    fn founders_without_cohort_column_fail() {
        let table = Table {
            column_names: vec![FACULTY.to_string()],
            rows: Vec::new(),
        };
        assert!(normalize_founders(table, &CohortRules::default()).is_err());
    }
}
