use super::aggregate::count_by;
use super::filter::{ALL, Constraint, apply_filters, filter_options, filter_year_range};
use super::model::{FACULTY, FounderRecord, INDUSTRY, STARTUP_NAME, Snapshot};

// ---------------------------------------------------------------------------
// Selection – what the user picked in the side panel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub faculty: String,
    pub startup_name: String,
    pub industry: String,
    /// Inclusive year range for the yearly chart; `None` = full range.
    pub year_range: Option<(i32, i32)>,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            faculty: ALL.to_string(),
            startup_name: ALL.to_string(),
            industry: ALL.to_string(),
            year_range: None,
        }
    }
}

// ---------------------------------------------------------------------------
// DashboardView – everything the charts and selectors need
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    /// Selector options; `None` hides the selector.
    pub faculty_options: Option<Vec<String>>,
    pub startup_options: Option<Vec<String>>,
    pub industry_options: Option<Vec<String>>,
    /// The selection actually applied, after dropping stale values.
    pub selection: Selection,
    /// Min and max year among the faculty-filtered founders.
    pub year_bounds: Option<(i32, i32)>,
    pub yearly_counts: Vec<(i32, usize)>,
    pub cohort_counts: Vec<(u32, usize)>,
    pub visible_founders: usize,
    pub visible_startups: usize,
}

/// Resolve a selector value against its options. A value that is no longer
/// offered falls back to [`ALL`].
fn effective(selected: &str, options: &Option<Vec<String>>) -> String {
    match options {
        Some(opts) if opts.iter().any(|o| o == selected) => selected.to_string(),
        _ => ALL.to_string(),
    }
}

fn clamp_range(requested: Option<(i32, i32)>, bounds: Option<(i32, i32)>) -> Option<(i32, i32)> {
    let (min, max) = bounds?;
    let Some((lo, hi)) = requested else {
        return Some((min, max));
    };
    let (lo, hi) = (lo.clamp(min, max), hi.clamp(min, max));
    if lo > hi {
        Some((min, max))
    } else {
        Some((lo, hi))
    }
}

fn year_bounds(records: &[FounderRecord]) -> Option<(i32, i32)> {
    let min = records.iter().map(|r| r.year).min()?;
    let max = records.iter().map(|r| r.year).max()?;
    Some((min, max))
}

/// Recompute the whole dashboard from the loaded snapshot.
///
/// Founders are filtered by faculty. Startups are filtered by name first and
/// the industry options come from the name-filtered rows. The year range
/// narrows the yearly chart only; the cohort chart shows every
/// faculty-filtered founder.
pub fn build_view(snapshot: &Snapshot, selection: &Selection) -> DashboardView {
    let founders = &snapshot.founders;
    let startups = &snapshot.startups;

    // ---- Founders ----
    let faculty_options =
        filter_options(&founders.records, founders.schema.has_faculty, FACULTY);
    let faculty = effective(&selection.faculty, &faculty_options);
    let visible: Vec<FounderRecord> = apply_filters(
        &founders.records,
        |c| founders.schema.has(c),
        &[Constraint::new(FACULTY, &faculty)],
    );

    // ---- Startups ----
    let startup_options =
        filter_options(&startups.records, startups.schema.has_startup_name, STARTUP_NAME);
    let startup_name = effective(&selection.startup_name, &startup_options);
    let by_name = apply_filters(
        &startups.records,
        |c| startups.schema.has(c),
        &[Constraint::new(STARTUP_NAME, &startup_name)],
    );
    let industry_options = filter_options(&by_name, startups.schema.has_industry, INDUSTRY);
    let industry = effective(&selection.industry, &industry_options);
    let visible_startups = apply_filters(
        &by_name,
        |c| startups.schema.has(c),
        &[Constraint::new(INDUSTRY, &industry)],
    )
    .len();

    // ---- Charts ----
    let bounds = year_bounds(&visible);
    let year_range = clamp_range(selection.year_range, bounds);
    let yearly_counts = match year_range {
        Some((lo, hi)) => count_by(&filter_year_range(&visible, lo, hi), |r| r.year),
        None => Vec::new(),
    };
    let cohort_counts = count_by(&visible, |r| r.cohort);

    DashboardView {
        faculty_options,
        startup_options,
        industry_options,
        selection: Selection {
            faculty,
            startup_name,
            industry,
            year_range,
        },
        year_bounds: bounds,
        yearly_counts,
        cohort_counts,
        visible_founders: visible.len(),
        visible_startups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{
        CellValue, FoundersSchema, FoundersTable, Row, StartupRecord, StartupsSchema,
        StartupsTable,
    };

    fn founder(faculty: &str, cohort: u32) -> FounderRecord {
        FounderRecord {
            faculty: Some(faculty.to_string()),
            raw_cohort: CellValue::Integer(cohort as i64),
            cohort,
            year: 2019 + (cohort as i32 - 1) / 2,
            fields: Row::new(),
        }
    }

    fn startup(name: &str, industry: &str) -> StartupRecord {
        StartupRecord {
            startup_name: Some(name.to_string()),
            industry: Some(industry.to_string()),
            fields: Row::new(),
        }
    }

    fn snapshot() -> Snapshot {
        let founders = FoundersTable {
            schema: FoundersSchema { has_faculty: true },
            records: vec![
                founder("Science", 1),
                founder("Science", 2),
                founder("Arts", 3),
                founder("Science", 5),
            ],
            dropped: 0,
        };
        let startups = StartupsTable {
            schema: StartupsSchema {
                has_startup_name: true,
                has_industry: true,
            },
            records: vec![
                startup("Ledgerly", "Fintech"),
                startup("Sprout", "Agritech"),
                startup("Paywise", "Fintech"),
            ],
        };
        Snapshot::default()
            .with_founders(founders)
            .with_startups(startups)
    }

    #[test]
    fn default_selection_shows_everything() {
        let view = build_view(&snapshot(), &Selection::default());

        assert_eq!(view.year_bounds, Some((2019, 2021)));
        assert_eq!(view.yearly_counts, vec![(2019, 2), (2020, 1), (2021, 1)]);
        assert_eq!(view.cohort_counts, vec![(1, 1), (2, 1), (3, 1), (5, 1)]);
        assert_eq!(view.visible_startups, 3);
        assert_eq!(
            view.faculty_options,
            Some(vec!["All".to_string(), "Science".to_string(), "Arts".to_string()])
        );
    }

    #[test]
    fn faculty_filter_feeds_both_charts() {
        let selection = Selection {
            faculty: "Science".to_string(),
            ..Selection::default()
        };
        let view = build_view(&snapshot(), &selection);

        assert_eq!(view.visible_founders, 3);
        assert_eq!(view.yearly_counts, vec![(2019, 2), (2021, 1)]);
        assert_eq!(view.cohort_counts, vec![(1, 1), (2, 1), (5, 1)]);
    }

    #[test]
    fn year_range_narrows_only_the_yearly_chart() {
        let selection = Selection {
            year_range: Some((2020, 2030)),
            ..Selection::default()
        };
        let view = build_view(&snapshot(), &selection);

        assert_eq!(view.selection.year_range, Some((2020, 2021)));
        assert_eq!(view.yearly_counts, vec![(2020, 1), (2021, 1)]);
        assert_eq!(view.cohort_counts.len(), 4);
    }

    #[test]
    fn range_inverted_after_clamping_resets_to_bounds() {
        let selection = Selection {
            year_range: Some((2021, 2020)),
            ..Selection::default()
        };
        let view = build_view(&snapshot(), &selection);

        assert_eq!(view.selection.year_range, Some((2019, 2021)));
        assert_eq!(view.yearly_counts, vec![(2019, 2), (2020, 1), (2021, 1)]);

        let beyond = Selection {
            year_range: Some((2030, 2010)),
            ..Selection::default()
        };
        assert_eq!(
            build_view(&snapshot(), &beyond).selection.year_range,
            Some((2019, 2021))
        );
    }

    #[test]
    fn industry_options_follow_startup_name() {
        let selection = Selection {
            startup_name: "Sprout".to_string(),
            industry: "Fintech".to_string(),
            ..Selection::default()
        };
        let view = build_view(&snapshot(), &selection);

        assert_eq!(
            view.industry_options,
            Some(vec!["All".to_string(), "Agritech".to_string()])
        );
        // "Fintech" is no longer offered, so it is not applied.
        assert_eq!(view.selection.industry, ALL);
        assert_eq!(view.visible_startups, 1);
    }

    #[test]
    fn rebuilding_from_the_same_snapshot_is_stable() {
        let snap = snapshot();
        let selection = Selection {
            industry: "Fintech".to_string(),
            ..Selection::default()
        };
        let first = build_view(&snap, &selection);
        let _other = build_view(&snap, &Selection::default());
        assert_eq!(build_view(&snap, &selection), first);
        assert_eq!(first.visible_startups, 2);
    }

    #[test]
    fn empty_founders_give_empty_charts() {
        let view = build_view(&Snapshot::default(), &Selection::default());
        assert_eq!(view.year_bounds, None);
        assert!(view.yearly_counts.is_empty());
        assert!(view.cohort_counts.is_empty());
        assert_eq!(view.faculty_options, None);
    }
}
