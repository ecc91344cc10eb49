use std::path::{Path, PathBuf};

use crate::config::DashboardConfig;
use crate::data::cohort::CohortRules;
use crate::data::loader::{load_founders, load_startups};
use crate::data::model::Snapshot;
use crate::data::view::{DashboardView, Selection, build_view};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub founders_path: PathBuf,
    pub startups_path: PathBuf,
    pub rules: CohortRules,

    /// Loaded tables. Replaced wholesale on (re)load, never edited.
    pub snapshot: Snapshot,

    /// Side panel selections.
    pub selection: Selection,

    /// Derived from `snapshot` + `selection` (cached).
    pub view: DashboardView,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Empty state pointing at the configured files. Call [`reload`] to read them.
    ///
    /// [`reload`]: AppState::reload
    pub fn new(config: &DashboardConfig) -> Self {
        let snapshot = Snapshot::default();
        let selection = Selection::default();
        let view = build_view(&snapshot, &selection);
        Self {
            founders_path: config.founders_path.clone(),
            startups_path: config.startups_path.clone(),
            rules: config.cohort_rules(),
            snapshot,
            selection,
            view,
            status_message: None,
        }
    }

    /// Read both configured files again. Errors from either file are kept.
    pub fn reload(&mut self) {
        let founders_path = self.founders_path.clone();
        let startups_path = self.startups_path.clone();
        let errors: Vec<String> = [
            self.replace_founders(&founders_path),
            self.replace_startups(&startups_path),
        ]
        .into_iter()
        .filter_map(Result::err)
        .map(report_error)
        .collect();
        self.status_message = (!errors.is_empty()).then(|| errors.join("; "));
    }

    pub fn open_founders(&mut self, path: &Path) {
        self.status_message = self
            .replace_founders(path)
            .err()
            .map(report_error);
    }

    pub fn open_startups(&mut self, path: &Path) {
        self.status_message = self
            .replace_startups(path)
            .err()
            .map(report_error);
    }

    fn replace_founders(&mut self, path: &Path) -> anyhow::Result<()> {
        let founders = load_founders(path, &self.rules)?;
        self.founders_path = path.to_path_buf();
        self.snapshot = self.snapshot.with_founders(founders);
        self.selection.year_range = None;
        self.refresh();
        Ok(())
    }

    fn replace_startups(&mut self, path: &Path) -> anyhow::Result<()> {
        let startups = load_startups(path)?;
        self.startups_path = path.to_path_buf();
        self.snapshot = self.snapshot.with_startups(startups);
        self.refresh();
        Ok(())
    }

    /// Recompute the view after a selection or data change.
    pub fn refresh(&mut self) {
        self.view = build_view(&self.snapshot, &self.selection);
        // Keep the widgets in sync with what was actually applied.
        self.selection = self.view.selection.clone();
    }

    pub fn set_faculty(&mut self, value: &str) {
        self.selection.faculty = value.to_string();
        // Year bounds depend on the faculty; start again from the full range.
        self.selection.year_range = None;
        self.refresh();
    }

    pub fn set_startup_name(&mut self, value: &str) {
        self.selection.startup_name = value.to_string();
        self.refresh();
    }

    pub fn set_industry(&mut self, value: &str) {
        self.selection.industry = value.to_string();
        self.refresh();
    }

    pub fn set_year_range(&mut self, lo: i32, hi: i32) {
        self.selection.year_range = Some((lo, hi));
        self.refresh();
    }
}

/// Log a load failure and return the text shown in the status bar.
fn report_error(e: anyhow::Error) -> String {
    log::error!("Failed to load file: {e:#}");
    format!("Error: {e:#}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::ALL;
    use std::fs;

    fn write_sample(dir: &Path) -> DashboardConfig {
        let founders = dir.join("founders.csv");
        let startups = dir.join("startups.csv");
        fs::write(
            &founders,
            "Faculty,Cohort\nScience,Cohort 1\nArts,Cohort 3\nScience,Checks\nArts,Current\n",
        )
        .unwrap();
        fs::write(
            &startups,
            "Startup Name,Industry\nLedgerly,Fintech\nSprout,Agritech\n",
        )
        .unwrap();
        DashboardConfig {
            founders_path: founders,
            startups_path: startups,
            ..DashboardConfig::default()
        }
    }

    #[test]
    fn reload_reads_both_tables() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(&write_sample(dir.path()));
        state.reload();

        assert_eq!(state.status_message, None);
        assert_eq!(state.snapshot.founders.records.len(), 3);
        assert_eq!(state.snapshot.founders.dropped, 1);
        assert_eq!(state.view.yearly_counts, vec![(2019, 1), (2020, 1), (2024, 1)]);
        assert_eq!(state.view.visible_startups, 2);
    }

    #[test]
    fn selection_changes_recompute_from_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(&write_sample(dir.path()));
        state.reload();

        state.set_faculty("Arts");
        assert_eq!(state.view.cohort_counts, vec![(3, 1), (12, 1)]);
        assert_eq!(state.view.selection.year_range, Some((2020, 2024)));

        state.set_faculty(ALL);
        assert_eq!(state.view.cohort_counts.len(), 3);
        assert_eq!(state.view.selection.year_range, Some((2019, 2024)));
        assert_eq!(state.snapshot.founders.records.len(), 3);
    }

    #[test]
    fn load_failure_keeps_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(&write_sample(dir.path()));
        state.reload();

        state.open_founders(&dir.path().join("missing.csv"));

        assert!(state.status_message.is_some());
        assert_eq!(state.snapshot.founders.records.len(), 3);
    }

    #[test]
    fn successful_open_clears_previous_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_sample(dir.path());
        let mut state = AppState::new(&config);

        state.open_startups(&dir.path().join("missing.csv"));
        assert!(state.status_message.is_some());

        state.open_startups(&config.startups_path);
        assert_eq!(state.status_message, None);

        state.open_founders(&dir.path().join("missing.csv"));
        state.open_founders(&config.founders_path);
        assert_eq!(state.status_message, None);
    }

    #[test]
    fn reload_keeps_founders_error_when_startups_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig {
            founders_path: dir.path().join("missing.csv"),
            ..write_sample(dir.path())
        };
        let mut state = AppState::new(&config);
        state.reload();

        assert!(state.status_message.as_deref().unwrap().contains("missing.csv"));
        assert_eq!(state.view.visible_startups, 2);
    }
}
