use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a loaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring what a CSV reader infers.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            // `{}` prints 7.0 as "7" and 7.5 as "7.5".
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Textual form used for equality filtering. `None` for missing cells.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            other => Some(other.to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Integer(i)
    }
}

// ---------------------------------------------------------------------------
// Table – raw rows as read from disk
// ---------------------------------------------------------------------------

pub type Row = BTreeMap<String, CellValue>;

/// A loaded table before any schema is applied.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Column names in header order.
    pub column_names: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn has_column(&self, name: &str) -> bool {
        self.column_names.iter().any(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const FACULTY: &str = "Faculty";
pub const COHORT: &str = "Cohort";
pub const YEAR: &str = "Year";
pub const STARTUP_NAME: &str = "Startup Name";
pub const INDUSTRY: &str = "Industry";

// ---------------------------------------------------------------------------
// Record – uniform column access for filtering
// ---------------------------------------------------------------------------

/// A typed row that can still be addressed by column name.
pub trait Record {
    /// Text value of `column`, or `None` when the cell is missing.
    fn text(&self, column: &str) -> Option<String>;
}

// ---------------------------------------------------------------------------
// Founders
// ---------------------------------------------------------------------------

/// A founder row whose cohort normalized successfully.
#[derive(Debug, Clone, PartialEq)]
pub struct FounderRecord {
    pub faculty: Option<String>,
    /// The `Cohort` cell as it appeared in the source.
    pub raw_cohort: CellValue,
    /// Canonical cohort number, always >= 1.
    pub cohort: u32,
    /// Calendar year derived from `cohort`.
    pub year: i32,
    /// Every other column, untouched.
    pub fields: Row,
}

impl Record for FounderRecord {
    fn text(&self, column: &str) -> Option<String> {
        match column {
            FACULTY => self.faculty.clone(),
            COHORT => Some(self.cohort.to_string()),
            YEAR => Some(self.year.to_string()),
            other => self.fields.get(other).and_then(CellValue::as_text),
        }
    }
}

/// Optional columns detected in the founders source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FoundersSchema {
    pub has_faculty: bool,
}

impl FoundersSchema {
    pub fn has(&self, column: &str) -> bool {
        match column {
            FACULTY => self.has_faculty,
            COHORT | YEAR => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FoundersTable {
    pub schema: FoundersSchema,
    pub records: Vec<FounderRecord>,
    /// Rows excluded because their cohort could not be normalized.
    pub dropped: usize,
}

// ---------------------------------------------------------------------------
// Startups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct StartupRecord {
    pub startup_name: Option<String>,
    pub industry: Option<String>,
    pub fields: Row,
}

impl Record for StartupRecord {
    fn text(&self, column: &str) -> Option<String> {
        match column {
            STARTUP_NAME => self.startup_name.clone(),
            INDUSTRY => self.industry.clone(),
            other => self.fields.get(other).and_then(CellValue::as_text),
        }
    }
}

/// Optional columns detected in the startups source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StartupsSchema {
    pub has_startup_name: bool,
    pub has_industry: bool,
}

impl StartupsSchema {
    pub fn has(&self, column: &str) -> bool {
        match column {
            STARTUP_NAME => self.has_startup_name,
            INDUSTRY => self.has_industry,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StartupsTable {
    pub schema: StartupsSchema,
    pub records: Vec<StartupRecord>,
}

impl StartupsTable {
    /// Resolve the optional columns once and type every row.
    pub fn from_table(table: Table) -> Self {
        let schema = StartupsSchema {
            has_startup_name: table.has_column(STARTUP_NAME),
            has_industry: table.has_column(INDUSTRY),
        };
        if !schema.has_startup_name {
            log::warn!("Startups table has no '{STARTUP_NAME}' column; startup filter disabled");
        }
        if !schema.has_industry {
            log::warn!("Startups table has no '{INDUSTRY}' column; industry filter disabled");
        }

        let records = table
            .rows
            .into_iter()
            .map(|mut row| {
                let startup_name = row.remove(STARTUP_NAME).and_then(|v| v.as_text());
                let industry = row.remove(INDUSTRY).and_then(|v| v.as_text());
                StartupRecord {
                    startup_name,
                    industry,
                    fields: row,
                }
            })
            .collect();

        StartupsTable { schema, records }
    }
}

// ---------------------------------------------------------------------------
// Snapshot – both tables, immutable after load
// ---------------------------------------------------------------------------

/// The loaded datasets. Cloning is cheap; views are always derived from it.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub founders: Arc<FoundersTable>,
    pub startups: Arc<StartupsTable>,
}

impl Snapshot {
    pub fn with_founders(&self, founders: FoundersTable) -> Self {
        Self {
            founders: Arc::new(founders),
            startups: Arc::clone(&self.startups),
        }
    }

    pub fn with_startups(&self, startups: StartupsTable) -> Self {
        Self {
            founders: Arc::clone(&self.founders),
            startups: Arc::new(startups),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, CellValue)]) -> Row {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn float_cells_render_without_trailing_zero() {
        assert_eq!(CellValue::Float(7.0).to_string(), "7");
        assert_eq!(CellValue::Float(7.5).to_string(), "7.5");
        assert_eq!(CellValue::Null.as_text(), None);
    }

    #[test]
    fn startups_schema_tracks_optional_columns() {
        let table = Table {
            column_names: vec![STARTUP_NAME.to_string(), "Founded".to_string()],
            rows: vec![row(&[
                (STARTUP_NAME, "Acme".into()),
                ("Founded", CellValue::Integer(2020)),
            ])],
        };
        let startups = StartupsTable::from_table(table);

        assert!(startups.schema.has(STARTUP_NAME));
        assert!(!startups.schema.has(INDUSTRY));
        assert_eq!(startups.records[0].startup_name.as_deref(), Some("Acme"));
        assert_eq!(startups.records[0].industry, None);
        assert_eq!(startups.records[0].text("Founded").as_deref(), Some("2020"));
    }

    #[test]
    fn startups_without_name_column_disable_name_filter() {
        let table = Table {
            column_names: vec![INDUSTRY.to_string()],
            rows: vec![row(&[(INDUSTRY, "Fintech".into())])],
        };
        let startups = StartupsTable::from_table(table);

        assert!(!startups.schema.has(STARTUP_NAME));
        assert!(startups.schema.has(INDUSTRY));
        assert_eq!(startups.records[0].startup_name, None);
    }

    #[test]
    fn snapshot_replacement_keeps_other_table() {
        let snap = Snapshot::default();
        let next = snap.with_startups(StartupsTable::default());
        assert!(Arc::ptr_eq(&snap.founders, &next.founders));
        assert!(!Arc::ptr_eq(&snap.startups, &next.startups));
    }
}
