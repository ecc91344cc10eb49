/// Data layer: core types, loading, cleaning, filtering and counting.
///
/// Architecture:
/// ```text
///  founders.csv        startups.csv
///        │                  │
///        ▼                  ▼
///   ┌──────────┐       ┌──────────┐
///   │  loader   │       │  loader   │  parse file → Table
///   └──────────┘       └──────────┘
///        │                  │
///        ▼                  │
///   ┌──────────┐            │
///   │  cohort   │  label → cohort → year, drop unusable rows
///   └──────────┘            │
///        │                  │
///        ▼                  ▼
///   ┌──────────────────────────┐
///   │  Snapshot (immutable)     │  FoundersTable + StartupsTable
///   └──────────────────────────┘
///        │
///        ▼
///   ┌──────────┐   ┌───────────┐
///   │  filter   │ → │ aggregate │  view: selection → (key, count) series
///   └──────────┘   └───────────┘
/// ```

pub mod aggregate;
pub mod cohort;
pub mod filter;
pub mod loader;
pub mod model;
pub mod view;
