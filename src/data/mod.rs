/// Data layer: core types, loading, cleaning, and filtering.
///
/// Architecture:
/// ```text
///  metadata.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  two-tier CSV parse → RawTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean    │  project columns, drop bad rows, derive fields
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ PaperSet  │  Vec<Paper>, unique years / journals
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  year/journal predicates, text search → indices
///   └──────────┘
/// ```

pub mod clean;
pub mod filter;
pub mod loader;
pub mod model;

/// Default input file, resolved against the working directory.
pub const DEFAULT_CSV: &str = "metadata.csv";
