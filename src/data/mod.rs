/// Data layer: core types, loading, metrics and ranking.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → QuarterbackTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ metrics   │  YPA, TD_per_Att → enriched copy
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ ranking   │  sorted view → console listing
///   └──────────┘
/// ```

pub mod loader;
pub mod metrics;
pub mod model;
pub mod ranking;
