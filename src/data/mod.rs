/// Data layer: core types, loading, recoding, and aggregation.
///
/// Pipeline:
/// ```text
///      .csv upload
///          │
///          ▼
///    ┌──────────┐
///    │  loader   │  parse file → SurveyDataset (typed cells)
///    └──────────┘
///          │
///          ▼
///    ┌──────────┐
///    │  recode   │  validate schema, rename, codes → labels
///    └──────────┘
///          │
///          ▼
///    ┌──────────┐
///    │  stats    │  value counts, Pearson matrix, box summaries
///    └──────────┘
/// ```
pub mod loader;
pub mod model;
pub mod recode;
pub mod stats;
