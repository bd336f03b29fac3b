/// Data layer: core types, loading, filtering and chart selection.
///
/// Architecture:
/// ```text
///  .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset │  Vec<LaunchRecord>, sites, payload bounds
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  site selection / payload window → row subsets
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  chart    │  rows → PieChartSpec / ScatterChartSpec
///   └──────────┘
/// ```

pub mod chart;
pub mod filter;
pub mod loader;
pub mod model;
