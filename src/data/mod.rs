/// Data layer: core types, loading, aggregation, filtering, chart shaping.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (once, at startup)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<LaunchRecord>, sites, payload min/max
///   └──────────┘
///     │       │
///     ▼       ▼
///  ┌───────────┐  ┌──────────┐
///  │ aggregate │  │  filter   │  site selector / payload range
///  └───────────┘  └──────────┘
///     │       │
///     ▼       ▼
///   ┌──────────┐
///   │  chart    │  PieChart / ScatterChart for the UI
///   └──────────┘
/// ```

pub mod aggregate;
pub mod chart;
pub mod filter;
pub mod loader;
pub mod model;
