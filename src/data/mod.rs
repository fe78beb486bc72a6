/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///     chart CSV
///         │
///         ▼
///    ┌──────────┐
///    │  loader   │  parse + clean → ChartDataset
///    └──────────┘
///         │
///         ▼
///    ┌──────────────┐
///    │ ChartDataset  │  Vec<ChartEntry>, read-only after load
///    └──────────────┘
///         │
///         ▼
///    ┌──────────┐        ┌────────────┐
///    │  filter   │ ────▶ │ aggregate   │  view indices → chart payloads
///    └──────────┘        └────────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
