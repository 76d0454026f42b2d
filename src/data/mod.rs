/// Data layer: table model, header codec, regression and CSV I/O.
///
/// Architecture:
/// ```text
///        .csv
///         │
///         ▼
///   ┌──────────┐
///   │  loader   │  raw records ⇄ file
///   └──────────┘
///         │  first record          remaining records
///         ▼                              ▼
///   ┌──────────┐                 ┌──────────────┐
///   │  header   │  "Name (s) [u]" │  TableModel   │  text cells + entry row
///   └──────────┘                 └──────────────┘
///                                        │ materialize → (xs, ys)
///                                        ▼
///                                ┌──────────────┐
///                                │  regression   │  slope, intercept, errors
///                                └──────────────┘
/// ```

pub mod header;
pub mod loader;
pub mod model;
pub mod regression;
