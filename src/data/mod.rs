/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///  *.csv (TGA/DSC)      *.txt (tensile)
///        │                    │
///        ▼                    ▼
///   ┌────────────────────────────┐
///   │  loader   skip preamble →  │  read_table → Table
///   └────────────────────────────┘
///        │                    │
///        ▼                    ▼
///   ThermalSample        TensileSample
/// ```

pub mod loader;
pub mod model;
