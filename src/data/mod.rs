/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///  scope export (.csv)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows, drop "undefined" / unparseable readings
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Waveform  │  time[], voltage[], load summary
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
