//! Data layer: reference tables, loading, filtering and aggregation.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → raw rows
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  model    │  clean, type, check against reference → Dataset
//!   └──────────┘
//!        │
//!        ├──► filter     rookies / seniors → records
//!        ├──► aggregate  per-team means → top-5 rankings
//!        └──► summary    head + describe tables
//! ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod reference;
pub mod summary;

use std::path::Path;

pub use error::{DatasetError, LoadError};
pub use model::{Dashboard, Dataset, PlayerRecord, PositionFilter};
pub use reference::ReferenceTables;

impl Dashboard {
    /// One-time initialisation: load the season and validate it against the
    /// reference tables.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let reference = ReferenceTables::new();
        let dataset = loader::load_file(path, &reference)?;
        Ok(Dashboard { reference, dataset })
    }
}
