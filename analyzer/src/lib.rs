//! Analyzer: stock CSV analysis pipeline
//!
//! Turns raw daily price CSVs into the artifacts the dashboard serves:
//! - [csv](https://github.com/BurntSushi/rust-csv) for reading, with latin-1 fallback
//! - [ta-rs](https://github.com/greyblake/ta-rs) for the moving averages
//! - [plotters](https://github.com/plotters-rs/plotters) for PNG charts
//!
//! # Features
//!
//! - **Data Loading**: date-column detection, numeric coercion, sorting
//! - **Feature Engineering**: forward fill, daily and log returns, MA_20/50/200
//! - **Statistics**: describe tables, annualized volatility, correlations
//! - **Resampling**: month-end closes and daily interpolation
//! - **Seasonal Decomposition**: multiplicative with additive fallback
//! - **Charts**: price/MA, volume, returns, monthly close, heatmap, comparison
//!
//! # Example
//!
//! ```no_run
//! use analyzer::prelude::*;
//! use shared::ArtifactStore;
//!
//! fn main() -> analyzer::Result<()> {
//!     let store = ArtifactStore::new(".", "plots");
//!     let csvs = find_stock_csvs(std::path::Path::new("."))?;
//!     let report = run(&csvs, &store)?;
//!     print!("{}", report.format());
//!     Ok(())
//! }
//! ```

pub mod data;
pub mod decompose;
pub mod error;
pub mod features;
pub mod indicators;
pub mod pipeline;
pub mod plot;
pub mod resample;
pub mod stats;

// Re-export commonly used types
pub mod prelude {
    pub use crate::data::*;
    pub use crate::decompose::*;
    pub use crate::features::*;
    pub use crate::indicators::*;
    pub use crate::pipeline::*;
    pub use crate::stats::*;

    pub use crate::error::{AnalysisError, Result};
}

pub use error::{AnalysisError, Result};
