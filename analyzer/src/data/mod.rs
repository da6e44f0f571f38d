//! Data loading module
//!
//! Reads stock CSV files into a date-indexed [`PriceFrame`].

pub mod frame;
pub mod loader;

pub use frame::*;
pub use loader::*;
