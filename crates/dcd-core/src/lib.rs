//! dcd-core: shared foundation for the concept-development workspace.
//!
//! Contains:
//! - timeseries (yearly profiles + merge algorithm)
//! - numeric (Real + tolerances + float helpers)
//! - units (uom conversions used by the emission calculations)
//! - ids (UUID-backed entity identifiers)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod timeseries;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
pub use timeseries::{TimeSeries, merge, merge_all, year_span};
