//! dg-core: stable foundation for dayglare.
//!
//! Contains:
//! - glare (DGP comfort thresholds + classification)
//! - status (local simulation status enumeration)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod glare;
pub mod numeric;
pub mod status;

// Re-exports: nice ergonomics for downstream crates
pub use error::{DgError, DgResult};
pub use glare::*;
pub use numeric::*;
pub use status::*;
