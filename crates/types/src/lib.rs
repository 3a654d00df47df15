//! # Shared Types
//!
//! Types shared across the elastic supply workspace:
//!
//! - Error enum and result alias used by the math and core crates
//! - Fixed-point scale constants
//! - Rebase and configuration-change event types

pub mod constants;
pub mod errors;
pub mod events;

pub use errors::{RebaseError, RebaseResult};
pub use events::{ParamChange, RebaseEvent};
