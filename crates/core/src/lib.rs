//! # Elastic Core
//!
//! The rebase decision-and-computation engine: governance parameters, the
//! time-gated decision procedure, and the append-only event log. The engine
//! resizes an aggregate supply figure toward a price target; it never
//! touches per-holder balances.
//!
//! Every mutating operation takes `&mut self`, so exclusive ownership is
//! the serialization boundary: two attempts on the same engine cannot
//! interleave. Callers that share an engine across tasks wrap it in a
//! mutex.

pub mod auth;
pub mod engine;
pub mod oracle;
pub mod params;
pub mod recorder;

pub use auth::{Authorizer, SingleAdmin};
pub use engine::{RebaseEngine, RebaseOutcome};
pub use oracle::{PriceSource, StaticPriceSource};
pub use params::GovernanceParams;
pub use recorder::EventRecorder;
