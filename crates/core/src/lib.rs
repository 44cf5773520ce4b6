//! # Hyperproof Core
//!
//! Accessor ports and the correlated-query engine.
//!
//! The remote API offers no joins across its resource endpoints. This crate
//! implements the derived read operations ("controls by user", "proof by
//! label", "all tasks") against narrow read traits, so the engine can be
//! exercised with mock accessors and the HTTP layer stays in the client
//! crate.

pub mod correlated;
pub mod ports;

// Re-export commonly used items
pub use correlated::{Correlated, CorrelatedQueries, FanOutFailure, Matched, QueryPorts};
pub use ports::{
    ControlReader, LabelReader, ProofReader, RiskReader, TaskReader, TaskStatusReader, UserReader,
};
// Hosts hand a cancellation token to long-running fan-outs.
pub use tokio_util::sync::CancellationToken;
