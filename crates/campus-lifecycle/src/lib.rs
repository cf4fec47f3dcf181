//! Account and enrollment lifecycle core.
//!
//! The rules governing who may act in the platform and how accounts,
//! enrollments, and instructor assignments move between states, plus the
//! idempotent read-acknowledgment store.
//!
//! # Modules
//!
//! - [`context`] - the resolved identity of a caller
//! - [`status`] - pure transition tables for every entity
//! - [`engine`] - the only component allowed to mutate lifecycle fields
//! - [`ack`] - at-most-once read acknowledgment
//! - [`error`] - the lifecycle error taxonomy
//!
//! The engine is stateless between calls; all state lives in Postgres, and
//! every mutating operation is one transaction (read current state, validate
//! the transition, write). Concurrent callers serialize on row locks: the
//! loser of a race observes either an idempotent no-op or a conflict, never
//! a partial write.

pub mod ack;
pub mod context;
pub mod engine;
pub mod error;
pub mod status;

pub use ack::{AckStore, ReadAck};
pub use context::IdentityContext;
pub use engine::{LifecycleEngine, Outcome};
pub use error::{LifecycleError, Result};
