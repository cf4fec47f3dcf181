//! HTTP surface for the campus lifecycle core.
//!
//! One route per lifecycle operation. Identity resolution happens upstream:
//! every request is expected to carry an [`campus_lifecycle::IdentityContext`]
//! extension inserted by the gateway's authentication layer, and the
//! handlers pass it to the engine explicitly.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod router;

pub use error::ApiLifecycleError;
pub use router::{lifecycle_router, LifecycleState};
