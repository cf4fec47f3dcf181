//! Request middleware for the lifecycle API.

pub mod identity;

pub use identity::{admin_guard, require_identity};
