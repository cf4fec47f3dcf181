//! Endpoint handlers for the lifecycle API.

pub mod accounts;
pub mod assignments;
pub mod enrollments;
pub mod events;

pub use accounts::{set_active_handler, set_approval_handler};
pub use assignments::set_assignment_status_handler;
pub use enrollments::{remove_enrollment_handler, set_enrollment_status_handler};
pub use events::{mark_read_handler, unread_count_handler};
