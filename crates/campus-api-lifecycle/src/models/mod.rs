//! Request and response models for the lifecycle API.

pub mod requests;
pub mod responses;

pub use requests::{
    SetActiveRequest, SetApprovalRequest, SetAssignmentStatusRequest, SetEnrollmentStatusRequest,
};
pub use responses::{
    AccountResponse, AssignmentResponse, EnrollmentResponse, ReadAckResponse, UnreadCountResponse,
};
