//! Membership application handling
//!
//! Validation, auto-approval and administrator notification for one form
//! submission. Every path is traversed at most once per submission; nothing is
//! persisted.

pub mod handler;
pub mod policy;
pub mod types;

pub use handler::{ApplicationHandler, GroupApprover, Notifier};
pub use policy::ApprovalPolicy;
pub use types::{ApplicationFormState, ApplicationRequest, ApplicationStatus};
