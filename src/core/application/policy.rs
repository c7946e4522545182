//! Auto-approval policy
//!
//! A pure function of the process-wide configuration and the current request;
//! recomputed on every submission, no caching.

use super::types::ApplicationRequest;

/// Four-way condition gating unattended acceptance
#[derive(Debug, Clone, Default)]
pub struct ApprovalPolicy {
    /// Feature flag for unattended approval
    pub auto_approve: bool,
    /// Minimum trust level allowed to be auto-approved
    pub min_trust_level: u8,
    /// Target group; auto-approval is off without one
    pub group_id: Option<String>,
}

impl ApprovalPolicy {
    /// The group to auto-approve into, when every criterion is met
    ///
    /// Criteria: the flag is on, the visitor is authenticated, a group is
    /// configured, and the trust level (default 0) reaches the threshold.
    pub fn auto_approval_group(&self, request: &ApplicationRequest) -> Option<&str> {
        if !self.auto_approve || !request.is_authenticated {
            return None;
        }
        let group_id = self.group_id.as_deref().filter(|g| !g.is_empty())?;
        (request.trust_level.unwrap_or(0) >= self.min_trust_level).then_some(group_id)
    }
}
