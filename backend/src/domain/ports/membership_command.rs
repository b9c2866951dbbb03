//! Driving port for the membership toggle.

use async_trait::async_trait;

use crate::domain::DomainResult;
use crate::domain::error::Error;
use crate::domain::membership::{ToggleRequest, ToggleResponse};

/// Use-case port for flipping a user's membership on an association.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MembershipCommand: Send + Sync {
    /// Toggle membership for the explicitly supplied user.
    ///
    /// The acting identity is always an input; implementations never
    /// consult ambient session state.
    async fn toggle(&self, request: ToggleRequest) -> DomainResult<ToggleResponse>;
}

/// Fixture implementation for tests that do not exercise membership.
///
/// Every toggle reports the association as missing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMembershipCommand;

#[async_trait]
impl MembershipCommand for FixtureMembershipCommand {
    async fn toggle(&self, request: ToggleRequest) -> DomainResult<ToggleResponse> {
        Err(Error::not_found(format!(
            "association not found: {}",
            request.association_id
        )))
    }
}
