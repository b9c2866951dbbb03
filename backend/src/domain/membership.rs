//! Membership toggle service.
//!
//! A toggle moves one user between `not-member` and `member` on one
//! association. The join-versus-leave decision and the paired member-list
//! and counter mutation happen inside the repository's atomic
//! `toggle_membership`, so no stale client copy is ever trusted. This
//! service adds what sits above the store: the explicit acting identity,
//! the per-association in-flight guard, and error mapping.
//!
//! The in-flight guard is advisory and process-local. It rejects a second
//! toggle for the same association while one is outstanding and is
//! released when the first completes, whatever the outcome.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::DomainResult;
use crate::domain::association::{Association, AssociationId, UserId};
use crate::domain::error::Error;
use crate::domain::ports::{
    AssociationRepository, AssociationRepositoryError, MembershipCommand,
};

/// Which membership transition a toggle applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MembershipAction {
    /// The user was added to the member list.
    Joined,
    /// The user was removed from the member list.
    Left,
}

/// Input to [`MembershipCommand::toggle`].
///
/// The acting user is an explicit field; there is no ambient
/// current-user lookup anywhere below the HTTP adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleRequest {
    /// The authenticated user flipping their membership.
    pub user_id: UserId,
    /// The association being joined or left.
    pub association_id: AssociationId,
}

/// Outcome of a successful toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleResponse {
    /// The association as confirmed by the store after the mutation.
    pub association: Association,
    /// Which transition was applied.
    pub action: MembershipAction,
}

/// Membership service implementing the driving port.
#[derive(Clone)]
pub struct MembershipService<R> {
    repo: Arc<R>,
    in_flight: Arc<Mutex<HashSet<AssociationId>>>,
}

impl<R> MembershipService<R> {
    /// Create a new service over the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }
}

impl<R> MembershipService<R>
where
    R: AssociationRepository,
{
    fn map_repository_error(error: AssociationRepositoryError) -> Error {
        match error {
            AssociationRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("association store unavailable: {message}"))
            }
            AssociationRepositoryError::Query { message } => {
                Error::internal(format!("association store error: {message}"))
            }
            AssociationRepositoryError::NotFound { id } => {
                Error::not_found(format!("association not found: {id}"))
            }
        }
    }

    /// Mark the association as having a toggle outstanding.
    ///
    /// Returns a guard that releases the flag on drop, or a conflict error
    /// when a toggle for the same association is already running.
    fn acquire_in_flight(&self, association_id: &AssociationId) -> DomainResult<InFlightGuard> {
        let mut held = self
            .in_flight
            .lock()
            .map_err(|_| Error::internal("in-flight set poisoned"))?;
        if !held.insert(association_id.clone()) {
            return Err(Error::conflict("membership change already in flight")
                .with_details(json!({
                    "associationId": association_id.as_ref(),
                    "code": "toggle_in_flight",
                })));
        }
        Ok(InFlightGuard {
            set: Arc::clone(&self.in_flight),
            id: association_id.clone(),
        })
    }
}

/// Clears the per-association in-flight flag on drop, so the flag is
/// released on success and failure alike.
struct InFlightGuard {
    set: Arc<Mutex<HashSet<AssociationId>>>,
    id: AssociationId,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if let Ok(mut held) = self.set.lock() {
            held.remove(&self.id);
        }
    }
}

#[async_trait]
impl<R> MembershipCommand for MembershipService<R>
where
    R: AssociationRepository,
{
    async fn toggle(&self, request: ToggleRequest) -> DomainResult<ToggleResponse> {
        let _guard = self.acquire_in_flight(&request.association_id)?;

        let change = self
            .repo
            .toggle_membership(&request.association_id, &request.user_id)
            .await
            .map_err(Self::map_repository_error)?;

        tracing::info!(
            association_id = %request.association_id,
            user_id = %request.user_id,
            action = ?change.action,
            member_count = change.association.member_count(),
            "membership toggled"
        );

        Ok(ToggleResponse {
            association: change.association,
            action: change.action,
        })
    }
}
