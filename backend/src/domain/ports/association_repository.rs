//! Driven port for the association document collection.
//!
//! The remote store exposes two operations: a bulk read of every document
//! ordered by creation time descending, and a conditional membership
//! toggle. The toggle decides join-versus-leave from authoritative stored
//! state and applies the member-list change and counter change together,
//! atomically, so a stale client copy can never cause a blind
//! increment or decrement.

use async_trait::async_trait;

use crate::domain::association::{Association, AssociationId, UserId};
use crate::domain::membership::MembershipAction;

/// Errors raised by association repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssociationRepositoryError {
    /// Store connection could not be established.
    #[error("association store connection failed: {message}")]
    Connection {
        /// Adapter-specific failure detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("association store query failed: {message}")]
    Query {
        /// Adapter-specific failure detail.
        message: String,
    },
    /// No document exists for the given identifier.
    #[error("association not found: {id}")]
    NotFound {
        /// The missing document identifier.
        id: AssociationId,
    },
}

impl AssociationRepositoryError {
    /// Construct a [`Self::Connection`] error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Construct a [`Self::Query`] error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Construct a [`Self::NotFound`] error.
    #[must_use]
    pub fn not_found(id: AssociationId) -> Self {
        Self::NotFound { id }
    }
}

/// Outcome of an applied membership toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipChange {
    /// The association after the mutation, as confirmed by the store.
    pub association: Association,
    /// Which transition the store applied.
    pub action: MembershipAction,
}

/// Port for association storage and membership mutation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssociationRepository: Send + Sync {
    /// Fetch every association, ordered by creation time descending.
    ///
    /// No pagination: the full collection is always returned.
    async fn list_all(&self) -> Result<Vec<Association>, AssociationRepositoryError>;

    /// Flip the user's membership on one association.
    ///
    /// The join-versus-leave decision is made from the stored member list,
    /// not from any client-supplied state. Member-list update, counter
    /// update, and update-time stamp are applied as one atomic step; a
    /// failure leaves the document untouched. Removal preserves the order
    /// of the remaining members, and the counter never goes below zero.
    async fn toggle_membership(
        &self,
        association_id: &AssociationId,
        user_id: &UserId,
    ) -> Result<MembershipChange, AssociationRepositoryError>;
}

/// Fixture implementation for tests that do not exercise storage.
///
/// Lookups see an empty collection; toggles report the document missing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAssociationRepository;

#[async_trait]
impl AssociationRepository for FixtureAssociationRepository {
    async fn list_all(&self) -> Result<Vec<Association>, AssociationRepositoryError> {
        Ok(Vec::new())
    }

    async fn toggle_membership(
        &self,
        association_id: &AssociationId,
        _user_id: &UserId,
    ) -> Result<MembershipChange, AssociationRepositoryError> {
        Err(AssociationRepositoryError::not_found(association_id.clone()))
    }
}
