//! In-memory association store.
//!
//! Stands in for the remote document collection behind the
//! [`AssociationRepository`] port. One mutex guards the whole collection,
//! which makes the toggle's paired member-list and counter mutation
//! atomic by construction: either both land with the stamped update time,
//! or (on any earlier failure) the document is untouched. Critical
//! sections are lock-only, never held across an await.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::association::{Association, AssociationDraft, AssociationId, UserId};
use crate::domain::membership::MembershipAction;
use crate::domain::ports::{
    AssociationRepository, AssociationRepositoryError, MembershipChange,
};

/// Mutex-guarded association collection.
#[derive(Debug, Default)]
pub struct InMemoryAssociationStore {
    documents: Mutex<Vec<Association>>,
}

impl InMemoryAssociationStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded from raw documents.
    ///
    /// Drafts are validated through the usual deserialization boundary, so
    /// sparse seeds receive the standard defaults.
    pub fn with_seed(
        drafts: Vec<AssociationDraft>,
    ) -> Result<Self, crate::domain::AssociationValidationError> {
        let mut documents = drafts
            .into_iter()
            .map(Association::new)
            .collect::<Result<Vec<_>, _>>()?;
        // Listing order is creation time descending.
        documents.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(Self {
            documents: Mutex::new(documents),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Association>>, AssociationRepositoryError>
    {
        self.documents
            .lock()
            .map_err(|_| AssociationRepositoryError::connection("store mutex poisoned"))
    }
}

#[async_trait]
impl AssociationRepository for InMemoryAssociationStore {
    async fn list_all(&self) -> Result<Vec<Association>, AssociationRepositoryError> {
        Ok(self.lock()?.clone())
    }

    async fn toggle_membership(
        &self,
        association_id: &AssociationId,
        user_id: &UserId,
    ) -> Result<MembershipChange, AssociationRepositoryError> {
        let mut documents = self.lock()?;
        let association = documents
            .iter_mut()
            .find(|candidate| candidate.id() == association_id)
            .ok_or_else(|| AssociationRepositoryError::not_found(association_id.clone()))?;

        let now = Utc::now();
        let action = if association.is_member(user_id) {
            association.retire_member(user_id, now);
            MembershipAction::Left
        } else {
            association.admit_member(user_id.clone(), now);
            MembershipAction::Joined
        };

        Ok(MembershipChange {
            association: association.clone(),
            action,
        })
    }
}
