//! Directory browsing service.
//!
//! Implements [`DirectoryQuery`] over the association repository: one bulk
//! read per browse, then pure in-memory filtering. There is no partial
//! retry; a failed fetch surfaces one recoverable error and the caller
//! re-issues the whole browse.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::DomainResult;
use crate::domain::directory::{DirectoryFilter, DirectoryView, EmptyState, filter_associations};
use crate::domain::error::Error;
use crate::domain::ports::{AssociationRepository, AssociationRepositoryError, DirectoryQuery};

/// Directory browsing service backed by an association repository.
#[derive(Clone)]
pub struct DirectoryService<R> {
    repo: Arc<R>,
}

impl<R> DirectoryService<R> {
    /// Create a new service over the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> DirectoryService<R>
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
}

#[async_trait]
impl<R> DirectoryQuery for DirectoryService<R>
where
    R: AssociationRepository,
{
    async fn browse(&self, filter: DirectoryFilter) -> DomainResult<DirectoryView> {
        let all = self
            .repo
            .list_all()
            .await
            .map_err(Self::map_repository_error)?;

        let associations = filter_associations(&all, &filter);
        Ok(DirectoryView {
            total: all.len(),
            empty_state: EmptyState::derive(all.len(), associations.len()),
            associations,
        })
    }
}
