//! Driving port for browsing the association directory.

use async_trait::async_trait;

use crate::domain::DomainResult;
use crate::domain::directory::{DirectoryFilter, DirectoryView, EmptyState};

/// Use-case port for directory browsing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryQuery: Send + Sync {
    /// Fetch the full association set and apply the filter.
    ///
    /// The view always carries the unfiltered total so callers can
    /// distinguish "nothing exists" from "nothing matches".
    async fn browse(&self, filter: DirectoryFilter) -> DomainResult<DirectoryView>;
}

/// Fixture implementation serving an empty directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDirectoryQuery;

#[async_trait]
impl DirectoryQuery for FixtureDirectoryQuery {
    async fn browse(&self, _filter: DirectoryFilter) -> DomainResult<DirectoryView> {
        Ok(DirectoryView {
            total: 0,
            associations: Vec::new(),
            empty_state: Some(EmptyState::NoAssociations),
        })
    }
}
