//! Shared HTTP adapter state.
//!
//! Handlers accept this via `actix_web::web::Data` so they depend only on
//! the driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{DirectoryQuery, MembershipCommand};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Directory browsing use case.
    pub directory: Arc<dyn DirectoryQuery>,
    /// Membership toggle use case.
    pub membership: Arc<dyn MembershipCommand>,
}

impl HttpState {
    /// Bundle the driving ports consumed by the HTTP handlers.
    #[must_use]
    pub fn new(directory: Arc<dyn DirectoryQuery>, membership: Arc<dyn MembershipCommand>) -> Self {
        Self {
            directory,
            membership,
        }
    }
}
