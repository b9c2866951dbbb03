//! Domain entities, pure filtering logic, and services.
//!
//! Types here are transport agnostic. Inbound adapters translate them to
//! HTTP payloads; outbound adapters implement the driven ports under
//! [`ports`].

pub mod association;
pub mod directory;
pub mod directory_service;
pub mod error;
pub mod membership;
pub mod ports;

pub use self::association::{
    Association, AssociationCategory, AssociationDraft, AssociationId, AssociationValidationError,
    UserId,
};
pub use self::directory::{CategoryFilter, DirectoryFilter, DirectoryView, EmptyState};
pub use self::directory_service::DirectoryService;
pub use self::error::{Error, ErrorCode};
pub use self::membership::{MembershipAction, MembershipService, ToggleRequest, ToggleResponse};

/// Convenient result alias for domain operations.
pub type DomainResult<T> = Result<T, Error>;

/// Response header carrying the request-scoped trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
