//! Domain ports for the hexagonal boundary.
//!
//! Driven ports ([`AssociationRepository`]) are implemented by outbound
//! adapters; driving ports ([`DirectoryQuery`], [`MembershipCommand`]) are
//! implemented by domain services and consumed by inbound adapters.

mod association_repository;
mod directory_query;
mod membership_command;

#[cfg(test)]
pub use association_repository::MockAssociationRepository;
pub use association_repository::{
    AssociationRepository, AssociationRepositoryError, FixtureAssociationRepository,
    MembershipChange,
};
#[cfg(test)]
pub use directory_query::MockDirectoryQuery;
pub use directory_query::{DirectoryQuery, FixtureDirectoryQuery};
#[cfg(test)]
pub use membership_command::MockMembershipCommand;
pub use membership_command::{FixtureMembershipCommand, MembershipCommand};
