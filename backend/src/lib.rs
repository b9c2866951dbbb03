//! Association directory backend.
//!
//! Serves the joinable-communities directory of the job-board platform:
//! browsing associations with free-text and category filtering, and the
//! join/leave membership toggle for authenticated users. Domain logic sits
//! behind hexagonal ports; Actix Web adapters live at the edges.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use doc::ApiDoc;
pub use middleware::trace::Trace;
