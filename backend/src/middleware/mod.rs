//! Cross-cutting Actix middleware.

pub mod trace;
