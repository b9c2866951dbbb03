//! OpenAPI surface used by Swagger UI and tooling.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::domain::directory::EmptyState;
use crate::domain::membership::MembershipAction;
use crate::inbound::http::associations::{
    AssociationResponse, DirectoryResponse, ToggleMembershipResponse,
};
use crate::inbound::http::users::{CurrentUserResponse, LoginRequest};

/// API documentation root.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::associations::browse_associations,
        crate::inbound::http::associations::toggle_membership,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        EmptyState,
        MembershipAction,
        LoginRequest,
        CurrentUserResponse,
        AssociationResponse,
        DirectoryResponse,
        ToggleMembershipResponse,
    )),
    tags(
        (name = "associations", description = "Directory browsing and membership"),
        (name = "users", description = "Session lifecycle"),
        (name = "health", description = "Probes"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_lists_all_operations() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/associations"));
        assert!(
            paths
                .iter()
                .any(|p| p.as_str() == "/api/v1/associations/{id}/membership")
        );
        assert!(paths.iter().any(|p| p.as_str() == "/healthz/ready"));
    }
}
