//! Association directory HTTP handlers.
//!
//! ```text
//! GET  /api/v1/associations?query=chess&category=social
//! POST /api/v1/associations/{id}/membership
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Association, AssociationCategory, AssociationId, CategoryFilter, DirectoryFilter, EmptyState,
    Error, MembershipAction, ToggleRequest, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Cards render at most this many member avatar placeholders.
const MEMBER_PREVIEW_LIMIT: usize = 3;

/// Query parameters for directory browsing.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryParams {
    /// Free-text query matched against name or description.
    pub query: Option<String>,
    /// Category name, or the sentinel `all`.
    pub category: Option<String>,
}

/// One association card.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssociationResponse {
    /// Unique identifier, also the detail-route address.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Category name.
    pub category: String,
    /// Stored member count.
    pub member_count: u32,
    /// Up to three member identifiers for avatar placeholders.
    pub member_preview: Vec<String>,
    /// Whether the viewing user is a member; absent for anonymous viewers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined: Option<bool>,
    /// Optional banner image reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_image: Option<String>,
    /// Optional logo image reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_image: Option<String>,
    /// Creation time, RFC 3339.
    pub created_at: String,
    /// Last mutation time, RFC 3339.
    pub updated_at: String,
}

impl AssociationResponse {
    fn from_domain(association: &Association, viewer: Option<&UserId>) -> Self {
        Self {
            id: association.id().to_string(),
            name: association.name().to_owned(),
            description: association.description().to_owned(),
            category: association.category().to_string(),
            member_count: association.member_count(),
            member_preview: association
                .members()
                .iter()
                .take(MEMBER_PREVIEW_LIMIT)
                .map(ToString::to_string)
                .collect(),
            joined: viewer.map(|user| association.is_member(user)),
            banner_image: association.banner_image().map(str::to_owned),
            logo_image: association.logo_image().map(str::to_owned),
            created_at: association.created_at().to_rfc3339(),
            updated_at: association.updated_at().to_rfc3339(),
        }
    }
}

/// Directory browse payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryResponse {
    /// Total associations before filtering.
    pub total: usize,
    /// Associations matching the filter, newest first.
    pub associations: Vec<AssociationResponse>,
    /// Set when the filtered list is empty, distinguishing "no
    /// associations exist" from "none match the filter".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<EmptyState>,
}

/// Membership toggle payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleMembershipResponse {
    /// Which transition was applied.
    pub action: MembershipAction,
    /// The association after the confirmed mutation.
    pub association: AssociationResponse,
}

fn parse_category(raw: Option<&str>) -> Result<CategoryFilter, Error> {
    let Some(value) = raw else {
        return Ok(CategoryFilter::All);
    };
    if value.eq_ignore_ascii_case("all") {
        return Ok(CategoryFilter::All);
    }
    value
        .parse::<AssociationCategory>()
        .map(CategoryFilter::Only)
        .map_err(|_| {
            Error::invalid_request("unknown category").with_details(json!({
                "field": "category",
                "value": value,
                "code": "unknown_category",
            }))
        })
}

fn parse_association_id(raw: String) -> Result<AssociationId, Error> {
    AssociationId::new(raw).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "id", "code": "empty_association_id" }))
    })
}

/// Browse the association directory.
///
/// Anonymous browsing is allowed; a signed-in viewer additionally gets a
/// `joined` flag on every card.
#[utoipa::path(
    get,
    path = "/api/v1/associations",
    params(DirectoryParams),
    responses(
        (status = 200, description = "Filtered directory", body = DirectoryResponse),
        (status = 400, description = "Invalid filter", body = Error),
        (status = 503, description = "Store unavailable; reload to retry", body = Error)
    ),
    tags = ["associations"],
    operation_id = "browseAssociations"
)]
#[get("/associations")]
pub async fn browse_associations(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<DirectoryParams>,
) -> ApiResult<web::Json<DirectoryResponse>> {
    let params = params.into_inner();
    let viewer = session.user_id()?;
    let filter = DirectoryFilter {
        query: params.query.unwrap_or_default(),
        category: parse_category(params.category.as_deref())?,
    };

    let view = state.directory.browse(filter).await?;
    Ok(web::Json(DirectoryResponse {
        total: view.total,
        associations: view
            .associations
            .iter()
            .map(|association| AssociationResponse::from_domain(association, viewer.as_ref()))
            .collect(),
        empty_state: view.empty_state,
    }))
}

/// Toggle the signed-in user's membership on one association.
#[utoipa::path(
    post,
    path = "/api/v1/associations/{id}/membership",
    params(("id" = String, Path, description = "Association identifier")),
    responses(
        (status = 200, description = "Membership flipped", body = ToggleMembershipResponse),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 401, description = "Sign-in required", body = Error),
        (status = 404, description = "Association not found", body = Error),
        (status = 409, description = "A toggle is already in flight", body = Error)
    ),
    tags = ["associations"],
    operation_id = "toggleMembership"
)]
#[post("/associations/{id}/membership")]
pub async fn toggle_membership(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ToggleMembershipResponse>> {
    // Precondition: without an identity no request reaches the store.
    let user_id = session.require_user_id()?;
    let association_id = parse_association_id(path.into_inner())?;

    let response = state
        .membership
        .toggle(ToggleRequest {
            user_id: user_id.clone(),
            association_id,
        })
        .await?;

    Ok(web::Json(ToggleMembershipResponse {
        action: response.action,
        association: AssociationResponse::from_domain(&response.association, Some(&user_id)),
    }))
}
