//! End-to-end behavioural tests for the directory and membership endpoints.
//!
//! Each test assembles the full application (session middleware, trace
//! middleware, routes) over a seeded in-memory store and drives it through
//! the HTTP surface, exactly as a browser client would.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web};
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

use backend::domain::association::{AssociationCategory, AssociationDraft};
use backend::domain::{DirectoryService, MembershipService};
use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::InMemoryAssociationStore;
use backend::server::build_app;

const ASSOCIATIONS_PATH: &str = "/api/v1/associations";
const SESSION_COOKIE: &str = "session";

fn draft(
    id: &str,
    name: &str,
    description: &str,
    category: AssociationCategory,
    members: &[&str],
    age_minutes: i64,
) -> AssociationDraft {
    AssociationDraft {
        id: id.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        category,
        member_count: members.len() as u32,
        members: members.iter().map(|&m| m.to_owned()).collect(),
        banner_image: None,
        logo_image: None,
        created_at: Utc::now() - Duration::minutes(age_minutes),
        updated_at: None,
    }
}

fn seeded_drafts() -> Vec<AssociationDraft> {
    vec![
        draft(
            "chess-club",
            "Chess Club",
            "Weekly blitz nights and a slow-play ladder.",
            AssociationCategory::Social,
            &["user-grace"],
            120,
        ),
        draft(
            "debate-society",
            "Debate Society",
            "Argue better, disagree well.",
            AssociationCategory::Academic,
            &[],
            60,
        ),
        draft(
            "trail-runners",
            "Trail Runners",
            "Sunday long runs on the ridge.",
            AssociationCategory::Sports,
            &[],
            0,
        ),
    ]
}

fn state_over(store: InMemoryAssociationStore) -> web::Data<HttpState> {
    let store = Arc::new(store);
    web::Data::new(HttpState::new(
        Arc::new(DirectoryService::new(Arc::clone(&store))),
        Arc::new(MembershipService::new(store)),
    ))
}

async fn seeded_app() -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>
{
    let store = InMemoryAssociationStore::with_seed(seeded_drafts()).expect("valid seed");
    let health_state = web::Data::new(HealthState::new());
    health_state.mark_ready();
    test::init_service(build_app(
        state_over(store),
        health_state,
        Key::generate(),
        false,
    ))
    .await
}

async fn sign_in<S>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "username": username, "password": "password" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK, "login should succeed");

    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .expect("login sets the session cookie")
        .into_owned()
}

async fn browse<S>(app: &S, uri: &str, cookie: Option<&Cookie<'static>>) -> Value
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let mut request = test::TestRequest::get().uri(uri);
    if let Some(cookie) = cookie {
        request = request.cookie(cookie.clone());
    }
    let response = test::call_service(app, request.to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    test::read_body_json(response).await
}

fn card_ids(body: &Value) -> Vec<&str> {
    body["associations"]
        .as_array()
        .expect("associations array")
        .iter()
        .map(|card| card["id"].as_str().expect("card id"))
        .collect()
}

#[actix_web::test]
async fn anonymous_browse_lists_every_association_newest_first() {
    let app = seeded_app().await;

    let body = browse(&app, ASSOCIATIONS_PATH, None).await;
    assert_eq!(body["total"], 3);
    assert_eq!(card_ids(&body), ["trail-runners", "debate-society", "chess-club"]);
    assert!(body.get("emptyState").is_none());

    // Without a session no card carries a joined flag.
    for card in body["associations"].as_array().expect("associations array") {
        assert!(card.get("joined").is_none());
    }
}

#[actix_web::test]
async fn browse_applies_query_and_category_as_a_conjunction() {
    let app = seeded_app().await;

    let matched = browse(&app, "/api/v1/associations?query=chess&category=social", None).await;
    assert_eq!(card_ids(&matched), ["chess-club"]);
    assert_eq!(matched["total"], 3);

    let mismatched =
        browse(&app, "/api/v1/associations?query=chess&category=sports", None).await;
    assert!(card_ids(&mismatched).is_empty());
    assert_eq!(mismatched["emptyState"], "no_matches");
    assert_eq!(mismatched["total"], 3);
}

#[actix_web::test]
async fn browse_rejects_unknown_categories() {
    let app = seeded_app().await;

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/associations?category=robotics")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["value"], "robotics");
}

#[actix_web::test]
async fn an_empty_store_reports_no_associations() {
    let app = test::init_service(build_app(
        state_over(InMemoryAssociationStore::new()),
        web::Data::new(HealthState::new()),
        Key::generate(),
        false,
    ))
    .await;

    let body = browse(&app, ASSOCIATIONS_PATH, None).await;
    assert_eq!(body["total"], 0);
    assert_eq!(body["emptyState"], "no_associations");
}

#[actix_web::test]
async fn toggling_membership_requires_a_session() {
    let app = seeded_app().await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/associations/chess-club/membership")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["details"]["signInUrl"], "/sign-in");
}

#[actix_web::test]
async fn a_signed_in_member_joins_and_then_leaves() {
    let app = seeded_app().await;
    let cookie = sign_in(&app, "ada").await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/associations/chess-club/membership")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let joined: Value = test::read_body_json(response).await;
    assert_eq!(joined["action"], "joined");
    assert_eq!(joined["association"]["memberCount"], 2);
    assert_eq!(
        joined["association"]["memberPreview"],
        json!(["user-grace", "user-ada"])
    );
    assert_eq!(joined["association"]["joined"], true);

    // The directory reflects the confirmed state on the next browse.
    let body = browse(&app, "/api/v1/associations?query=chess", Some(&cookie)).await;
    assert_eq!(body["associations"][0]["memberCount"], 2);
    assert_eq!(body["associations"][0]["joined"], true);

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/associations/chess-club/membership")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let left: Value = test::read_body_json(response).await;
    assert_eq!(left["action"], "left");
    assert_eq!(left["association"]["memberCount"], 1);
    assert_eq!(left["association"]["joined"], false);
    assert_eq!(left["association"]["memberPreview"], json!(["user-grace"]));
}

#[actix_web::test]
async fn toggling_a_missing_association_is_not_found() {
    let app = seeded_app().await;
    let cookie = sign_in(&app, "ada").await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/associations/ghost-club/membership")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "not_found");
}

#[actix_web::test]
async fn login_rejects_wrong_credentials_and_blank_fields() {
    let app = seeded_app().await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "username": "ada", "password": "wrong" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "username": "", "password": "password" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn logout_clears_the_session() {
    let app = seeded_app().await;
    let cookie = sign_in(&app, "ada").await;

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/users/me")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let me: Value = test::read_body_json(response).await;
    assert_eq!(me["id"], "user-ada");

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/logout")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The logout response rewrites the cookie; the original value is stale.
    let cleared = response
        .response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .expect("logout rewrites the session cookie")
        .into_owned();
    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/users/me")
            .cookie(cleared)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn every_response_carries_a_trace_id_header() {
    let app = seeded_app().await;

    let response = test::call_service(
        &app,
        test::TestRequest::get().uri(ASSOCIATIONS_PATH).to_request(),
    )
    .await;
    let header = response
        .headers()
        .get("trace-id")
        .expect("trace-id header present")
        .to_str()
        .expect("ascii header value");
    Uuid::parse_str(header).expect("trace id is a UUID");
}

#[actix_web::test]
async fn health_probes_answer_without_a_session() {
    let app = seeded_app().await;

    for path in ["/healthz/live", "/healthz/ready"] {
        let response =
            test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
        assert_eq!(response.status(), StatusCode::OK, "{path} should be 200");
    }
}
