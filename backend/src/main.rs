//! Backend entry point: wires settings, stores, services, and the HTTP
//! server.

use std::sync::Arc;

use actix_web::{HttpServer, web};
use chrono::{Duration, Utc};
use color_eyre::eyre::WrapErr;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::association::{AssociationCategory, AssociationDraft};
use backend::domain::{DirectoryService, MembershipService};
use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::InMemoryAssociationStore;
use backend::server::build_app;
use backend::server::config::AppSettings;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    let key = settings.session_key()?;
    let bind_addr = settings.bind_addr()?;
    let cookie_secure = settings.cookie_secure;

    let store = if settings.seed_demo_data {
        InMemoryAssociationStore::with_seed(demo_associations())
            .wrap_err("invalid demo association seed")?
    } else {
        InMemoryAssociationStore::new()
    };
    let store = Arc::new(store);

    let state = web::Data::new(HttpState::new(
        Arc::new(DirectoryService::new(Arc::clone(&store))),
        Arc::new(MembershipService::new(store)),
    ));

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays reachable.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let app = build_app(
            state.clone(),
            server_health_state.clone(),
            key.clone(),
            cookie_secure,
        );
        #[cfg(feature = "metrics")]
        let app = app.wrap(make_metrics());
        app
    })
    .bind(bind_addr)?;

    health_state.mark_ready();
    server.run().await.map_err(Into::into)
}

#[cfg(feature = "metrics")]
fn make_metrics() -> actix_web_prom::PrometheusMetrics {
    PrometheusMetricsBuilder::new("jobboard")
        .endpoint("/metrics")
        .build()
        .expect("configure Prometheus metrics")
}

/// Demonstration associations standing in for the documents a production
/// deployment creates out-of-band.
fn demo_associations() -> Vec<AssociationDraft> {
    let now = Utc::now();
    let draft = |id: &str,
                 name: &str,
                 description: &str,
                 category: AssociationCategory,
                 members: &[&str],
                 age_minutes: i64| AssociationDraft {
        id: id.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        category,
        member_count: members.len() as u32,
        members: members.iter().map(|&m| m.to_owned()).collect(),
        banner_image: None,
        logo_image: None,
        created_at: now - Duration::minutes(age_minutes),
        updated_at: None,
    };

    vec![
        draft(
            "chess-club",
            "Chess Club",
            "Weekly blitz nights and a slow-play ladder.",
            AssociationCategory::Social,
            &["user-ada", "user-grace"],
            240,
        ),
        draft(
            "debate-society",
            "Debate Society",
            "Argue better, disagree well.",
            AssociationCategory::Academic,
            &["user-grace"],
            180,
        ),
        draft(
            "trail-runners",
            "Trail Runners",
            "Sunday long runs on the ridge.",
            AssociationCategory::Sports,
            &[],
            120,
        ),
        draft(
            "film-collective",
            "Film Collective",
            "Screenings, shorts, and a yearly festival.",
            AssociationCategory::Cultural,
            &["user-ada"],
            60,
        ),
        draft(
            "startup-network",
            "Startup Network",
            "Founders, internships, and employer meetups.",
            AssociationCategory::Professional,
            &[],
            30,
        ),
    ]
}
