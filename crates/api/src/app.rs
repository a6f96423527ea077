use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use domain::models::{Customer, Site};
use persistence::db::Databases;
use shared::cache::TtlCache;

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes::{
    attachments, chatbot, comments, health, integrations, snapshots, tickets, users, vehicles,
};
use crate::services::m2m::M2mTokenService;
use crate::services::storage::BlobStorage;

/// TTL caches for the small fleet lookup tables.
pub struct LookupCache {
    pub customers: TtlCache<(), Vec<Customer>>,
    pub sites: TtlCache<i64, Vec<Site>>,
}

impl LookupCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            customers: TtlCache::new(ttl),
            sites: TtlCache::new(ttl),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub databases: Databases,
    pub config: Arc<Config>,
    pub lookups: Arc<LookupCache>,
    pub storage: Arc<dyn BlobStorage>,
    pub m2m: Arc<M2mTokenService>,
}

pub fn create_app(
    config: Config,
    databases: Databases,
    storage: Arc<dyn BlobStorage>,
) -> Router {
    let config = Arc::new(config);

    let m2m = Arc::new(M2mTokenService::new(
        config.m2m.clone(),
        persistence::repositories::M2mTokenRepository::new(databases.helpdesk.clone()),
    ));

    let state = AppState {
        databases,
        config: config.clone(),
        lookups: Arc::new(LookupCache::new(Duration::from_secs(
            config.cache.lookup_ttl_secs,
        ))),
        storage,
        m2m,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Fleet aggregation routes (v1) - read-only telemetry views
    let fleet_routes = Router::new()
        .route("/api/v1/vehicles", get(vehicles::get_vehicles))
        .route("/api/v1/customers", get(vehicles::list_customers))
        .route(
            "/api/v1/customers/:customer_id/sites",
            get(vehicles::list_sites),
        );

    // Helpdesk routes (v1)
    let helpdesk_routes = Router::new()
        .route(
            "/api/v1/tickets",
            get(tickets::list_tickets).post(tickets::create_ticket),
        )
        .route("/api/v1/tickets/import", post(tickets::import_tickets))
        .route("/api/v1/tickets/export", get(tickets::export_tickets_csv))
        .route(
            "/api/v1/tickets/:id",
            get(tickets::get_ticket)
                .patch(tickets::update_ticket)
                .delete(tickets::delete_ticket),
        )
        .route(
            "/api/v1/tickets/:id/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/api/v1/tickets/:id/comments/:comment_id",
            delete(comments::delete_comment),
        )
        .route(
            "/api/v1/tickets/:id/attachments",
            get(attachments::list_attachments).post(attachments::create_attachment),
        )
        .route(
            "/api/v1/attachments/:id",
            get(attachments::download_attachment).delete(attachments::delete_attachment),
        )
        .route(
            "/api/v1/users",
            get(users::list_users).post(users::create_user),
        )
        .route(
            "/api/v1/users/:id",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        .route("/api/v1/roles", get(users::list_roles));

    // Snapshot comparison routes (v1)
    let snapshot_routes = Router::new()
        .route(
            "/api/v1/snapshots/timestamps",
            get(snapshots::list_timestamps),
        )
        .route("/api/v1/snapshots/compare", get(snapshots::compare));

    // Chatbot and integration-status routes (v1)
    let chatbot_routes = Router::new()
        .route("/api/v1/chatbot", post(chatbot::chat))
        .route("/api/v1/integrations/m2m", get(integrations::m2m_status));

    // Public routes (no versioned prefix)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(fleet_routes)
        .merge(helpdesk_routes)
        .merge(snapshot_routes)
        .merge(chatbot_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
