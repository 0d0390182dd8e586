//! Parents in Tech website API composition root
//!
//! Composes the invitation and repository routers into a single application.

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::Router;
use pit_common::env::load_runtime_map;
use pit_common::{Config, LayeredEnv};
use pit_github::{GitHubConfig, GitHubService, GitHubServiceFactory};
use pit_invitations::InvitationsState;
use pit_repos::ReposState;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Invite forms are tiny; anything larger is not a legitimate request.
pub const MAX_BODY_BYTES: usize = 16 * 1024;

/// Create the main application router from configuration
pub fn create_app(config: &Config) -> Result<Router, anyhow::Error> {
    let runtime = match &config.runtime_env_file {
        Some(path) => load_runtime_map(path),
        None => HashMap::new(),
    };
    let env = Arc::new(LayeredEnv::standard(runtime));

    let github: Arc<dyn GitHubService> =
        Arc::from(GitHubServiceFactory::create(GitHubConfig::from(config))?);

    Ok(build_router(github, env))
}

/// Build the router around an existing GitHub service and environment chain
pub fn build_router(github: Arc<dyn GitHubService>, env: Arc<LayeredEnv>) -> Router {
    let invitations_state = InvitationsState {
        github: github.clone(),
        env: env.clone(),
    };
    let repos_state = ReposState { github, env };

    Router::new()
        .route("/health", axum::routing::get(health_check))
        .merge(pit_invitations::routes().with_state(invitations_state))
        .merge(pit_repos::routes().with_state(repos_state))
}

/// CORS for the configured, comma-separated origins. Invalid entries are skipped.
pub fn build_cors_layer(origins: &str) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(%origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
}

pub fn body_limit_layer() -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(MAX_BODY_BYTES)
}

/// Local development stack: body limit outermost, request tracing, permissive CORS
pub fn with_local_middleware(app: Router) -> Router {
    app.layer(
        ServiceBuilder::new()
            .layer(body_limit_layer())
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .into_inner(),
    )
}

/// Lambda stack: request tracing, configured CORS origins, body limit outermost
pub fn with_lambda_middleware(app: Router, cors_origins: &str) -> Router {
    app.layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(cors_origins))
        .layer(body_limit_layer())
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
