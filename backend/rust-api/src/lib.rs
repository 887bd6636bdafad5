use axum::{
    http::{header, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod db;
pub mod extractors;
pub mod handlers;
pub mod metrics;
pub mod middlewares;
pub mod models;
pub mod services;

pub use config::Config;
pub use services::AppState;

pub fn create_router(app_state: Arc<AppState>) -> Router {
    // The game client is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_LENGTH,
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
        ]);

    Router::new()
        .route("/health", get(handlers::health_check))
        // Metrics endpoint with Basic Auth protection
        .route(
            "/metrics",
            get(handlers::metrics_handler).layer(middleware::from_fn_with_state(
                app_state.clone(),
                handlers::metrics_auth_middleware,
            )),
        )
        .nest("/api", api_routes())
        .with_state(app_state)
        .layer(cors)
        .layer(middleware::from_fn(
            middlewares::metrics::metrics_middleware,
        ))
        .layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/players", post(handlers::players::create_player))
        .route(
            "/players/{id}",
            get(handlers::players::get_player).put(handlers::players::update_player),
        )
        .route("/players/{id}/stats", get(handlers::players::player_stats))
        .route("/questions", get(handlers::questions::list_questions))
        .route("/questions/random", get(handlers::questions::random_question))
        .route("/questions/{id}", get(handlers::questions::get_question))
        .route(
            "/interactions",
            post(handlers::interactions::create_interaction),
        )
        .route(
            "/interactions/player/{player_id}",
            get(handlers::interactions::player_interactions),
        )
}
