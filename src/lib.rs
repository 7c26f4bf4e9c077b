pub mod config;
pub mod errors;
pub mod games;
mod http;
pub mod middleware;
pub mod models;
pub mod state;

use axum::{Router, http::StatusCode, middleware as axum_middleware};
use config::Config;
use errors::AppError;
use games::board::GameEngine;
use middleware::{
    IpRateLimiter, cors_layer, create_rate_limiter, preflight_no_content, rate_limit_middleware,
    spawn_rate_limiter_cleanup,
};
use rand::{SeedableRng, rngs::StdRng};
use state::AppState;
use std::{net::SocketAddr, time::Duration};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

const RATE_LIMITER_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

pub fn create_app(state: AppState, rate_limiter: IpRateLimiter) -> Router {
    Router::new()
        .merge(http::create_http_routes(state))
        .layer(axum_middleware::from_fn(move |req, next| {
            rate_limit_middleware(rate_limiter.clone(), req, next)
        }))
        .layer(cors_layer())
        .layer(axum_middleware::from_fn(preflight_no_content))
        .layer(TraceLayer::new_for_http())
        .fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") })
}

pub async fn start_server() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "monopoly_be=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    // One generator for the whole process, seeded once
    let rng = match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let engine = GameEngine::new(config.game.clone(), rng)?;
    let rate_limiter = create_rate_limiter(config.rate_limit_per_minute);
    spawn_rate_limiter_cleanup(rate_limiter.clone(), RATE_LIMITER_CLEANUP_INTERVAL);
    let app = create_app(AppState::new(engine), rate_limiter);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!("Game server running at http://{}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
