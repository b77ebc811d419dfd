use anyhow::Context;
use axum::{middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use taatik_api::{config, datastore::DataClient, middleware as mw, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATASTORE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting Taatik API in {:?} mode", config.environment);

    // Refuse to start without datastore credentials
    let data = DataClient::from_config(config).context("failed to initialize datastore client")?;

    let app = app(AppState::new(data));

    // Allow tests or deployments to override port via env
    let port = std::env::var("TAATIK_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(5000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    println!("🚀 Taatik API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server")?;
    Ok(())
}

fn app(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(root))
        .nest("/api", api_routes(state));

    let config = config::config();
    if config.api.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

fn api_routes(state: AppState) -> Router {
    use taatik_api::handlers::{articles, user};

    // Public: no auth at all
    let public = Router::new().route("/health", get(health));

    // Freemium: optional auth, anonymous requests proceed
    let freemium = Router::new()
        .route("/article/:id", get(articles::article_get))
        .route("/info/arabic-taatic-map", get(articles::arabic_taatic_map_get))
        .route("/info/arabic-vowels", get(articles::arabic_vowels_get))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            mw::optional_auth,
        ));

    // Protected: bearer token required
    let protected = Router::new()
        .route("/dictionary", get(articles::dictionary_list_get))
        .route("/dictionary/:id", get(articles::dictionary_entry_get))
        .route("/verb-tables", get(articles::binyan_lists_get))
        .route("/verb-tables/binyan", get(articles::conjugation_table_get))
        .route(
            "/user/starred",
            get(user::starred_get).put(user::starred_put),
        )
        .route(
            "/user/video-order",
            get(user::video_order_get).put(user::video_order_put),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            mw::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(freemium)
        .merge(protected)
        .with_state(state)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Taatik API",
        "version": version,
        "description": "Arabic/Hebrew language-learning backend (transcriptions, dictionary, verb tables)",
        "endpoints": {
            "health": "/api/health (public)",
            "article": "/api/article/:id (optional auth)",
            "info": "/api/info/arabic-taatic-map, /api/info/arabic-vowels (optional auth)",
            "dictionary": "/api/dictionary[?articleId=&term=], /api/dictionary/:id (protected)",
            "verb_tables": "/api/verb-tables, /api/verb-tables/binyan?wazenId= (protected)",
            "user": "/api/user/starred, /api/user/video-order (protected)",
        }
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
    }))
}
