use actix_web::{web, App, HttpResponse, HttpServer};
use sqlx::PgPool;
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;

use feed_service::config::Config;
use feed_service::db::{self, PgPostStore, PgViewerDirectory};
use feed_service::handlers::{get_feed, FeedHandlerState};
use feed_service::middleware::ViewerAuth;
use feed_service::openapi::ApiDoc;
use feed_service::{FeedRanker, FeedService, RankingWeights};

async fn openapi_json(
    doc: web::Data<utoipa::openapi::OpenApi>,
) -> actix_web::Result<HttpResponse> {
    let body = serde_json::to_string(&*doc).map_err(|e| {
        tracing::error!("OpenAPI serialization failed: {}", e);
        actix_web::error::ErrorInternalServerError("OpenAPI serialization error")
    })?;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(body))
}

async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

async fn health_summary() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "feed-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn readiness_check(pool: web::Data<PgPool>) -> HttpResponse {
    match db::ping(pool.get_ref()).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "ready": true })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "ready": false,
            "error": format!("PostgreSQL connection failed: {}", e),
        })),
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_file(true)
                .with_target(true),
        )
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting feed-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let db_pool = match db::create_pool(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {}", e);
            eprintln!("ERROR: Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    if config.database.run_migrations {
        if let Err(e) = db::run_migrations(&db_pool).await {
            tracing::error!("Database migrations failed: {}", e);
            eprintln!("ERROR: Failed to run migrations: {}", e);
            std::process::exit(1);
        }
    }

    let weights = RankingWeights::from(&config.feed);
    tracing::info!(
        content_similarity_weight = weights.content_similarity,
        decay_rate_per_day = weights.decay_rate_per_day,
        "Feed ranker configured"
    );

    let feed = Arc::new(FeedService::new(
        Arc::new(PgPostStore::new(db_pool.clone())),
        Arc::new(PgViewerDirectory::new(db_pool.clone())),
        FeedRanker::with_weights(weights),
    ));

    let feed_state = web::Data::new(FeedHandlerState {
        feed,
        default_page_size: config.feed.default_page_size,
        max_page_size: config.feed.max_page_size,
    });
    let db_pool_data = web::Data::new(db_pool);
    let viewer_auth = ViewerAuth::new(&config.auth.jwt_secret);
    let bind_address = format!("{}:{}", config.app.host, config.app.port);

    tracing::info!("HTTP server listening on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(ApiDoc::openapi()))
            .app_data(feed_state.clone())
            .app_data(db_pool_data.clone())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route(ApiDoc::openapi_json_path(), web::get().to(openapi_json))
            .route(
                "/metrics",
                web::get().to(feed_service::metrics::serve_metrics),
            )
            .route("/api/v1/health", web::get().to(health_summary))
            .route("/api/v1/health/live", web::get().to(liveness_check))
            .route("/api/v1/health/ready", web::get().to(readiness_check))
            .service(
                web::scope("/api/v1/posts")
                    .wrap(viewer_auth.clone())
                    .route("", web::get().to(get_feed)),
            )
    })
    .bind(&bind_address)?
    .run()
    .await
}
