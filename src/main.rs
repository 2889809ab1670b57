use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod auth;
mod config;
mod database;
mod error;
mod handlers;
mod hierarchy;
mod middleware;
mod services;

#[cfg(test)]
mod testing;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET_KEY, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = crate::config::config();
    tracing::info!("Starting Identity API in {:?} mode", config.environment);

    tracing_subscriber::fmt::init();

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("IDENTITY_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Identity API Rust server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Protected API (JWT auth)
        .merge(organization_unit_routes())
        .merge(company_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn organization_unit_routes() -> Router {
    use handlers::organization_units as units;

    Router::new()
        // Collection operations
        .route(
            "/api/organization_units",
            get(units::list).post(units::create),
        )
        // Single-unit operations
        .route(
            "/api/organization_units/:id",
            get(units::get)
                .put(units::put)
                .patch(units::patch)
                .delete(units::delete),
        )
        // Children sub-resource
        .route("/api/organization_units/:id/children", get(units::children))
        .route_layer(axum::middleware::from_fn(middleware::jwt_auth_middleware))
}

fn company_routes() -> Router {
    use handlers::companies;
    use handlers::organization_units as units;

    Router::new()
        .route("/api/companies", get(companies::list).post(companies::create))
        .route(
            "/api/companies/:id",
            get(companies::get)
                .put(companies::put)
                .patch(companies::patch)
                .delete(companies::delete),
        )
        // A company's organization-unit forest
        .route("/api/companies/:id/organization_units", get(units::by_company))
        .route_layer(axum::middleware::from_fn(middleware::jwt_auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Identity API (Rust)",
            "version": version,
            "description": "Multi-tenant identity and directory backend built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "companies": "/api/companies[/:id] (protected)",
                "organization_units": "/api/organization_units[/:id] (protected)",
                "organization_unit_children": "/api/organization_units/:id/children (protected)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::manager::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
