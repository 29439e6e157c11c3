pub mod domain;
pub mod handlers;
pub mod projections;
pub mod shared;
pub mod system;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::middleware;
    use axum::{
        routing::{get, post},
        Router,
    };
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};
    use tower_http::services::ServeDir;

    use axum::http::{header, Method};

    system::tracing::initialize()?;

    // Load config and open the database
    let config = shared::config::load_config()?;
    let db_path = shared::config::get_database_path(&config)?;
    shared::data::db::initialize_database(&db_path.to_string_lossy())
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    // Ensure admin user exists
    system::initialization::ensure_admin_user_exists().await?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES (PUBLIC)
        // ========================================
        .route(
            "/api/system/auth/login",
            post(system::handlers::auth::login),
        )
        .route(
            "/api/system/auth/refresh",
            post(system::handlers::auth::refresh),
        )
        .route(
            "/api/system/auth/logout",
            post(system::handlers::auth::logout),
        )
        // System auth routes (protected)
        .route(
            "/api/system/auth/me",
            get(system::handlers::auth::current_user)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // System users management (admin only)
        .route(
            "/api/system/users",
            get(system::handlers::users::list)
                .post(system::handlers::users::create)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/system/users/:id",
            get(system::handlers::users::get_by_id)
                .put(system::handlers::users::update)
                .delete(system::handlers::users::delete)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/system/users/:id/change-password",
            post(system::handlers::users::change_password)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // ========================================
        // BUSINESS ROUTES (without auth for now)
        // ========================================
        // Lead handlers
        .route(
            "/api/lead",
            get(handlers::a001_lead::list_all).post(handlers::a001_lead::create),
        )
        .route(
            "/api/lead/export.csv",
            get(handlers::a001_lead::export_csv),
        )
        .route(
            "/api/lead/testdata",
            post(handlers::a001_lead::insert_test_data),
        )
        .route(
            "/api/lead/:id",
            get(handlers::a001_lead::get_by_id)
                .put(handlers::a001_lead::update)
                .delete(handlers::a001_lead::delete),
        )
        .route(
            "/api/lead/:id/status",
            post(handlers::a001_lead::update_status),
        )
        .route(
            "/api/lead/:id/finance-status",
            post(handlers::a001_lead::set_finance_status),
        )
        // Quotation handlers
        .route(
            "/api/quotation",
            get(handlers::a002_quotation::list_all).post(handlers::a002_quotation::upsert),
        )
        .route(
            "/api/quotation/preview",
            post(handlers::a002_quotation::preview),
        )
        .route(
            "/api/quotation/:id",
            get(handlers::a002_quotation::get_by_id).delete(handlers::a002_quotation::delete),
        )
        // P900 Pipeline Board
        .route(
            "/api/p900/pipeline-board",
            get(handlers::p900_pipeline_board::get_board),
        )
        .fallback_service(ServeDir::new("dist"))
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
        .layer(cors);

    let addr: SocketAddr = ([0, 0, 0, 0], config.server.port).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    config.server.port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", config.server.port, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
