use std::sync::Arc;

use axum::{middleware, routing::get, Json, Router};
use sqlx::postgres::PgPoolOptions;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use taskhub::adapters::auth::{Argon2Hasher, JwtAuth};
use taskhub::adapters::broker::{AmqpChangeNotifier, BrokerConnection};
use taskhub::adapters::http::middleware::{auth_middleware, AuthState};
use taskhub::adapters::http::{auth_routes, list_routes, todo_routes};
use taskhub::adapters::postgres::{
    PostgresListRepository, PostgresTodoRepository, PostgresUserRepository,
};
use taskhub::adapters::websocket::{notification_router, NotificationState, PushRegistry};
use taskhub::application::{ListService, TodoService, UserService};
use taskhub::config::AppConfig;
use taskhub::ports::TokenIssuer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.server.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database ready");

    // The broker connects lazily; a failure here is logged and retried
    // on the first publish or push subscription.
    let broker = Arc::new(BrokerConnection::new(&config.broker));
    if let Err(e) = broker.ensure_connected().await {
        tracing::warn!("Broker not reachable at startup: {}", e);
    }

    let todo_repo = Arc::new(PostgresTodoRepository::new(pool.clone()));
    let list_repo = Arc::new(PostgresListRepository::new(pool.clone()));
    let user_repo = Arc::new(PostgresUserRepository::new(pool.clone()));

    let jwt = Arc::new(JwtAuth::new(&config.auth, user_repo.clone()));
    let notifier = Arc::new(AmqpChangeNotifier::new(broker.clone()));

    let todo_service = Arc::new(TodoService::new(
        todo_repo.clone(),
        list_repo.clone(),
        notifier,
    ));
    let list_service = Arc::new(ListService::new(list_repo, todo_repo));
    let token_issuer: Arc<dyn TokenIssuer> = jwt.clone();
    let user_service = Arc::new(UserService::new(
        user_repo,
        Arc::new(Argon2Hasher::new()),
        token_issuer,
    ));

    let auth_state: AuthState = jwt;
    let registry = Arc::new(PushRegistry::new());

    let api = Router::new()
        .nest("/auth", auth_routes(user_service))
        .merge(list_routes(list_service))
        .merge(todo_routes(todo_service))
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    let app = api
        .merge(notification_router(NotificationState::new(
            registry,
            broker.clone(),
        )))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    broker.close().await;
    tracing::info!("Shut down cleanly");
    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
