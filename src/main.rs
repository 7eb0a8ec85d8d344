use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use helpdesk_backend::{
    AppState,
    auth::{BcryptHasher, token::TokenIssuer},
    config::Config,
    middleware::{auth_middleware, log_errors},
    routes,
    service::user::UserService,
    store::postgres::PgUserStore,
};
use sqlx::Executor;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Failed to load configuration");

    #[cfg(debug_assertions)]
    tracing::info!("Running in debug mode with CORS enabled");

    #[cfg(not(debug_assertions))]
    tracing::info!("Running in production mode with CORS disabled");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                conn.execute("SET application_name = 'helpdesk_backend';")
                    .await?;
                Ok(())
            })
        })
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to Postgres");

    let tokens = TokenIssuer::from_config(&config);
    let service = UserService::new(
        Arc::new(PgUserStore::new(pool)),
        Arc::new(BcryptHasher::new(config.bcrypt_cost)),
        tokens.clone(),
        config.name_min_length,
    );

    let state = AppState {
        service,
        tokens,
        config: config.clone(),
    };

    // Registration, login, and the email probe stay public.
    let public_routes = Router::new()
        .route("/users/register", post(routes::user::register))
        .route("/users/email-unique", get(routes::user::email_unique))
        .route("/auth/login", post(routes::auth::login));

    // Profile CRUD sits behind the bearer-token middleware.
    let protected_routes = Router::new()
        .route("/users", get(routes::user::get_all))
        .route(
            "/users/{id}",
            get(routes::user::get_by_id)
                .put(routes::user::update)
                .delete(routes::user::remove),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let router = Router::new().nest(
        &config.api_base_uri.clone(),
        Router::new().merge(public_routes).merge(protected_routes),
    );

    let router = router.layer(axum::middleware::from_fn(log_errors));

    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(CorsLayer::permissive())
    };

    let app = router.with_state(state.clone());

    let addr = SocketAddr::new(
        state.config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        state.config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app,
    )
    .await
    .expect("Failed to start server");
}
