//! campus-rs server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use campus_api::{chat_handler, middleware::AppState, router as api_router, ChatState};
use campus_common::Config;
use campus_core::{
    AccountService, CourseService, EnrollmentService, FeedbackService, MaterialService,
    NotificationService, StatusUpdateService,
};
use campus_db::repositories::{
    CourseMaterialRepository, CourseRepository, EnrollmentRepository, FeedbackRepository,
    NotificationRepository, StatusUpdateRepository, UserRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional; real deployments set the environment directly
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campus=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting campus-rs server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = campus_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    campus_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let course_repo = CourseRepository::new(Arc::clone(&db));
    let enrollment_repo = EnrollmentRepository::new(Arc::clone(&db));
    let feedback_repo = FeedbackRepository::new(Arc::clone(&db));
    let material_repo = CourseMaterialRepository::new(Arc::clone(&db));
    let status_update_repo = StatusUpdateRepository::new(Arc::clone(&db));
    let notification_repo = NotificationRepository::new(Arc::clone(&db));

    // Initialize services
    let account_service = AccountService::new(user_repo.clone());
    let notification_service = NotificationService::new(notification_repo);
    let course_service = CourseService::new(course_repo.clone(), user_repo.clone());
    let enrollment_service = EnrollmentService::new(
        enrollment_repo.clone(),
        course_repo.clone(),
        user_repo.clone(),
        notification_service.clone(),
    );
    let feedback_service = FeedbackService::new(
        feedback_repo,
        enrollment_repo.clone(),
        course_repo.clone(),
        user_repo.clone(),
    );
    let material_service = MaterialService::new(
        material_repo,
        course_repo,
        enrollment_repo,
        user_repo.clone(),
        notification_service.clone(),
    );
    let status_update_service = StatusUpdateService::new(status_update_repo, user_repo);

    let state = AppState {
        account_service,
        course_service,
        enrollment_service,
        feedback_service,
        material_service,
        status_update_service,
        notification_service,
        chat: ChatState::new(),
    };

    // Build the application router
    let app = Router::new()
        .route("/chat", get(chat_handler))
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            campus_api::middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
