use kontrollitud::{
    application::{
        submit_company::use_case::SubmitCompanyUseCase, submit_review::use_case::SubmitReviewUseCase,
    },
    config::Config,
    infrastructure::{
        database::pool::create_pool,
        email::mailer::HttpMailer,
        moderation::content::RuleSet,
        repositories::{
            sqlx_company_repository::SqlxCompanyRepository,
            sqlx_review_repository::SqlxReviewRepository,
        },
    },
    presentation::http::{routes::create_router, state::AppState},
    workers::subscription_checker::SubscriptionCheckWorker,
};
use axum::extract::DefaultBodyLimit;
use http::{HeaderValue, Method, header};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging with safe environment filter
    // Uses RUST_LOG if set, otherwise uses sensible defaults
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| {
            tracing_subscriber::EnvFilter::try_new("info,kontrollitud=debug,tower_http=debug")
        })
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env()?;
    let db = create_pool(&config.database_url, config.database_max_connections).await?;
    let mut migrator = sqlx::migrate!("./migrations");
    migrator.set_ignore_missing(config.ignore_missing_migrations);
    migrator.run(&db).await?;

    let redis = redis::Client::open(config.redis_url.clone())?;

    let company_repo = Arc::new(SqlxCompanyRepository::new(db.clone()));
    let review_repo = Arc::new(SqlxReviewRepository::new(db.clone()));
    let mailer = Arc::new(HttpMailer::new(
        config.email_api_url.clone(),
        config.email_api_key.clone(),
        config.email_from.clone(),
    ));
    let rules = Arc::new(RuleSet::default());

    let submit_company = Arc::new(SubmitCompanyUseCase::new(
        company_repo.clone(),
        rules.clone(),
    ));
    let submit_review = Arc::new(SubmitReviewUseCase::new(
        review_repo.clone(),
        company_repo.clone(),
        Some(redis.clone()),
        rules.clone(),
    ));

    let subscription_worker = Arc::new(SubscriptionCheckWorker::new(
        company_repo.clone(),
        mailer.clone(),
        config.subscription_check_interval_seconds,
        config.email_send_timeout_seconds,
    ));

    let state = AppState {
        db: db.clone(),
        redis,
        config: config.clone(),
        company_repo,
        review_repo,
        submit_company,
        submit_review,
        subscription_worker: subscription_worker.clone(),
    };

    if config.enable_subscription_checker {
        let worker = subscription_worker.clone();
        tokio::spawn(async move { worker.start().await });
    }

    // Configure CORS with security in mind
    // In production, specify explicit allowed origins from config
    let cors = if cfg!(debug_assertions) {
        // Development: allow any origin
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
            .max_age(Duration::from_secs(3600))
    } else {
        // Production: restrict to the public site and admin panel
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(vec![
                HeaderValue::from_static("https://kontrollitud.ee"),
                HeaderValue::from_static("https://www.kontrollitud.ee"),
            ]))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
            .max_age(Duration::from_secs(3600))
    };

    let app = create_router(state)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("kontrollitud api listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("SIGTERM received, initiating graceful shutdown");
        }
    }
}
