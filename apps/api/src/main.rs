mod env;
mod openapi;
mod rate_limit;

use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    extract::MatchedPath,
    http::{Request, Response},
};
use sentry::integrations::tower::{NewSentryLayer, SentryHttpLayer};
use tower::ServiceBuilder;
use tower_http::{
    classify::ServerErrorsFailureClass,
    cors::{self, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::prelude::*;

use kickoff_api_interview::InterviewConfig;

use env::env;

fn app() -> Router {
    let env = env();

    let interview_config =
        InterviewConfig::from_env(&env.completion).with_public_base_url(env.public_base_url());

    let daily_limit = rate_limit::RateLimitState::builder(per_ip(432, 200)).build();
    let hourly_limit = rate_limit::RateLimitState::builder(per_ip(72, 50)).build();
    let chat_limit = rate_limit::RateLimitState::builder(per_ip(12, 5))
        .route("/chat")
        .build();
    for limit in [&daily_limit, &hourly_limit, &chat_limit] {
        limit.spawn_pruner(Duration::from_secs(60));
    }

    // Per-minute /chat limit first, so a burst it rejects leaves the hourly
    // and daily budgets untouched.
    let interview_routes = rate_limit::layered(
        kickoff_api_interview::router(interview_config),
        [chat_limit, hourly_limit, daily_limit],
    );

    Router::new()
        .route("/health", axum::routing::get(version))
        .route("/openapi.json", axum::routing::get(openapi_json))
        .merge(interview_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(cors::Any)
                .allow_methods(cors::Any)
                .allow_headers(cors::Any),
        )
        .layer(
            ServiceBuilder::new()
                .layer(NewSentryLayer::<Request<Body>>::new_from_top())
                .layer(SentryHttpLayer::new().enable_transaction())
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(request_span)
                        .on_response(log_response)
                        .on_failure(log_failure),
                ),
        )
}

fn request_span(request: &Request<Body>) -> tracing::Span {
    if request.uri().path() == "/health" {
        return tracing::Span::none();
    }
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or(request.uri().path(), MatchedPath::as_str);
    tracing::info_span!("request", method = %request.method(), route = %route)
}

fn log_response(response: &Response<Body>, latency: Duration, span: &tracing::Span) {
    if !span.is_disabled() {
        tracing::info!(
            parent: span,
            status = response.status().as_u16(),
            latency_ms = latency.as_millis() as u64,
            "request_done"
        );
    }
}

fn log_failure(class: ServerErrorsFailureClass, latency: Duration, span: &tracing::Span) {
    if !span.is_disabled() {
        tracing::error!(
            parent: span,
            %class,
            latency_ms = latency.as_millis() as u64,
            "request_failed"
        );
    }
}

fn per_ip(period_secs: u64, burst: u32) -> governor::Quota {
    governor::Quota::with_period(Duration::from_secs(period_secs))
        .expect("rate limit period is non-zero")
        .allow_burst(NonZeroU32::new(burst).expect("rate limit burst is non-zero"))
}

fn main() -> std::io::Result<()> {
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .expect("failed to install rustls crypto provider");

    let _ = openapi::write_openapi_json();

    let env = env();

    let _guard = sentry::init(sentry::ClientOptions {
        dsn: env.sentry_dsn.as_ref().and_then(|s| s.parse().ok()),
        release: option_env!("APP_VERSION").map(|v| format!("kickoff-api@{}", v).into()),
        environment: Some(
            if cfg!(debug_assertions) {
                "development"
            } else {
                "production"
            }
            .into(),
        ),
        traces_sample_rate: 1.0,
        sample_rate: 1.0,
        attach_stacktrace: true,
        max_breadcrumbs: 100,
        ..Default::default()
    });

    sentry::configure_scope(|scope| {
        scope.set_tag("service", "kickoff-api");
    });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(sentry::integrations::tracing::layer())
        .init();

    tracing::info!(
        model = %env.completion.completion_model,
        timeout_secs = env.completion.completion_timeout_secs,
        "completion_configured"
    );

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let addr = SocketAddr::from(([0, 0, 0, 0], env.port));
            tracing::info!(addr = %addr, "server_listening");

            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(
                listener,
                app().into_make_service_with_connect_info::<SocketAddr>(),
            )
            .with_graceful_shutdown(shutdown_signal())
            .await
        })?;

    if let Some(client) = sentry::Hub::current().client() {
        client.close(Some(Duration::from_secs(2)));
    }

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C signal handler");
    tracing::info!("shutdown_signal_received");
}

async fn openapi_json() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(openapi::openapi())
}

async fn version() -> &'static str {
    option_env!("VERGEN_GIT_SHA").unwrap_or("unknown")
}
