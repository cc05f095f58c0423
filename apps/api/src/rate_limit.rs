use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{ConnectInfo, MatchedPath, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use kickoff_api_interview::ErrorResponse;

/// Per-client-IP limiter, optionally restricted to a set of routes.
#[derive(Clone)]
pub struct RateLimitState {
    limiter: Arc<DefaultKeyedRateLimiter<IpAddr>>,
    routes: Option<Arc<[&'static str]>>,
}

pub struct RateLimitStateBuilder {
    quota: Quota,
    routes: Vec<&'static str>,
}

impl RateLimitState {
    pub fn builder(quota: Quota) -> RateLimitStateBuilder {
        RateLimitStateBuilder {
            quota,
            routes: Vec::new(),
        }
    }

    /// Drops per-IP entries whose quota has fully refilled.
    pub fn prune(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    pub fn spawn_pruner(&self, every: Duration) {
        let state = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                state.prune();
                tracing::debug!(clients = state.limiter.len(), "rate_limit_pruned");
            }
        });
    }

    fn applies_to(&self, route: Option<&str>) -> bool {
        match (&self.routes, route) {
            (None, _) => true,
            (Some(routes), Some(route)) => routes.iter().any(|r| *r == route),
            (Some(_), None) => false,
        }
    }
}

impl RateLimitStateBuilder {
    pub fn route(mut self, route: &'static str) -> Self {
        self.routes.push(route);
        self
    }

    pub fn build(self) -> RateLimitState {
        RateLimitState {
            limiter: Arc::new(RateLimiter::keyed(self.quota)),
            routes: (!self.routes.is_empty()).then(|| self.routes.into()),
        }
    }
}

/// Applies `limits` so that they are checked in the given order. A request
/// rejected by one limit is not charged against the ones after it.
pub fn layered(router: Router, limits: impl IntoIterator<Item = RateLimitState>) -> Router {
    let limits: Vec<_> = limits.into_iter().collect();
    limits.into_iter().rev().fold(router, |router, limit| {
        router.route_layer(middleware::from_fn_with_state(limit, rate_limit))
    })
}

pub async fn rate_limit(
    State(state): State<RateLimitState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(MatchedPath::as_str);

    if state.applies_to(route) && state.limiter.check_key(&addr.ip()).is_err() {
        tracing::warn!(client_ip = %addr.ip(), route = ?route, "rate_limit_exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ErrorResponse {
                error: "Rate limit exceeded".to_string(),
            }),
        )
            .into_response();
    }

    next.run(request).await
}
