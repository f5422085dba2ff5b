use std::{
    collections::HashMap,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

#[derive(Debug, Clone)]
struct RateLimitWindow {
    started_at: Instant,
    count: usize,
}

/// Expired windows are swept once the map holds this many clients.
const PRUNE_THRESHOLD: usize = 1024;

/// Fixed-window limiter for every `/api` route, one window per client IP.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    max_requests: usize,
    window: Duration,
    clients: Arc<Mutex<HashMap<IpAddr, RateLimitWindow>>>,
}

impl RateLimitState {
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            clients: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Counts one request from `ip`; returns `false` when its budget for the
    /// current window is spent.
    async fn admit(&self, ip: IpAddr) -> bool {
        let mut clients = self.clients.lock().await;
        if clients.len() >= PRUNE_THRESHOLD {
            let window = self.window;
            clients.retain(|_, w| w.started_at.elapsed() < window);
        }

        let entry = clients.entry(ip).or_insert_with(|| RateLimitWindow {
            started_at: Instant::now(),
            count: 0,
        });
        if entry.started_at.elapsed() >= self.window {
            entry.started_at = Instant::now();
            entry.count = 0;
        }
        if entry.count >= self.max_requests {
            return false;
        }
        entry.count += 1;
        true
    }
}

/// Peer address recorded by `into_make_service_with_connect_info`. Requests
/// without one (in-process tests) share the unspecified address.
fn client_ip(req: &Request) -> IpAddr {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED), |info| info.0.ip())
}

#[derive(Debug, Serialize)]
struct MiddlewareErrorBody {
    error: MiddlewareError,
}

#[derive(Debug, Serialize)]
struct MiddlewareError {
    code: &'static str,
    message: &'static str,
}

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Middleware enforcing a fixed request-per-window limit per client IP.
pub async fn enforce_rate_limit(
    State(rate_limit): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    let ip = client_ip(&req);
    if !rate_limit.admit(ip).await {
        tracing::warn!(
            client_ip = %ip,
            max_requests = rate_limit.max_requests,
            "rate limit exceeded"
        );
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(MiddlewareErrorBody {
                error: MiddlewareError {
                    code: "rate_limited",
                    message: "Too many requests, please try again later.",
                },
            }),
        )
            .into_response();
    }

    next.run(req).await
}
