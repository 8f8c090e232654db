use axum::{
    body::Body,
    extract::{ConnectInfo, Request},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor, GovernorLayer};

/// IP-keyed governor layer
pub type IpGovernorLayer = GovernorLayer<
    PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware<governor::clock::QuantaInstant>,
    Body,
>;

fn ip_governor(per_ms: u64, burst: u32) -> IpGovernorLayer {
    let config = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(burst)
            .finish()
            .expect("rate limit period and burst must be non-zero"),
    );

    GovernorLayer::new(config)
}

/// Global limit per IP address, applied in front of everything
/// - 1000 requests per minute (one token every 60ms)
pub fn create_global_governor() -> IpGovernorLayer {
    ip_governor(60, 1000)
}

/// Limit for unauthenticated catalog and auth routes
/// - 100 requests per minute per IP
pub fn create_public_governor() -> IpGovernorLayer {
    ip_governor(600, 100)
}

/// Middleware to log rate limiting and request details
pub async fn log_request(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    tracing::debug!(
        client_ip = %addr.ip(),
        method = %method,
        uri = %uri,
        "Incoming request"
    );

    let response = next.run(request).await;
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        tracing::warn!(
            client_ip = %addr.ip(),
            method = %method,
            uri = %uri,
            "Rate limited"
        );
    } else if status.is_client_error() || status.is_server_error() {
        tracing::warn!(
            client_ip = %addr.ip(),
            method = %method,
            uri = %uri,
            status = %status,
            "Request failed"
        );
    } else {
        tracing::debug!(
            client_ip = %addr.ip(),
            method = %method,
            uri = %uri,
            status = %status,
            "Request completed"
        );
    }

    response
}
