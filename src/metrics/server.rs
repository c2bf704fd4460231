use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use prometheus::{Encoder, Registry, TextEncoder};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::constants::web::{HEALTH_PATH, HEALTH_RESPONSE};

/// Encodes everything gathered from `registry` in the text exposition format
pub fn render(registry: &Registry) -> prometheus::Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;

    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

/// Serves the exposition on `telemetry_path` and a liveness check on
/// `/health` until the listener fails.
///
/// Every connection is handled on its own task; a scrape only reads the
/// registry, so concurrent scrapes never block each other.
pub async fn serve(
    listener: TcpListener,
    registry: Registry,
    telemetry_path: String,
) -> std::io::Result<()> {
    let registry = Arc::new(registry);
    let telemetry_path: Arc<str> = Arc::from(telemetry_path);

    if let Ok(addr) = listener.local_addr() {
        info!(
            "Serving metrics on http://{}{} and health on http://{}{}",
            addr, telemetry_path, addr, HEALTH_PATH
        );
    }

    loop {
        let (stream, peer) = listener.accept().await?;
        let registry = Arc::clone(&registry);
        let telemetry_path = Arc::clone(&telemetry_path);

        tokio::spawn(async move {
            let io = TokioIo::new(stream);
            let service = service_fn(move |req: Request<Incoming>| {
                let response = handle_request(&req, &registry, &telemetry_path);
                async move { Ok::<_, hyper::Error>(response) }
            });

            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                debug!("Connection from {} closed with error: {}", peer, e);
            }
        });
    }
}

fn handle_request(
    req: &Request<Incoming>,
    registry: &Registry,
    telemetry_path: &str,
) -> Response<Full<Bytes>> {
    if req.method() != Method::GET && req.method() != Method::HEAD {
        return plain(StatusCode::METHOD_NOT_ALLOWED, "method not allowed");
    }

    let path = req.uri().path();
    if path == telemetry_path {
        match render(registry) {
            Ok(body) => response(StatusCode::OK, prometheus::TEXT_FORMAT, body),
            Err(e) => {
                error!("Failed to encode metrics: {}", e);
                plain(StatusCode::INTERNAL_SERVER_ERROR, "failed to encode metrics")
            }
        }
    } else if path == HEALTH_PATH {
        plain(StatusCode::OK, HEALTH_RESPONSE)
    } else {
        plain(StatusCode::NOT_FOUND, "not found")
    }
}

fn plain(status: StatusCode, body: &'static str) -> Response<Full<Bytes>> {
    response(status, "text/plain; charset=utf-8", body.to_string())
}

fn response(status: StatusCode, content_type: &'static str, body: String) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus::{IntCounter, Opts};
    use std::net::SocketAddr;

    async fn start_server(registry: Registry) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve(listener, registry, "/metrics".to_string()));
        addr
    }

    fn registry_with_counter() -> Registry {
        let registry = Registry::new();
        let counter = IntCounter::with_opts(Opts::new("requests_total", "Request counter")).unwrap();
        counter.inc_by(3);
        registry.register(Box::new(counter)).unwrap();
        registry
    }

    #[test]
    fn test_render_encodes_registry() {
        let output = render(&registry_with_counter()).unwrap();
        assert!(output.contains("# TYPE requests_total counter"));
        assert!(output.contains("requests_total 3"));
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let addr = start_server(registry_with_counter()).await;

        let response = reqwest::get(format!("http://{}/metrics", addr))
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let content_type = response.headers()[reqwest::header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("text/plain"));
        assert!(response.text().await.unwrap().contains("requests_total 3"));
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let addr = start_server(Registry::new()).await;

        let response = reqwest::get(format!("http://{}/health", addr))
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.text().await.unwrap(), "PONG");
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let addr = start_server(Registry::new()).await;

        let response = reqwest::get(format!("http://{}/other", addr))
            .await
            .unwrap();

        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_post_is_rejected() {
        let addr = start_server(Registry::new()).await;

        let response = reqwest::Client::new()
            .post(format!("http://{}/metrics", addr))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 405);
    }
}
