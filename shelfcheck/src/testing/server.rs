//! HTTP front for the stub catalog.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Method, Request, Response, header};
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::client::ApiClient;
use crate::config::ApiConfig;
use crate::error::Result;

use super::catalog::{Catalog, Reply};

const JSON_UTF8: &str = "application/json; charset=utf-8";

/// A request as the stub saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

struct Shared {
    catalog: Mutex<Catalog>,
    requests: Mutex<Vec<RecordedRequest>>,
    latency: Duration,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Options for [`StubCatalog`].
#[derive(Debug, Clone)]
pub struct StubOptions {
    pub books: i64,
    pub authors: i64,
    /// Delay added before every reply.
    pub latency: Duration,
}

impl Default for StubOptions {
    fn default() -> Self {
        Self {
            books: 200,
            authors: 600,
            latency: Duration::ZERO,
        }
    }
}

impl StubOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn books(mut self, count: i64) -> Self {
        self.books = count;
        self
    }

    pub fn authors(mut self, count: i64) -> Self {
        self.authors = count;
        self
    }

    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub async fn start(self) -> Result<StubCatalog> {
        StubCatalog::with_options(self).await
    }
}

/// An imitation of the catalog service listening on a random local port.
///
/// The server runs on a background task and stops when the handle is
/// dropped.
///
/// # Examples
///
/// ```ignore
/// use shelfcheck::testing::StubCatalog;
///
/// let stub = StubCatalog::start().await?;
/// let client = stub.client()?;
/// let response = client.get(&client.config().books_url()).await?;
/// assert_eq!(response.status_code(), 200);
/// ```
pub struct StubCatalog {
    addr: SocketAddr,
    shared: Arc<Shared>,
    _shutdown: oneshot::Sender<()>,
}

impl StubCatalog {
    /// Starts a stub with the default seed data.
    pub async fn start() -> Result<Self> {
        Self::with_options(StubOptions::default()).await
    }

    pub async fn with_options(options: StubOptions) -> Result<Self> {
        let shared = Arc::new(Shared {
            catalog: Mutex::new(Catalog::seeded(options.books, options.authors)),
            requests: Mutex::new(Vec::new()),
            latency: options.latency,
        });

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let server_state = shared.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    result = listener.accept() => {
                        match result {
                            Ok((stream, _)) => {
                                let io = TokioIo::new(stream);
                                let shared = server_state.clone();

                                tokio::spawn(async move {
                                    let service = service_fn(move |req: Request<Incoming>| {
                                        let shared = shared.clone();
                                        async move {
                                            Ok::<_, std::convert::Infallible>(serve(req, &shared).await)
                                        }
                                    });

                                    if let Err(e) = http1::Builder::new()
                                        .serve_connection(io, service)
                                        .await
                                    {
                                        debug!(error = %e, "stub connection closed");
                                    }
                                });
                            }
                            Err(e) => {
                                warn!(error = %e, "stub listener failed");
                                break;
                            }
                        }
                    }
                    _ = &mut shutdown_rx => {
                        break;
                    }
                }
            }
        });

        debug!(%addr, "stub catalog listening");
        Ok(Self {
            addr,
            shared,
            _shutdown: shutdown_tx,
        })
    }

    /// Returns the address the stub is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// A configuration pointing at this stub.
    pub fn config(&self) -> ApiConfig {
        ApiConfig::default()
            .with_base_url(self.base_url())
            .with_system_proxy(false)
    }

    /// A client pointing at this stub.
    pub fn client(&self) -> Result<ApiClient> {
        ApiClient::new(self.config())
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.shared.requests).clone()
    }

    /// Runs `f` against the current catalog contents.
    pub fn inspect<R>(&self, f: impl FnOnce(&Catalog) -> R) -> R {
        f(&lock(&self.shared.catalog))
    }
}

async fn serve(req: Request<Incoming>, shared: &Shared) -> Response<Full<Bytes>> {
    let (parts, body) = req.into_parts();
    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            debug!(error = %e, "failed to read stub request body");
            Bytes::new()
        }
    };

    let path = parts.uri.path().to_string();
    let reply = lock(&shared.catalog).handle(&parts.method, &path, &body);

    debug!(method = %parts.method, %path, status = reply.status.as_u16(), "stub request");
    lock(&shared.requests).push(RecordedRequest {
        method: parts.method,
        path,
        headers: parts.headers,
        body,
    });

    if !shared.latency.is_zero() {
        tokio::time::sleep(shared.latency).await;
    }

    into_response(reply)
}

fn into_response(reply: Reply) -> Response<Full<Bytes>> {
    let has_body = reply.body.is_some();
    let mut response = Response::new(Full::new(reply.body.unwrap_or_default()));
    *response.status_mut() = reply.status;

    let headers = response.headers_mut();
    headers.insert("api-supported-versions", HeaderValue::from_static("1.0"));
    if has_body {
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8));
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_into_response_headers() {
        let response = into_response(Reply {
            status: StatusCode::CREATED,
            body: Some(Bytes::from_static(b"{}")),
        });
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::CONTENT_TYPE], JSON_UTF8);
        assert_eq!(response.headers()["api-supported-versions"], "1.0");
    }

    #[test]
    fn test_empty_reply_has_no_content_type() {
        let response = into_response(Reply {
            status: StatusCode::OK,
            body: None,
        });
        assert!(!response.headers().contains_key(header::CONTENT_TYPE));
    }

    #[test]
    fn test_stub_options_builder() {
        let options = StubOptions::new()
            .books(3)
            .authors(0)
            .latency(Duration::from_millis(20));
        assert_eq!(options.books, 3);
        assert_eq!(options.authors, 0);
        assert_eq!(options.latency, Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_stub_addr() {
        let stub = StubCatalog::start().await.unwrap();
        assert!(stub.addr().port() > 0);
        assert_eq!(stub.addr().ip().to_string(), "127.0.0.1");
        assert!(stub.base_url().starts_with("http://127.0.0.1:"));
        assert_eq!(stub.inspect(|c| c.books().count()), 200);
        assert!(stub.requests().is_empty());
    }
}
