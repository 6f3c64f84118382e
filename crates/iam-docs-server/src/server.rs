//! HTTP server for the API reference viewer.
//!
//! Every page request runs the document source selector against the
//! request's own query string and renders the Swagger UI page for it.
//!
//! # Routes
//!
//! | Path                      | Response                                   |
//! |---------------------------|--------------------------------------------|
//! | `/`, `/index.html`        | Viewer page (`text/html`)                  |
//! | `/swagger-initializer.js` | Initializer script alone                   |
//! | `/swagger-config.json`    | Viewer configuration the page would use    |
//! | `/health`                 | Liveness probe                             |
//! | `/ready`                  | Readiness probe, 503 once shutdown begins  |
//!
//! Only `GET` and `HEAD` are accepted. The OpenAPI documents themselves are
//! served elsewhere; requests for them get the same 404 as any other path.
//!
//! # Example
//!
//! ```rust,ignore
//! use iam_docs_server::DocsServer;
//! use iam_docs_config::DocsServiceConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let server = DocsServer::from_service_config(&DocsServiceConfig::default())?;
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http::header::{self, HeaderValue};
use http::{Method, Request, Response, StatusCode, Uri};
use http_body_util::Full;
use hyper::body::{Body as _, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::{TokioIo, TokioTimer};
use serde::Serialize;
use tokio::net::{TcpListener, TcpStream};

use iam_docs::{DocumentSourceSelector, QueryParams, SwaggerUi};
use iam_docs_config::DocsServiceConfig;
use iam_docs_telemetry::{log_request_complete, log_request_error};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::health::{HealthCheck, ReadinessCheck};
use crate::shutdown::{ConnectionTracker, ShutdownSignal};

/// Type alias for HTTP response body.
pub type ResponseBody = Full<Bytes>;

/// Type alias for the HTTP response.
pub type HttpResponse = Response<ResponseBody>;

/// Service name reported by the health probe.
pub const SERVICE_NAME: &str = "iam-docs";

const ALLOWED_METHODS: &str = "GET, HEAD";

const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";
const CONTENT_TYPE_JS: &str = "application/javascript; charset=utf-8";
const CONTENT_TYPE_JSON: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Page,
    InitializerScript,
    ViewerConfig,
    Health,
    Ready,
}

impl Route {
    fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" | "/index.html" => Some(Self::Page),
            "/swagger-initializer.js" => Some(Self::InitializerScript),
            "/swagger-config.json" => Some(Self::ViewerConfig),
            "/health" => Some(Self::Health),
            "/ready" => Some(Self::Ready),
            _ => None,
        }
    }
}

/// The docs HTTP server.
///
/// Holds the selector and the Swagger UI backend. Both are immutable and
/// shared by every connection.
#[derive(Debug)]
pub struct DocsServer {
    config: ServerConfig,
    selector: DocumentSourceSelector,
    swagger: SwaggerUi,
    health: HealthCheck,
    readiness: ReadinessCheck,
}

impl DocsServer {
    /// Creates a server from its parts.
    ///
    /// ```rust
    /// use iam_docs::{DocumentSourceSelector, SwaggerUi};
    /// use iam_docs_server::{DocsServer, ServerConfig};
    ///
    /// let server = DocsServer::new(
    ///     ServerConfig::builder().http_addr("127.0.0.1:0").build(),
    ///     DocumentSourceSelector::iam(),
    ///     SwaggerUi::new(),
    /// );
    /// assert!(server.readiness().is_ready());
    /// ```
    #[must_use]
    pub fn new(config: ServerConfig, selector: DocumentSourceSelector, swagger: SwaggerUi) -> Self {
        let catalog_loaded = !selector.catalog().is_empty();

        Self {
            config,
            selector,
            swagger,
            health: HealthCheck::new(SERVICE_NAME, env!("CARGO_PKG_VERSION")),
            readiness: ReadinessCheck::new().add_check("catalog", move || catalog_loaded),
        }
    }

    /// Creates a server from the loaded service configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Config`] if the document list is not a valid
    /// catalog.
    pub fn from_service_config(config: &DocsServiceConfig) -> ServerResult<Self> {
        Ok(Self::new(
            ServerConfig::from(&config.server),
            config.viewer.selector()?,
            config.viewer.swagger_ui(),
        ))
    }

    /// Returns the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the document source selector.
    #[must_use]
    pub fn selector(&self) -> &DocumentSourceSelector {
        &self.selector
    }

    /// Returns the liveness probe.
    #[must_use]
    pub fn health(&self) -> &HealthCheck {
        &self.health
    }

    /// Returns the readiness probe.
    #[must_use]
    pub fn readiness(&self) -> &ReadinessCheck {
        &self.readiness
    }

    /// Runs the server until SIGTERM or SIGINT.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid or cannot be bound.
    pub async fn run(self) -> ServerResult<()> {
        let shutdown = ShutdownSignal::with_os_signals();
        self.run_with_shutdown(shutdown).await
    }

    /// Binds the configured address and serves until `shutdown` fires.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid or cannot be bound.
    pub async fn run_with_shutdown(self, shutdown: ShutdownSignal) -> ServerResult<()> {
        let addr = self
            .config
            .socket_addr()
            .map_err(|source| ServerError::InvalidAddress {
                addr: self.config.http_addr().to_string(),
                source,
            })?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;

        self.serve(listener, shutdown).await
    }

    /// Serves connections from an already bound listener until `shutdown`
    /// fires, then drains open connections for up to the shutdown timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener's local address cannot be read.
    pub async fn serve(self, listener: TcpListener, shutdown: ShutdownSignal) -> ServerResult<()> {
        let local_addr = listener.local_addr()?;
        tracing::info!(
            addr = %local_addr,
            documents = self.selector.catalog().len(),
            default_url = %self.selector.default_url(),
            "IAM docs server listening"
        );

        let server = Arc::new(self);
        let tracker = ConnectionTracker::new();

        let stop = shutdown.recv();
        tokio::pin!(stop);

        loop {
            tokio::select! {
                result = listener.accept() => {
                    match result {
                        Ok((stream, remote_addr)) => {
                            let server = Arc::clone(&server);
                            let token = tracker.acquire();
                            let shutdown = shutdown.clone();

                            tokio::spawn(async move {
                                if let Err(e) = server.handle_connection(stream, shutdown).await {
                                    tracing::debug!(remote.addr = %remote_addr, error = %e, "connection error");
                                }
                                drop(token);
                            });
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "failed to accept connection");
                        }
                    }
                }

                () = &mut stop => {
                    tracing::info!("Shutdown signal received, stopping server");
                    break;
                }
            }
        }

        server.readiness.set_ready(false);
        drop(listener);

        let shutdown_timeout = server.config.shutdown_timeout();
        tracing::info!(
            timeout_ms = u64::try_from(shutdown_timeout.as_millis()).unwrap_or(u64::MAX),
            connections = tracker.active_connections(),
            "Waiting for connections to close"
        );

        tokio::select! {
            () = tracker.wait_for_drain() => {
                tracing::info!("All connections closed");
            }
            () = tokio::time::sleep(shutdown_timeout) => {
                tracing::warn!(
                    connections = tracker.active_connections(),
                    "Shutdown timeout reached"
                );
            }
        }

        tracing::info!("Server stopped");
        Ok(())
    }

    async fn handle_connection(
        self: Arc<Self>,
        stream: TcpStream,
        shutdown: ShutdownSignal,
    ) -> Result<(), hyper::Error> {
        let io = TokioIo::new(stream);
        let server = Arc::clone(&self);

        let service = service_fn(move |req: Request<Incoming>| {
            let server = Arc::clone(&server);
            async move { Ok::<_, Infallible>(server.handle_request(&req)) }
        });

        let conn = http1::Builder::new()
            .timer(TokioTimer::new())
            .header_read_timeout(self.config.request_timeout())
            .serve_connection(io, service);
        tokio::pin!(conn);

        let stop = shutdown.recv();
        tokio::pin!(stop);
        let mut draining = false;

        loop {
            tokio::select! {
                result = conn.as_mut() => return result,
                () = &mut stop, if !draining => {
                    draining = true;
                    conn.as_mut().graceful_shutdown();
                }
            }
        }
    }

    fn handle_request(&self, req: &Request<Incoming>) -> HttpResponse {
        let started = Instant::now();
        let method = req.method();
        let path = req.uri().path();

        let response = self.route_request(method, req.uri());

        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        log_request_complete!(method, path, response.status().as_u16(), duration_ms);

        response
    }

    /// Routes one request.
    pub(crate) fn route_request(&self, method: &Method, uri: &Uri) -> HttpResponse {
        let path = uri.path();

        let Some(route) = Route::from_path(path) else {
            return self.handle_not_found(path);
        };

        if method != Method::GET && method != Method::HEAD {
            return self.handle_method_not_allowed(method, path);
        }

        let params = QueryParams::from_query(uri.query());

        let response = match route {
            Route::Page => self.handle_page(&params, method, path),
            Route::InitializerScript => self.handle_initializer(&params, method, path),
            Route::ViewerConfig => self.handle_viewer_config(&params, method, path),
            Route::Health => json_response(StatusCode::OK, &self.health.status()),
            Route::Ready => self.handle_ready(),
        };

        if method == Method::HEAD {
            strip_body(response)
        } else {
            response
        }
    }

    fn handle_page(&self, params: &QueryParams, method: &Method, path: &str) -> HttpResponse {
        match self.selector.load(&self.swagger, params) {
            Ok(ctx) => content_response(CONTENT_TYPE_HTML, ctx.into_handle().into_html_bytes()),
            Err(e) => {
                log_request_error!(method, path, e);
                self.handle_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "VIEWER_INIT_FAILED",
                    &e.to_string(),
                )
            }
        }
    }

    fn handle_initializer(&self, params: &QueryParams, method: &Method, path: &str) -> HttpResponse {
        let config = self.selector.configuration(params);
        match self.swagger.initializer_js(&config) {
            Ok(script) => content_response(CONTENT_TYPE_JS, script),
            Err(e) => {
                log_request_error!(method, path, e);
                self.handle_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "VIEWER_INIT_FAILED",
                    &e.to_string(),
                )
            }
        }
    }

    fn handle_viewer_config(&self, params: &QueryParams, method: &Method, path: &str) -> HttpResponse {
        match self.selector.configuration(params).to_json() {
            Ok(json) => content_response(CONTENT_TYPE_JSON, json),
            Err(e) => {
                log_request_error!(method, path, e);
                self.handle_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SERIALIZATION_FAILED",
                    &e.to_string(),
                )
            }
        }
    }

    fn handle_ready(&self) -> HttpResponse {
        let status = self.readiness.status();
        let code = if status.is_ready() {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };
        json_response(code, &status)
    }

    fn handle_method_not_allowed(&self, method: &Method, path: &str) -> HttpResponse {
        let mut response = self.handle_error(
            StatusCode::METHOD_NOT_ALLOWED,
            "METHOD_NOT_ALLOWED",
            &format!("{method} is not allowed on {path}"),
        );
        response
            .headers_mut()
            .insert(header::ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
        response
    }

    fn handle_not_found(&self, path: &str) -> HttpResponse {
        self.handle_error(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            &format!("No route for {path}"),
        )
    }

    /// Creates a standard error response.
    fn handle_error(&self, status: StatusCode, code: &str, message: &str) -> HttpResponse {
        let body = serde_json::json!({
            "error": {
                "code": code,
                "message": message
            }
        });
        json_response(status, &body)
    }
}

fn content_response(content_type: &'static str, body: impl Into<Bytes>) -> HttpResponse {
    // Output depends on the query string.
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, "no-store")
        .header(header::X_CONTENT_TYPE_OPTIONS, "nosniff")
        .body(Full::new(body.into()))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::new())))
}

fn json_response<T: Serialize>(status: StatusCode, value: &T) -> HttpResponse {
    let body = serde_json::to_vec(value).unwrap_or_default();

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, CONTENT_TYPE_JSON)
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::new())))
}

fn strip_body(response: HttpResponse) -> HttpResponse {
    let (mut parts, body) = response.into_parts();
    let len = body.size_hint().exact().unwrap_or(0);
    parts
        .headers
        .insert(header::CONTENT_LENGTH, HeaderValue::from(len));
    Response::from_parts(parts, Full::new(Bytes::new()))
}
