//! End-to-end tests over a real socket.

use std::net::SocketAddr;
use std::time::Duration;

use bytes::Bytes;
use http::{Method, Request, StatusCode};
use http_body_util::{BodyExt, Empty};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use iam_docs::{DocumentSourceSelector, SwaggerUi};
use iam_docs_server::{DocsServer, ServerConfig, ServerResult, ShutdownSignal};

struct TestServer {
    addr: SocketAddr,
    shutdown: ShutdownSignal,
    handle: JoinHandle<ServerResult<()>>,
    client: Client<HttpConnector, Empty<Bytes>>,
}

impl TestServer {
    async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = DocsServer::new(
            ServerConfig::builder()
                .shutdown_timeout(Duration::from_secs(2))
                .build(),
            DocumentSourceSelector::iam(),
            SwaggerUi::new().title("IAM API Reference"),
        );

        let shutdown = ShutdownSignal::new();
        let handle = tokio::spawn(server.serve(listener, shutdown.clone()));
        let client = Client::builder(TokioExecutor::new()).build_http();

        Self {
            addr,
            shutdown,
            handle,
            client,
        }
    }

    async fn request(&self, method: Method, path: &str) -> (StatusCode, http::HeaderMap, String) {
        let req = Request::builder()
            .method(method)
            .uri(format!("http://{}{}", self.addr, path))
            .body(Empty::<Bytes>::new())
            .unwrap();

        let response = self.client.request(req).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();

        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    async fn get(&self, path: &str) -> (StatusCode, String) {
        let (status, _, body) = self.request(Method::GET, path).await;
        (status, body)
    }

    async fn stop(self) {
        self.shutdown.trigger();
        let result = tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("server did not stop in time")
            .unwrap();
        tokio_test::assert_ok!(result);
    }
}

#[tokio::test]
async fn serves_default_document_page() {
    let server = TestServer::start().await;

    let (status, headers, html) = server.request(Method::GET, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[http::header::CONTENT_TYPE], "text/html; charset=utf-8");
    assert!(html.contains(r#""url":"/openapi/authn.v1.yaml""#));
    assert!(html.contains(r#"<div id="swagger-ui"></div>"#));
    assert_eq!(html.matches("SwaggerUIBundle(").count(), 1);

    server.stop().await;
}

#[tokio::test]
async fn url_parameter_selects_initial_document() {
    let server = TestServer::start().await;

    let (_, html) = server.get("/?url=%2Fopenapi%2Fidp.v1.yaml").await;
    assert!(html.contains(r#""url":"/openapi/idp.v1.yaml""#));

    let (_, html) = server.get("/?url=").await;
    assert!(html.contains(r#""url":"/openapi/authn.v1.yaml""#));

    server.stop().await;
}

#[tokio::test]
async fn hostile_url_parameter_cannot_close_script() {
    let server = TestServer::start().await;

    let (status, html) = server
        .get("/?url=%3C%2Fscript%3E%3Cscript%3Ealert(1)%3C%2Fscript%3E")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!html.contains("<script>alert(1)"));
    assert!(html.contains(r"</script>"));

    server.stop().await;
}

#[tokio::test]
async fn viewer_config_lists_all_documents() {
    let server = TestServer::start().await;

    let (status, body) = server.get("/swagger-config.json").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let names: Vec<&str> = json["urls"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["AuthN", "Identity", "AuthZ", "IDP"]);
    assert_eq!(json["deepLinking"], true);
    assert_eq!(json["layout"], "StandaloneLayout");

    server.stop().await;
}

#[tokio::test]
async fn openapi_documents_are_not_served_here() {
    let server = TestServer::start().await;

    let (status, body) = server.get("/openapi/authn.v1.yaml").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("NOT_FOUND"));

    server.stop().await;
}

#[tokio::test]
async fn rejects_non_get_methods() {
    let server = TestServer::start().await;

    let (status, headers, _) = server.request(Method::DELETE, "/").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(headers[http::header::ALLOW], "GET, HEAD");

    server.stop().await;
}

#[tokio::test]
async fn probes_report_healthy_and_ready() {
    let server = TestServer::start().await;

    let (status, body) = server.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""status":"healthy""#));

    let (status, body) = server.get("/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""ready":true"#));

    server.stop().await;
}

#[tokio::test]
async fn shutdown_stops_accepting_connections() {
    let server = TestServer::start().await;
    let addr = server.addr;

    let (status, _) = server.get("/health").await;
    assert_eq!(status, StatusCode::OK);

    server.stop().await;

    assert!(tokio::net::TcpStream::connect(addr).await.is_err());
}
