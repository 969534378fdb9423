//! End-to-end tests driving the HTTP router as a tower service

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use print_server::api::build_app;
use print_server::core::{Config, PlatformMode, ServerState};
use print_server::printing::{SimulationDriver, Ticket, TicketDriver};
use ticket_printer::{PrintError, PrintResult};

/// Driver stub counting print attempts
#[derive(Default)]
struct CountingDriver {
    calls: AtomicUsize,
    fail: bool,
}

impl CountingDriver {
    fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }
}

#[async_trait::async_trait]
impl TicketDriver for CountingDriver {
    async fn print(&self, _ticket: &Ticket, _destino: Option<&str>) -> PrintResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(PrintError::Offline("POS-58".to_string()))
        } else {
            Ok(())
        }
    }

    async fn printers(&self) -> Vec<String> {
        Vec::new()
    }
}

fn simulation_state() -> ServerState {
    let config = Config::with_overrides("127.0.0.1", 8000, 58);
    ServerState::with_driver(
        &config,
        PlatformMode::None,
        Arc::new(SimulationDriver::new()),
    )
}

fn counted_state(driver: Arc<CountingDriver>) -> ServerState {
    let config = Config::with_overrides("127.0.0.1", 8000, 58);
    ServerState::with_driver(&config, PlatformMode::None, driver)
}

async fn post_json(state: ServerState, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
    let app = build_app().with_state(state);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(state: ServerState, uri: &str) -> (StatusCode, serde_json::Value) {
    let app = build_app().with_state(state);
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

const CAFE: &str = r#"{"productos":[{"nombre":"Cafe","cantidad":2,"precio":1000}]}"#;

#[tokio::test]
async fn imprimir_computes_total_on_simulation_path() {
    let (status, body) = post_json(simulation_state(), "/imprimir", CAFE).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resultado"], "ok");
    assert_eq!(body["total"], 2000.0);
}

#[tokio::test]
async fn imprimir_is_idempotent_for_the_same_payload() {
    for _ in 0..2 {
        let (status, body) = post_json(simulation_state(), "/imprimir", CAFE).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2000.0);
    }
}

#[tokio::test]
async fn imprimir_keeps_explicit_total() {
    let payload = r#"{"productos":[{"nombre":"Cafe","cantidad":2,"precio":1000}],"total":1500}"#;
    let (status, body) = post_json(simulation_state(), "/imprimir", payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1500.0);
}

#[tokio::test]
async fn imprimir_without_productos_is_rejected_without_printing() {
    let driver = Arc::new(CountingDriver::default());

    for payload in ["{}", r#"{"productos":[]}"#] {
        let (status, body) = post_json(counted_state(driver.clone()), "/imprimir", payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["resultado"], "error");
    }

    assert_eq!(driver.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn imprimir_rejects_malformed_json() {
    let (status, body) = post_json(simulation_state(), "/imprimir", "{productos: nope").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["resultado"], "error");
}

#[tokio::test]
async fn imprimir_rejects_invalid_cantidad() {
    let payload = r#"{"productos":[{"nombre":"Cafe","cantidad":0,"precio":1000}]}"#;
    let (status, body) = post_json(simulation_state(), "/imprimir", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["resultado"], "error");
}

#[tokio::test]
async fn imprimir_casino_requires_rut() {
    let payload = r#"{
        "productos":[{"nombre":"Ticket de Almuerzo","cantidad":1,"precio":0}],
        "nombreCliente":"JUAN PEREZ L."
    }"#;
    let (status, body) = post_json(simulation_state(), "/imprimir-casino", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["resultado"], "error");
    assert_eq!(
        body["mensaje"],
        "Datos inválidos. Se requiere RUT y nombre del cliente"
    );
}

#[tokio::test]
async fn imprimir_casino_accepts_full_identity() {
    let payload = r#"{
        "productos":[{"nombre":"Ticket de Almuerzo","cantidad":1,"precio":0}],
        "rut":"12345678-9",
        "nombreCliente":"JUAN PEREZ L.",
        "seleccion":"Almuerzo"
    }"#;
    let (status, body) = post_json(simulation_state(), "/imprimir-casino", payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resultado"], "ok");
    assert_eq!(body["total"], 0.0);
}

#[tokio::test]
async fn print_failure_maps_to_500() {
    let driver = Arc::new(CountingDriver::failing());
    let (status, body) = post_json(counted_state(driver.clone()), "/imprimir", CAFE).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["resultado"], "error");
    assert_eq!(driver.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn status_reports_system_and_printers() {
    let (status, body) = get(simulation_state(), "/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "online");
    assert_eq!(body["sistema"], "Sin impresora");
    assert!(body["impresoras_disponibles"].is_array());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_endpoint_reports_port() {
    let (status, body) = get(simulation_state(), "/test").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mensaje"], "¡Plugin de impresión funcionando!");
    assert_eq!(body["sistema"], "Sin impresora");
    assert_eq!(body["puerto"], 8000);
}
