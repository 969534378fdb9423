//! Print request handlers

use axum::{Json, body::Bytes, extract::State};
use serde::Serialize;
use tracing::info;

use crate::core::{ApiError, ApiResult, ServerState};
use crate::printing::Ticket;

/// Response body of the print routes
#[derive(Debug, Serialize)]
pub struct PrintResponse {
    pub resultado: &'static str,
    pub mensaje: &'static str,
    /// Total that was printed (derived when the client omitted it)
    pub total: f64,
}

/// POST /imprimir - print a general order ticket
pub async fn imprimir(
    State(state): State<ServerState>,
    body: Bytes,
) -> ApiResult<Json<PrintResponse>> {
    let ticket = parse_ticket(&body)?;
    print_ticket(&state, ticket).await
}

/// POST /imprimir-casino - print a casino meal ticket
///
/// Same flow as `/imprimir`, but the customer identity is mandatory.
pub async fn imprimir_casino(
    State(state): State<ServerState>,
    body: Bytes,
) -> ApiResult<Json<PrintResponse>> {
    let ticket = parse_ticket(&body)?;

    let rut_missing = ticket.rut.as_deref().is_none_or(|r| r.trim().is_empty());
    let nombre_missing = ticket
        .nombre_cliente
        .as_deref()
        .is_none_or(|n| n.trim().is_empty());
    if rut_missing || nombre_missing {
        return Err(ApiError::InvalidInput(
            "Datos inválidos. Se requiere RUT y nombre del cliente".to_string(),
        ));
    }

    info!(
        cliente = ticket.nombre_cliente.as_deref().unwrap_or(""),
        "Imprimiendo ticket de casino"
    );

    print_ticket(&state, ticket).await
}

/// Decode and validate the JSON payload
///
/// The body is parsed by hand so malformed JSON yields the same
/// structured 400 response as a missing field.
fn parse_ticket(body: &[u8]) -> Result<Ticket, ApiError> {
    let ticket: Ticket = serde_json::from_slice(body).map_err(|_| {
        ApiError::InvalidInput("Datos inválidos. Se requiere campo \"productos\"".to_string())
    })?;
    ticket.validate().map_err(ApiError::InvalidInput)?;
    Ok(ticket)
}

/// Shared print flow: derive the total, pick the destination, print
async fn print_ticket(state: &ServerState, mut ticket: Ticket) -> ApiResult<Json<PrintResponse>> {
    ticket.normalize();

    info!(
        pedido = ticket.numero_pedido.as_deref().unwrap_or("Sin número"),
        productos = ticket.productos.len(),
        "Petición de impresión recibida"
    );

    let destino = ticket.nombre_impresora.clone();
    state
        .driver()
        .print(&ticket, destino.as_deref())
        .await
        .map_err(|e| ApiError::Print(e.to_string()))?;

    Ok(Json(PrintResponse {
        resultado: "ok",
        mensaje: "Ticket impreso correctamente",
        total: ticket.total_amount(),
    }))
}
