//! Handler error type and HTTP error responses

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Error envelope returned to the web client
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub resultado: &'static str,
    pub mensaje: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed request data
    #[error("{0}")]
    InvalidInput(String),

    /// The renderer or the transport failed; nothing was printed
    #[error("Error al imprimir el ticket: {0}")]
    Print(String),

    /// Anything that escaped the handler
    #[error("Error interno")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, mensaje) = match self {
            ApiError::InvalidInput(msg) => {
                tracing::warn!(mensaje = %msg, "Petición rechazada");
                (StatusCode::BAD_REQUEST, msg)
            }
            ApiError::Print(msg) => {
                tracing::error!(error = %msg, "Error al imprimir el ticket");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error al imprimir el ticket".to_string(),
                )
            }
            ApiError::Internal(err) => {
                tracing::error!(error = ?err, "Error interno del servidor");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        let body = Json(ErrorResponse {
            resultado: "error",
            mensaje,
        });

        (status, body).into_response()
    }
}

/// Result alias for handlers
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_is_400() {
        let response = ApiError::InvalidInput("falta productos".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_print_failure_is_500() {
        let response = ApiError::Print("offline".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
