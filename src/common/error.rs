// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Erro da camada de serviço/HTTP.
// As três primeiras variantes são a taxonomia do motor de métricas;
// as demais cobrem validação de entrada e falhas inesperadas.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Período inválido: {0}")]
    InvalidPeriod(String),

    #[error("Falha parcial na agregação: {}", failed.join(", "))]
    PartialAggregationFailure { failed: Vec<String> },

    #[error("Banco de dados indisponível: {0}")]
    DataStoreUnavailable(String),

    #[error("Tempo limite da requisição excedido")]
    RequestTimeout,

    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Variante para erros de banco de dados fora do motor (ex: pool na inicialização)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn invalid_period(msg: impl Into<String>) -> Self {
        Self::InvalidPeriod(msg.into())
    }
}

// Resposta de erro simples, usada por extratores e handlers.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors.iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::PartialAggregationFailure { failed } => {
                tracing::error!("Agregação incompleta, consultas com falha: {:?}", failed);
                let body = Json(json!({
                    "error": "Não foi possível calcular todas as métricas do período.",
                    "details": { "failedAggregates": failed },
                }));
                return (StatusCode::BAD_GATEWAY, body).into_response();
            }
            AppError::InvalidPeriod(ref msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::DataStoreUnavailable(ref msg) => {
                tracing::error!("Banco de dados indisponível: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, "Banco de dados indisponível no momento.".to_string())
            }
            AppError::RequestTimeout => (
                StatusCode::GATEWAY_TIMEOUT,
                "O cálculo das métricas excedeu o tempo limite.".to_string(),
            ),

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".to_string())
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        ApiError { status, message: error_message }.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_engine_errors_to_http_status() {
        let cases = [
            (AppError::invalid_period("semestre"), StatusCode::BAD_REQUEST),
            (
                AppError::PartialAggregationFailure { failed: vec!["invoices".into()] },
                StatusCode::BAD_GATEWAY,
            ),
            (AppError::DataStoreUnavailable("conexão recusada".into()), StatusCode::SERVICE_UNAVAILABLE),
            (AppError::RequestTimeout, StatusCode::GATEWAY_TIMEOUT),
            (
                AppError::InternalServerError(anyhow::anyhow!("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn partial_failure_message_lists_aggregates() {
        let err = AppError::PartialAggregationFailure {
            failed: vec!["sales.current".into(), "orders".into()],
        };
        assert_eq!(err.to_string(), "Falha parcial na agregação: sales.current, orders");
    }
}
