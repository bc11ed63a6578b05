use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A query backing one endpoint family failed; `message` is that family's fixed message.
    #[error("{message}: {source}")]
    QueryFailed {
        message: &'static str,
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    #[must_use]
    pub fn query_failed(message: &'static str, source: sea_orm::DbErr) -> Self {
        Self::QueryFailed { message, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::QueryFailed { message, source } => {
                tracing::error!(error = ?source, "{message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": message, "details": source.to_string() }),
                )
            }
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
