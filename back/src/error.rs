use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request was malformed or failed a field check.
    #[error("{0}")]
    Validation(String),

    #[error("todo {0} not found")]
    NotFound(u64),

    #[error("failed to encode response: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let error = match &self {
            Error::Validation(message) => message.clone(),
            Error::NotFound(_) => String::from("Todo not found"),
            Error::Serialization(err) => {
                tracing::error!(%err, "failed to encode response");
                String::from("Error encoding response")
            }
        };

        (self.status(), Json(ErrorBody { error })).into_response()
    }
}
