//! Error kinds at the backend boundary. Transport and status-code errors
//! are mapped here once, so callers match on kinds instead of raw
//! responses. Nothing in this taxonomy is fatal; every failure is local
//! and retryable.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// 400/422 — the backend rejected the payload. Reported inline to the
    /// originating form.
    #[error("validation rejected: {0}")]
    Validation(String),

    /// 404 — the record no longer exists (deleted by another actor).
    #[error("record not found")]
    NotFound,

    /// 409 — concurrent edit conflict.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Transport-level failure (connect, timeout, TLS).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Any other non-success status.
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
}

impl ApiError {
    /// Map a non-success HTTP status into an error kind.
    pub fn from_status(status: u16, body: String) -> ApiError {
        match status {
            400 | 422 => ApiError::Validation(body),
            404 => ApiError::NotFound,
            409 => ApiError::Conflict(body),
            _ => ApiError::Server { status, body },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_kinds() {
        assert!(matches!(
            ApiError::from_status(400, "campo obrigatório".into()),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            ApiError::from_status(422, "data inválida".into()),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            ApiError::from_status(404, String::new()),
            ApiError::NotFound
        ));
        assert!(matches!(
            ApiError::from_status(409, "editado por outro usuário".into()),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from_status(500, "boom".into()),
            ApiError::Server { status: 500, .. }
        ));
    }
}
