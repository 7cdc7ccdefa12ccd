// region:    --- Imports
use axum::http::header::InvalidHeaderValue;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;
// endregion: --- Imports

// region:    --- App Error
#[derive(Error, Debug)]
pub enum AppError {
    /// 세션 토큰 없음, 파싱 실패, 또는 존재하지 않는 토큰
    #[error("session token is missing or invalid")]
    SessionTokenInvalid,

    /// 하나의 토큰이 여러 계정에 매칭됨 (데이터 무결성 이상)
    #[error("session token matches more than one account")]
    CaCestVraimentPasDeBol,

    #[error("account is not a {expected}")]
    AccountTypeMismatch { expected: &'static str },

    #[error("article {0} not found")]
    ArticleNotFound(i64),

    #[error("article {0} belongs to another company")]
    NotArticleOwner(i64),

    #[error("invalid pagination: {0}")]
    InvalidPagination(String),

    #[error("unexpected state: {0}")]
    UnexpectedState(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("movie provider error: {0}")]
    MovieProvider(String),

    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::MovieProvider(e.to_string())
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::SessionTokenInvalid | AppError::CaCestVraimentPasDeBol => {
                StatusCode::UNAUTHORIZED
            }
            AppError::AccountTypeMismatch { .. } | AppError::NotArticleOwner(_) => {
                StatusCode::FORBIDDEN
            }
            AppError::ArticleNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidPagination(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{:<12} --> {:?}", "Error", self);
        }

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
// endregion: --- App Error
