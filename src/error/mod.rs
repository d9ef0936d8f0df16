// region:    --- Imports
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::warn;

// endregion: --- Imports

// region:    --- Procurement Error
/// 요청/입찰 커맨드 처리 오류
/// 실패한 커맨드는 상태를 전혀 변경하지 않는다.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProcurementError {
    /// 입력값 검증 실패 (수량, 벌크 구매 참여자, 배송일 등)
    #[error("{0}")]
    Validation(String),

    /// 존재하지 않는 요청/입찰 참조
    #[error("{0}")]
    NotFound(String),

    /// 현재 요청 상태에서 허용되지 않는 커맨드
    #[error("{0}")]
    IllegalState(String),
}

impl ProcurementError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn illegal_state(message: impl Into<String>) -> Self {
        Self::IllegalState(message.into())
    }

    /// 응답 바디에 실리는 오류 코드
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::NotFound(_) => "NOT_FOUND",
            Self::IllegalState(_) => "ILLEGAL_STATE",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::IllegalState(_) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for ProcurementError {
    fn into_response(self) -> Response {
        warn!("{:<12} --> 요청 처리 실패 [{}]: {}", "Error", self.code(), self);
        let body = Json(serde_json::json!({
            "error": self.to_string(),
            "code": self.code(),
        }));
        (self.status(), body).into_response()
    }
}

/// 잘못된 JSON 바디는 검증 오류로 처리
impl From<JsonRejection> for ProcurementError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

pub type Result<T> = std::result::Result<T, ProcurementError>;
// endregion: --- Procurement Error
