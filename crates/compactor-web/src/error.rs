//! API 에러 처리.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// API 에러
///
/// 표시 문자열이 그대로 응답 본문의 `error` 필드가 된다.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 잘못된 요청 (필드 누락, 미지원 알고리즘 등)
    #[error("{0}")]
    BadRequest(String),

    /// 업로드 크기 제한 초과
    #[error("{0}")]
    PayloadTooLarge(String),

    /// 내부 서버 오류 (코덱 실패 포함)
    #[error("{0}")]
    Internal(String),
}

/// 에러 응답 본문
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// 에러 메시지
    pub error: String,
    /// HTTP 상태 코드
    pub status: u16,
}

impl ApiError {
    /// 대응하는 HTTP 상태 코드
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.to_string(),
            status: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<compactor_core::error::CoreError> for ApiError {
    fn from(err: compactor_core::error::CoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
