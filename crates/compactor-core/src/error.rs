//! Compactor 핵심 에러 타입.
//!
//! 어댑터 crate는 자체 에러 타입에서 `CoreError`를 래핑하거나 변환한다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 직렬화, 설정, 유효성 검증, 코덱 처리 등 도메인 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("config error: {0}")]
    Config(String),

    /// 필드 유효성 검증 실패
    #[error("invalid {field}: {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 코덱 처리 실패 (손상된 컨테이너, 잘못된 포맷 등)
    #[error("{0}")]
    Codec(String),

    /// I/O 에러
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// 내부 에러 (예상치 못한 상황)
    #[error("internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// 코덱 에러 생성 헬퍼
    pub fn codec(message: impl Into<String>) -> Self {
        CoreError::Codec(message.into())
    }
}
