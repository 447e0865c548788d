//! 디스패치 에러.

use thiserror::Error;

/// 네트워크 에러 메시지가 비었을 때 사용자에게 보여줄 문구
pub const CONNECT_FAILED_MESSAGE: &str = "Failed to connect to the server.";

/// 요청 전송/응답 처리 중 발생한 에러
#[derive(Debug, Error)]
pub enum DispatchError {
    /// 전송 실패 (연결 거부, 타임아웃 등)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 서버가 비 2xx 상태로 응답
    #[error("서버 에러 ({status}): {message}")]
    Server { status: u16, message: String },

    /// 로컬 파일 입출력 실패
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}

impl DispatchError {
    /// 결과 영역에 표시할 메시지
    pub fn user_message(&self) -> String {
        match self {
            DispatchError::Network(msg) if !msg.is_empty() => msg.clone(),
            DispatchError::Network(_) => CONNECT_FAILED_MESSAGE.to_string(),
            DispatchError::Server { message, .. } => message.clone(),
            DispatchError::Io(e) => e.to_string(),
        }
    }
}
