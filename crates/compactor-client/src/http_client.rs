//! 압축 서비스 HTTP 디스패처.
//!
//! `CompressionApi` 포트와 reqwest 기반 구현. 재시도 없음.

use async_trait::async_trait;
use compactor_core::models::{CompressionStats, Mode, STATS_HEADER};
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::{debug, warn};

use crate::download::filename_from_disposition;
use crate::error::DispatchError;
use crate::panel::SubmitRequest;

/// 에러 본문이 JSON이지만 `error` 필드가 없을 때
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// 에러 본문을 해석할 수 없을 때
pub const UNREADABLE_ERROR_MESSAGE: &str =
    "An unreadable error response was received from the server.";

/// 서비스 응답으로 받은 파일
#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    /// 응답 본문
    pub bytes: Vec<u8>,
    /// 저장할 파일명 (Content-Disposition 또는 기본값)
    pub filename: String,
    /// 압축 통계 (압축 모드에서 헤더가 있을 때만)
    pub stats: Option<CompressionStats>,
}

/// 압축 서비스 포트
#[async_trait]
pub trait CompressionApi: Send + Sync {
    /// 선택 파일을 업로드하고 결과 파일을 받는다
    async fn process(&self, request: &SubmitRequest) -> Result<Download, DispatchError>;
}

/// 에러 응답 본문에서 사용자 메시지 추출
///
/// `{"error": "..."}` → 해당 문자열, 다른 JSON → 일반 메시지,
/// JSON이 아니면 (또는 `null`) 해석 불가 메시지.
pub fn error_message_from_body(body: &[u8]) -> String {
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(serde_json::Value::Null) | Err(_) => UNREADABLE_ERROR_MESSAGE.to_string(),
        Ok(value) => value
            .get("error")
            .and_then(serde_json::Value::as_str)
            .filter(|msg| !msg.is_empty())
            .unwrap_or(UNKNOWN_ERROR_MESSAGE)
            .to_string(),
    }
}

/// reqwest 기반 `CompressionApi` 구현
pub struct HttpCompressionClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCompressionClient {
    /// 새 클라이언트 생성
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DispatchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DispatchError::Network(format!("HTTP 클라이언트 빌드 실패: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 모드별 엔드포인트 URL
    pub fn endpoint_url(&self, mode: Mode) -> String {
        format!("{}/api/{}", self.base_url, mode.endpoint())
    }

    fn parse_stats(header: Option<&reqwest::header::HeaderValue>) -> Option<CompressionStats> {
        let raw = header?.to_str().ok()?;
        match serde_json::from_str(raw) {
            Ok(stats) => Some(stats),
            Err(e) => {
                warn!("통계 헤더 파싱 실패: {e}");
                None
            }
        }
    }
}

#[async_trait]
impl CompressionApi for HttpCompressionClient {
    async fn process(&self, request: &SubmitRequest) -> Result<Download, DispatchError> {
        let data = tokio::fs::read(&request.file.path).await?;
        let url = self.endpoint_url(request.mode);
        debug!(
            "{} 요청: {} ({} bytes, {}) → {url}",
            request.mode,
            request.file.name,
            data.len(),
            request.algorithm
        );

        let part = Part::bytes(data)
            .file_name(request.file.name.clone())
            .mime_str("application/octet-stream")
            .map_err(|e| DispatchError::Network(e.to_string()))?;
        let form = Form::new()
            .part("file", part)
            .text("algorithm", request.algorithm.as_str());

        let resp = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| DispatchError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.bytes().await.unwrap_or_else(|e| {
                warn!("에러 응답 본문 읽기 실패: {e}");
                Default::default()
            });
            let message = error_message_from_body(&body);
            debug!("서버 에러 ({status}): {message}");
            return Err(DispatchError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let disposition = resp
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let filename = filename_from_disposition(disposition.as_deref(), request.mode);

        let stats = match request.mode {
            Mode::Compress => Self::parse_stats(resp.headers().get(STATS_HEADER)),
            Mode::Decompress => None,
        };

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| DispatchError::Network(e.to_string()))?
            .to_vec();

        debug!("응답 수신: {filename} ({} bytes)", bytes.len());
        Ok(Download {
            bytes,
            filename,
            stats,
        })
    }
}
