//! 애플리케이션 설정 구조체.
//!
//! 서비스 URL, 요청 타임아웃, 웹 서버 바인드/업로드 제한, 다운로드 경로 등
//! 런타임 설정을 정의한다. `ConfigManager`를 통해 JSON 파일에서 로드.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 압축 서비스 연결 설정 (클라이언트 측)
    #[serde(default)]
    pub server: ServerConfig,
    /// 웹 서버 설정 (서비스 측)
    #[serde(default)]
    pub web: WebConfig,
    /// 클라이언트 설정
    #[serde(default)]
    pub client: ClientConfig,
}

impl AppConfig {
    /// 기본 설정 생성
    pub fn default_config() -> Self {
        Self::default()
    }

    /// 요청 타임아웃을 Duration으로 반환
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.server.request_timeout_ms)
    }
}

// ============================================================
// 서비스 연결 설정
// ============================================================

/// 압축 서비스 연결 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 서비스 기본 URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 요청 타임아웃 (밀리초)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5001".to_string()
}

fn default_request_timeout_ms() -> u64 {
    60_000
}

// ============================================================
// 웹 서버 설정
// ============================================================

/// 웹 서버 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// 웹 서버 포트 (기본: 5001)
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// 외부 접근 허용 여부 (false: 127.0.0.1 only)
    #[serde(default)]
    pub allow_external: bool,
    /// 업로드 최대 크기 (MB)
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: u64,
}

impl WebConfig {
    /// 업로드 최대 크기 (바이트)
    pub fn max_upload_bytes(&self) -> usize {
        usize::try_from(self.max_upload_mb.saturating_mul(1024 * 1024)).unwrap_or(usize::MAX)
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            port: default_web_port(),
            allow_external: false,
            max_upload_mb: default_max_upload_mb(),
        }
    }
}

fn default_web_port() -> u16 {
    5001
}

fn default_max_upload_mb() -> u64 {
    64
}

// ============================================================
// 클라이언트 설정
// ============================================================

/// 클라이언트 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// 결과 파일 저장 디렉토리 (None이면 현재 디렉토리)
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// 기본값이 적용된 다운로드 디렉토리
    pub fn download_dir_or_default(&self) -> PathBuf {
        self.download_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
