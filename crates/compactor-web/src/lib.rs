//! # compactor-web
//!
//! 파일 압축 HTTP 서비스.
//! Axum 기반 multipart 업로드 API.
//!
//! ## 엔드포인트
//! - `POST /api/compress` - 업로드 파일 압축, 통계는 `x-compression-stats` 헤더
//! - `POST /api/decompress` - 압축 파일 복원

pub mod error;
pub mod filename;
pub mod handlers;
pub mod routes;

use axum::extract::DefaultBodyLimit;
use axum::http::header::{HeaderName, CONTENT_DISPOSITION};
use axum::Router;
use compactor_core::config::WebConfig;
use compactor_core::models::STATS_HEADER;
use compactor_core::ports::codec::Codec;
use std::io;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

/// 포트 바인드 최대 시도 횟수
pub const PORT_ATTEMPTS: usize = 10;

/// 웹 서버 애플리케이션 상태
#[derive(Clone)]
pub struct AppState {
    /// 압축 코덱
    pub codec: Arc<dyn Codec>,
}

/// 압축 HTTP 서버
pub struct WebServer {
    config: WebConfig,
    state: AppState,
}

impl WebServer {
    /// 새 웹 서버 생성
    pub fn new(codec: Arc<dyn Codec>, config: WebConfig) -> Self {
        Self {
            config,
            state: AppState { codec },
        }
    }

    /// 라우터 구성
    ///
    /// 브라우저 클라이언트가 다운로드 파일명과 통계를 읽을 수 있도록
    /// `Content-Disposition`과 통계 헤더를 CORS로 노출한다.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
            .expose_headers([CONTENT_DISPOSITION, HeaderName::from_static(STATS_HEADER)]);

        Router::new()
            .nest("/api", routes::api_routes())
            .layer(DefaultBodyLimit::max(self.config.max_upload_bytes()))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// 서버 실행
    ///
    /// `allow_external`이면 0.0.0.0, 아니면 127.0.0.1에 바인드한다.
    pub async fn run(self, shutdown_rx: watch::Receiver<bool>) -> io::Result<()> {
        let host = if self.config.allow_external {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        };
        let listener = bind_with_fallback(host, self.config.port).await?;
        self.serve(listener, shutdown_rx).await
    }

    /// 이미 바인드된 리스너로 서버 실행
    ///
    /// `shutdown_rx`가 `true`가 되거나 송신측이 닫히면 진행 중인 요청을 마치고 반환한다.
    pub async fn serve(
        self,
        listener: TcpListener,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> io::Result<()> {
        let addr = listener.local_addr()?;
        let app = self.router();
        info!(%addr, max_upload_mb = self.config.max_upload_mb, "압축 서비스 수신 대기");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.wait_for(|stop| *stop).await;
                info!("종료 요청, 남은 요청 처리 후 중단");
            })
            .await?;

        info!(%addr, "압축 서비스 중단");
        Ok(())
    }

    /// 서버 URL 반환
    pub fn url(&self) -> String {
        format!("http://localhost:{}", self.config.port)
    }
}

/// `base_port`부터 최대 [`PORT_ATTEMPTS`]개 포트를 차례로 바인드
///
/// 사용 중인 포트는 건너뛰고, 그 외 바인드 에러는 즉시 반환한다.
pub async fn bind_with_fallback(host: &str, base_port: u16) -> io::Result<TcpListener> {
    let mut last_error = None;

    for port in (base_port..=u16::MAX).take(PORT_ATTEMPTS) {
        match TcpListener::bind((host, port)).await {
            Ok(listener) => {
                if port != base_port {
                    warn!(base_port, port, "설정 포트 사용 중, 대체 포트로 바인드");
                }
                return Ok(listener);
            }
            Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
                debug!(port, "포트 사용 중");
                last_error = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    Err(last_error.unwrap_or_else(|| {
        io::Error::new(
            io::ErrorKind::AddrInUse,
            format!("{host}:{base_port}부터 바인드 가능한 포트 없음"),
        )
    }))
}
