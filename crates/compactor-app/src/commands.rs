//! 서브커맨드 구현.

use anyhow::{Context, Result};
use compactor_client::download::save_download;
use compactor_client::render::{algorithm_info, render_view};
use compactor_client::{HttpCompressionClient, Panel, PanelError, SelectedFile};
use compactor_codec::ByteCodec;
use compactor_core::config::AppConfig;
use compactor_core::config_manager::ConfigManager;
use compactor_core::models::{Algorithm, Mode};
use compactor_web::WebServer;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

use crate::shutdown::signal_channel;

/// 압축 서비스 실행 (시그널 수신 시 graceful shutdown)
pub async fn serve(config: AppConfig) -> Result<()> {
    let server = WebServer::new(Arc::new(ByteCodec::new()), config.web.clone());
    info!("압축 서비스 준비: {}", server.url());

    server
        .run(signal_channel())
        .await
        .context("압축 서비스 실행 실패")?;
    Ok(())
}

/// 패널 모델로 파일 하나를 압축/해제하고 결과를 저장
///
/// 요청이 실패하면 결과 영역 메시지를 stderr에 출력하고 실패 코드를 반환한다.
pub async fn process(
    config: &AppConfig,
    mode: Mode,
    file: &Path,
    algorithm: Algorithm,
    output_dir: Option<PathBuf>,
) -> Result<ExitCode> {
    let client = HttpCompressionClient::new(&config.server.base_url, config.request_timeout())?;

    let mut panel = Panel::new();
    panel.set_mode(mode);
    panel.set_algorithm(algorithm);
    panel.select_file(SelectedFile::from_path(file));

    let download = match panel.submit(&client).await {
        Ok(download) => download,
        Err(PanelError::Dispatch(e)) => {
            error!("{} 실패: {e}", mode.label());
            eprintln!("{}", render_view(&panel.view()));
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => {
            eprintln!("{e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let dir = output_dir.unwrap_or_else(|| config.client.download_dir_or_default());
    let saved = save_download(&dir, &download)
        .with_context(|| format!("결과 저장 실패: {}", dir.display()))?;

    println!("{}", render_view(&panel.view()));
    println!("Saved to {}", saved.display());
    Ok(ExitCode::SUCCESS)
}

/// 알고리즘 설명 출력
pub fn algorithms() {
    for algorithm in Algorithm::ALL {
        println!("[{}]", algorithm.as_str());
        println!("{}", algorithm_info(algorithm));
        println!();
    }
}

/// 적용 중인 설정 출력
pub fn show_config(config: &AppConfig, manager: Option<&ConfigManager>) -> Result<()> {
    match manager {
        Some(manager) => println!("# {}", manager.config_path().display()),
        None => println!("# (기본 설정, 파일 없음)"),
    }
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
