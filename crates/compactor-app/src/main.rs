//! # compactor-app
//!
//! Compactor 바이너리 진입점.
//! 설정 로드, 로깅 초기화, 서브커맨드 디스패치.

mod commands;
mod shutdown;

use anyhow::Result;
use clap::{Parser, Subcommand};
use compactor_core::config::AppConfig;
use compactor_core::config_manager::ConfigManager;
use compactor_core::models::{Algorithm, Mode};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Huffman / RLE 파일 압축 도구
#[derive(Parser, Debug)]
#[command(name = "compactor")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', global = true, default_value = "info")]
    log_level: String,

    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 압축 서비스 URL (기본: 설정 파일의 server.base_url)
    #[arg(long, short = 's', global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 압축 HTTP 서비스 실행
    Serve {
        /// 포트 (기본: 설정 파일의 web.port)
        #[arg(long, short = 'p')]
        port: Option<u16>,

        /// 외부 접근 허용 (0.0.0.0 바인드)
        #[arg(long)]
        external: bool,
    },

    /// 파일 압축
    Compress(ProcessArgs),

    /// 파일 압축 해제
    Decompress(ProcessArgs),

    /// 지원 알고리즘 설명 출력
    Algorithms,

    /// 적용 중인 설정과 파일 경로 출력
    Config,
}

#[derive(clap::Args, Debug)]
struct ProcessArgs {
    /// 대상 파일
    file: PathBuf,

    /// 알고리즘 (huffman, rle)
    #[arg(long, short = 'a', default_value_t = Algorithm::Huffman)]
    algorithm: Algorithm,

    /// 결과 저장 디렉토리 (기본: 설정 파일의 client.download_dir)
    #[arg(long, short = 'o')]
    output_dir: Option<PathBuf>,
}

/// 설정 관리자 생성 (실패 시 None, 기본 설정으로 진행)
fn load_config_manager(path: Option<PathBuf>) -> Option<ConfigManager> {
    let result = match path {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };

    match result {
        Ok(manager) => {
            info!("설정 파일: {}", manager.config_path().display());
            Some(manager)
        }
        Err(e) => {
            warn!("설정 관리자 초기화 실패, 기본 설정 사용: {e}");
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let log_filter = format!(
        "compactor={lvl},compactor_app={lvl},compactor_core={lvl},compactor_codec={lvl},compactor_web={lvl},compactor_client={lvl},tower_http={lvl}",
        lvl = args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let manager = load_config_manager(args.config);
    let mut config = manager
        .as_ref()
        .map(ConfigManager::get)
        .unwrap_or_else(AppConfig::default_config);
    if let Some(server) = args.server {
        config.server.base_url = server;
    }

    match args.command {
        Command::Serve { port, external } => {
            if let Some(port) = port {
                config.web.port = port;
            }
            if external {
                config.web.allow_external = true;
            }
            commands::serve(config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Compress(p) => {
            commands::process(&config, Mode::Compress, &p.file, p.algorithm, p.output_dir).await
        }
        Command::Decompress(p) => {
            commands::process(&config, Mode::Decompress, &p.file, p.algorithm, p.output_dir).await
        }
        Command::Algorithms => {
            commands::algorithms();
            Ok(ExitCode::SUCCESS)
        }
        Command::Config => {
            commands::show_config(&config, manager.as_ref())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
