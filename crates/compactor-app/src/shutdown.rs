//! 종료 시그널 처리.

use tokio::sync::watch;
use tracing::{info, warn};

/// OS 종료 시그널(SIGINT, SIGTERM)을 받으면 `true`가 되는 수신기
///
/// Tokio 런타임 안에서 호출해야 한다.
pub fn signal_channel() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        let signal = wait_for_terminate().await;
        info!(signal, "종료 시그널 수신");
        let _ = tx.send(true);
    });
    rx
}

async fn wait_for_terminate() -> &'static str {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                return tokio::select! {
                    Ok(()) = tokio::signal::ctrl_c() => "SIGINT",
                    _ = term.recv() => "SIGTERM",
                };
            }
            Err(e) => warn!("SIGTERM 핸들러 등록 실패: {e}"),
        }
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Ctrl+C 핸들러 등록 실패, 시그널 종료 비활성: {e}");
        std::future::pending::<()>().await;
    }
    "SIGINT"
}
