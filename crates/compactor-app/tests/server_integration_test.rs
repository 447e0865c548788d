//! 실제 TCP 포트에서 서비스와 클라이언트를 연결하는 통합 테스트.
//!
//! WebServer → HttpCompressionClient → Panel 전체 왕복 검증.

use compactor_client::download::save_download;
use compactor_client::render::render_view;
use compactor_client::{HttpCompressionClient, Panel, PanelError, ResultView, SelectedFile};
use compactor_codec::ByteCodec;
use compactor_core::config::WebConfig;
use compactor_core::models::{Algorithm, Mode};
use compactor_web::WebServer;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;

/// 임의 포트에 서버를 띄우고 (base_url, 종료 송신기) 반환
async fn start_server() -> (String, watch::Sender<bool>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = watch::channel(false);

    let server = WebServer::new(Arc::new(ByteCodec::new()), WebConfig::default());
    tokio::spawn(async move {
        server.serve(listener, rx).await.unwrap();
    });

    (format!("http://{addr}"), tx)
}

fn client(base_url: &str) -> HttpCompressionClient {
    HttpCompressionClient::new(base_url, Duration::from_secs(10)).unwrap()
}

async fn run_panel(
    api: &HttpCompressionClient,
    mode: Mode,
    algorithm: Algorithm,
    file: &Path,
) -> (Panel, Result<compactor_client::Download, PanelError>) {
    let mut panel = Panel::new();
    panel.set_mode(mode);
    panel.set_algorithm(algorithm);
    panel.select_file(SelectedFile::from_path(file));
    let result = panel.submit(api).await;
    (panel, result)
}

#[tokio::test]
async fn compress_then_decompress_roundtrip() {
    let (base_url, shutdown) = start_server().await;
    let api = client(&base_url);
    let work = tempfile::tempdir().unwrap();

    let original: Vec<u8> = b"It was the best of times, it was the worst of times. "
        .repeat(40);
    let input = work.path().join("tale.txt");
    std::fs::write(&input, &original).unwrap();

    for algorithm in Algorithm::ALL {
        let out = work.path().join(format!("out-{algorithm}"));

        let (panel, result) = run_panel(&api, Mode::Compress, algorithm, &input).await;
        let packed = result.unwrap();
        assert_eq!(packed.filename, format!("tale_compressed_{algorithm}.txt"));
        let stats = packed.stats.clone().unwrap();
        assert_eq!(stats.original_size, original.len() as u64);
        assert_eq!(stats.compressed_size, packed.bytes.len() as u64);
        assert!(matches!(panel.view(), ResultView::Stats(_)));
        assert!(render_view(&panel.view()).contains("Original Size"));

        let packed_path = save_download(&out, &packed).unwrap();

        let (panel, result) = run_panel(&api, Mode::Decompress, algorithm, &packed_path).await;
        let restored = result.unwrap();
        assert_eq!(restored.filename, "tale.txt");
        assert!(restored.stats.is_none());
        assert_eq!(restored.bytes, original);
        assert_eq!(panel.view(), ResultView::Decompressed);
    }

    let _ = shutdown.send(true);
}

#[tokio::test]
async fn huffman_shrinks_text() {
    let (base_url, shutdown) = start_server().await;
    let api = client(&base_url);
    let work = tempfile::tempdir().unwrap();

    let input = work.path().join("words.txt");
    std::fs::write(&input, "abracadabra ".repeat(500)).unwrap();

    let (_, result) = run_panel(&api, Mode::Compress, Algorithm::Huffman, &input).await;
    let stats = result.unwrap().stats.unwrap();
    assert!(stats.compression_ratio > 0.0);
    assert!(stats.compressed_size < stats.original_size);

    let _ = shutdown.send(true);
}

#[tokio::test]
async fn corrupt_file_surfaces_server_message() {
    let (base_url, shutdown) = start_server().await;
    let api = client(&base_url);
    let work = tempfile::tempdir().unwrap();

    let input = work.path().join("broken_compressed_huffman.bin");
    std::fs::write(&input, [0xff, 0xff, 0xff, 0xff, 0x00]).unwrap();

    let (panel, result) = run_panel(&api, Mode::Decompress, Algorithm::Huffman, &input).await;
    assert!(matches!(result, Err(PanelError::Dispatch(_))));
    match panel.view() {
        ResultView::Error(message) => assert!(message.starts_with(
            "An error occurred during decompression. The file may be corrupt or of the wrong format."
        )),
        other => panic!("unexpected view: {other:?}"),
    }

    let _ = shutdown.send(true);
}

#[tokio::test]
async fn server_unreachable_shows_error() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let api = client(&format!("http://127.0.0.1:{port}"));
    let work = tempfile::tempdir().unwrap();
    let input = work.path().join("a.txt");
    std::fs::write(&input, b"abc").unwrap();

    let (panel, result) = run_panel(&api, Mode::Compress, Algorithm::Rle, &input).await;
    assert!(result.is_err());
    assert!(!panel.is_loading());
    assert!(matches!(panel.view(), ResultView::Error(msg) if !msg.is_empty()));
}

#[tokio::test]
async fn graceful_shutdown_stops_server() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let (tx, rx) = watch::channel(false);
    let server = WebServer::new(Arc::new(ByteCodec::new()), WebConfig::default());
    let handle = tokio::spawn(async move { server.serve(listener, rx).await });

    tx.send(true).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("서버가 제시간에 종료되지 않음")
        .unwrap();
    assert!(result.is_ok());
}
