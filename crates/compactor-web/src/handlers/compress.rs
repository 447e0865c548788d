//! 압축 API 핸들러.

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::response::Response;
use compactor_core::models::CompressionStats;
use std::time::Instant;
use tracing::{error, info};

use super::{attachment, Upload};
use crate::error::ApiError;
use crate::filename::{compressed_name, secure_filename};
use crate::AppState;

fn compression_failed(details: impl std::fmt::Display) -> ApiError {
    ApiError::Internal(format!("An error occurred during compression: {details}"))
}

/// 파일 압축
///
/// POST /api/compress (multipart: file, algorithm)
///
/// 응답 본문은 압축 결과, `x-compression-stats` 헤더에 통계 JSON.
pub async fn compress_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let upload = Upload::from_multipart(multipart).await?;
    let safe_name = secure_filename(&upload.file_name);
    let output_name = compressed_name(&safe_name, upload.algorithm);
    let original_size = upload.data.len() as u64;
    let algorithm = upload.algorithm;

    let codec = state.codec.clone();
    let data = upload.data;
    let started = Instant::now();
    let compressed = tokio::task::spawn_blocking(move || codec.compress(&data, algorithm))
        .await
        .map_err(compression_failed)?
        .map_err(|e| {
            error!("압축 실패 ({algorithm}, {safe_name}): {e}");
            compression_failed(e)
        })?;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    let stats = CompressionStats::new(original_size, compressed.len() as u64, elapsed_ms);
    info!(
        "압축 완료: {safe_name} ({algorithm}) {} → {} bytes, {}%, {}ms",
        stats.original_size, stats.compressed_size, stats.compression_ratio, stats.processing_time
    );

    let stats_json = serde_json::to_string(&stats).map_err(compression_failed)?;
    attachment(compressed, &output_name, Some(stats_json))
}
