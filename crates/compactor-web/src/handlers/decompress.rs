//! 압축 해제 API 핸들러.

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::response::Response;
use tracing::{info, warn};

use super::{attachment, Upload};
use crate::error::ApiError;
use crate::filename::{decompressed_name, secure_filename};
use crate::AppState;

fn decompression_failed(details: impl std::fmt::Display) -> ApiError {
    ApiError::Internal(format!(
        "An error occurred during decompression. The file may be corrupt or of the wrong format. \
         Details: {details}"
    ))
}

/// 파일 압축 해제
///
/// POST /api/decompress (multipart: file, algorithm)
pub async fn decompress_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let upload = Upload::from_multipart(multipart).await?;
    let safe_name = secure_filename(&upload.file_name);
    let output_name = decompressed_name(&safe_name, upload.algorithm);
    let algorithm = upload.algorithm;

    let codec = state.codec.clone();
    let data = upload.data;
    let compressed_size = data.len();
    let decompressed = tokio::task::spawn_blocking(move || codec.decompress(&data, algorithm))
        .await
        .map_err(decompression_failed)?
        .map_err(|e| {
            warn!("해제 실패 ({algorithm}, {safe_name}): {e}");
            decompression_failed(e)
        })?;

    info!(
        "해제 완료: {safe_name} ({algorithm}) {compressed_size} → {} bytes",
        decompressed.len()
    );

    attachment(decompressed, &output_name, None)
}
