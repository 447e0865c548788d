//! API 핸들러 모듈.
//!
//! 두 엔드포인트가 공유하는 multipart 폼 파싱과 첨부 파일 응답 생성을 담는다.

pub mod compress;
pub mod decompress;

use axum::body::{Body, Bytes};
use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::http::header::{self, HeaderName, HeaderValue};
use axum::http::StatusCode;
use axum::response::Response;
use compactor_core::models::{Algorithm, STATS_HEADER};

use crate::error::ApiError;

/// 검증을 통과한 업로드
#[derive(Debug)]
pub struct Upload {
    /// 클라이언트가 보낸 원본 파일명
    pub file_name: String,
    /// 파일 내용
    pub data: Bytes,
    /// 선택된 알고리즘
    pub algorithm: Algorithm,
}

/// multipart에서 수집한 원시 필드
#[derive(Debug, Default)]
struct RawForm {
    /// `file` 파트 (파일명, 내용) - 파일명 속성이 있는 파트만 파일로 취급
    file: Option<(String, Bytes)>,
    algorithm: Option<String>,
}

impl Upload {
    /// multipart 본문을 읽어 `file` / `algorithm` 필드를 검증
    pub async fn from_multipart(
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<Self, ApiError> {
        let mut multipart = multipart.map_err(|rejection| {
            ApiError::BadRequest(format!(
                "Invalid multipart request: {}",
                rejection.body_text()
            ))
        })?;
        let mut form = RawForm::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("file") if form.file.is_none() => {
                    let Some(file_name) = field.file_name().map(str::to_string) else {
                        continue;
                    };
                    let data = field.bytes().await.map_err(multipart_error)?;
                    form.file = Some((file_name, data));
                }
                Some("algorithm") if form.algorithm.is_none() => {
                    form.algorithm = Some(field.text().await.map_err(multipart_error)?);
                }
                _ => {}
            }
        }

        form.validate()
    }
}

impl RawForm {
    fn validate(self) -> Result<Upload, ApiError> {
        let (file_name, data) = self
            .file
            .ok_or_else(|| ApiError::BadRequest("No file part in the request".to_string()))?;

        let algorithm = match self.algorithm {
            Some(value) if !file_name.is_empty() && !value.is_empty() => value,
            _ => {
                return Err(ApiError::BadRequest(
                    "Missing file or algorithm selection".to_string(),
                ))
            }
        };

        let algorithm: Algorithm = algorithm
            .parse()
            .map_err(|_| ApiError::BadRequest("Unsupported algorithm".to_string()))?;

        Ok(Upload {
            file_name,
            data,
            algorithm,
        })
    }
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(format!("Uploaded file is too large: {}", err.body_text()))
    } else {
        ApiError::BadRequest(format!("Invalid multipart request: {}", err.body_text()))
    }
}

/// 첨부 파일 응답 생성
///
/// `stats_json`이 있으면 `x-compression-stats` 헤더로 싣는다.
pub(crate) fn attachment(
    data: Vec<u8>,
    file_name: &str,
    stats_json: Option<String>,
) -> Result<Response, ApiError> {
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{file_name}\""))
        .map_err(|e| ApiError::Internal(format!("invalid download filename: {e}")))?;

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::CONTENT_DISPOSITION, disposition);

    if let Some(stats) = stats_json {
        let value = HeaderValue::from_str(&stats)
            .map_err(|e| ApiError::Internal(format!("invalid stats header: {e}")))?;
        builder = builder.header(HeaderName::from_static(STATS_HEADER), value);
    }

    builder
        .body(Body::from(data))
        .map_err(|e| ApiError::Internal(format!("failed to build response: {e}")))
}

#[cfg(test)]
pub(crate) mod test_support {
    //! 핸들러 테스트용 multipart 요청 빌더.

    use axum::body::Body;
    use axum::http::{header, Request};
    use axum::response::Response;
    use axum::Router;
    use compactor_codec::ByteCodec;
    use compactor_core::config::WebConfig;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::WebServer;

    const BOUNDARY: &str = "compactor-test-boundary";

    /// multipart 파트: (필드명, 파일명, 내용)
    pub type Part<'a> = (&'a str, Option<&'a str>, &'a [u8]);

    /// 파일명이 있는 `file` 파트
    pub fn file<'a>(file_name: &'a str, data: &'a [u8]) -> Part<'a> {
        ("file", Some(file_name), data)
    }

    /// 일반 텍스트 파트
    pub fn field<'a>(name: &'a str, value: &'a str) -> Part<'a> {
        (name, None, value.as_bytes())
    }

    pub fn router() -> Router {
        WebServer::new(Arc::new(ByteCodec::new()), WebConfig::default()).router()
    }

    pub fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
        let mut body = Vec::new();
        for (name, file_name, data) in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match file_name {
                Some(file_name) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                             Content-Type: application/octet-stream\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                }
                None => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                    );
                }
            }
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    pub async fn send(uri: &str, parts: &[Part<'_>]) -> Response {
        router()
            .oneshot(multipart_request(uri, parts))
            .await
            .unwrap()
    }

    pub async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    pub async fn error_text(response: Response) -> String {
        let body = body_bytes(response).await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        json["error"].as_str().unwrap().to_string()
    }
}
