//! # compactor-client
//!
//! 압축 서비스 클라이언트.
//!
//! - [`panel`] - 파일/알고리즘/모드 선택과 결과 상태를 담는 패널 모델
//! - [`http_client`] - `/api/compress`, `/api/decompress` multipart 디스패처
//! - [`render`] - 통계/에러/안내 문구 렌더링
//! - [`download`] - 다운로드 파일명 해석과 저장

pub mod download;
pub mod error;
pub mod http_client;
pub mod panel;
pub mod render;

pub use error::DispatchError;
pub use http_client::{CompressionApi, Download, HttpCompressionClient};
pub use panel::{Panel, PanelError, ResultView, SelectedFile};
