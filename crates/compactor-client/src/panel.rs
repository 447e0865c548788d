//! 업로드/제어 패널 상태 모델.
//!
//! 선택 파일, 알고리즘, 모드, 로딩 플래그, 에러, 결과를 보관하고
//! 한 번에 하나의 요청만 진행되도록 보장한다.

use compactor_core::models::{Algorithm, CompressionStats, Mode};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::error::DispatchError;
use crate::http_client::{CompressionApi, Download};

/// 파일 미선택 상태에서 제출했을 때의 메시지
pub const NO_FILE_MESSAGE: &str = "Please select a file first.";

/// 선택된 로컬 파일
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// 파일 경로
    pub path: PathBuf,
    /// 업로드 시 사용할 파일명
    pub name: String,
}

impl SelectedFile {
    /// 경로에서 선택 파일 생성 (파일명은 마지막 경로 요소)
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name }
    }
}

/// 제출 시점의 요청 스냅샷
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub file: SelectedFile,
    pub algorithm: Algorithm,
    pub mode: Mode,
}

/// 성공한 요청의 결과
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 압축 완료 (통계 헤더가 없으면 `None`)
    Compressed(Option<CompressionStats>),
    /// 압축 해제 완료
    Decompressed,
}

/// 결과 영역에 표시할 내용
#[derive(Debug, Clone, PartialEq)]
pub enum ResultView {
    Processing,
    Error(String),
    Stats(CompressionStats),
    Decompressed,
    Placeholder,
}

/// 제출 실패
#[derive(Debug, Error)]
pub enum PanelError {
    #[error("Please select a file first.")]
    NoFile,

    /// 이전 요청이 진행 중
    #[error("요청이 이미 진행 중")]
    Busy,

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// 업로드/제어 패널
#[derive(Debug, Default)]
pub struct Panel {
    selected_file: Option<SelectedFile>,
    algorithm: Algorithm,
    mode: Mode,
    is_loading: bool,
    error: Option<String>,
    outcome: Option<Outcome>,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// 파일 선택. 이전 결과와 에러는 지운다.
    pub fn select_file(&mut self, file: SelectedFile) {
        self.outcome = None;
        self.error = None;
        self.selected_file = Some(file);
    }

    /// 알고리즘 변경. 이전 결과는 유지.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }

    /// 모드 전환 후 전체 초기화
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.reset();
    }

    /// 선택 파일, 결과, 에러, 로딩 상태 초기화
    pub fn reset(&mut self) {
        self.selected_file = None;
        self.outcome = None;
        self.error = None;
        self.is_loading = false;
    }

    /// 실행 버튼 활성화 여부
    pub fn can_submit(&self) -> bool {
        self.selected_file.is_some() && !self.is_loading
    }

    /// 제출 시작: 로딩 상태로 전환하고 요청 스냅샷 반환
    pub fn begin_submit(&mut self) -> Result<SubmitRequest, PanelError> {
        let Some(file) = self.selected_file.clone() else {
            self.error = Some(NO_FILE_MESSAGE.to_string());
            return Err(PanelError::NoFile);
        };
        if self.is_loading {
            return Err(PanelError::Busy);
        }

        self.is_loading = true;
        self.error = None;
        self.outcome = None;

        Ok(SubmitRequest {
            file,
            algorithm: self.algorithm,
            mode: self.mode,
        })
    }

    /// 제출 완료: 응답 결과를 상태에 반영
    pub fn finish_submit(
        &mut self,
        result: Result<Download, DispatchError>,
    ) -> Result<Download, PanelError> {
        self.is_loading = false;

        match result {
            Ok(download) => {
                self.outcome = Some(match self.mode {
                    Mode::Compress => Outcome::Compressed(download.stats.clone()),
                    Mode::Decompress => Outcome::Decompressed,
                });
                Ok(download)
            }
            Err(e) => {
                debug!("요청 실패: {e}");
                self.error = Some(e.user_message());
                Err(PanelError::Dispatch(e))
            }
        }
    }

    /// 제출부터 결과 반영까지 한 번에 수행
    pub async fn submit(&mut self, api: &dyn CompressionApi) -> Result<Download, PanelError> {
        let request = self.begin_submit()?;
        let result = api.process(&request).await;
        self.finish_submit(result)
    }

    /// 결과 영역 뷰
    ///
    /// 로딩 > 에러 > 결과 > 안내 문구 순으로 우선한다.
    pub fn view(&self) -> ResultView {
        if self.is_loading {
            return ResultView::Processing;
        }
        if let Some(error) = &self.error {
            return ResultView::Error(error.clone());
        }
        match &self.outcome {
            Some(Outcome::Compressed(Some(stats))) => ResultView::Stats(stats.clone()),
            Some(Outcome::Decompressed) => ResultView::Decompressed,
            Some(Outcome::Compressed(None)) | None => ResultView::Placeholder,
        }
    }
}
