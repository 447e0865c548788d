//! 다운로드 파일명 해석과 저장.

use compactor_core::models::Mode;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::DispatchError;
use crate::http_client::Download;

static QUOTED_FILENAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"filename="([^"]+)""#).expect("유효한 filename 정규식"));

static BARE_FILENAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"filename=([^";\s]+)"#).expect("유효한 filename 정규식"));

/// 모드별 기본 다운로드 파일명
pub fn fallback_filename(mode: Mode) -> &'static str {
    match mode {
        Mode::Compress => "compressed-file",
        Mode::Decompress => "decompressed-file",
    }
}

fn capture<'h>(re: &Regex, header: &'h str) -> Option<&'h str> {
    re.captures(header)?
        .get(1)
        .map(|m| m.as_str())
}

/// Content-Disposition 헤더에서 파일명 추출
///
/// `filename="..."` 우선, 따옴표 없는 `filename=...`도 허용. 없으면 모드별 기본값.
pub fn filename_from_disposition(header: Option<&str>, mode: Mode) -> String {
    header
        .and_then(|h| capture(&QUOTED_FILENAME, h).or_else(|| capture(&BARE_FILENAME, h)))
        .map(str::to_string)
        .unwrap_or_else(|| fallback_filename(mode).to_string())
}

/// 파일명을 마지막 경로 요소로 축소
fn final_component(name: &str) -> Option<&str> {
    name.rsplit(['/', '\\'])
        .next()
        .filter(|n| !n.is_empty() && *n != "." && *n != "..")
}

/// 다운로드 결과를 디렉토리에 저장하고 저장 경로 반환
pub fn save_download(dir: &Path, download: &Download) -> Result<PathBuf, DispatchError> {
    let name = final_component(&download.filename).unwrap_or("download");
    std::fs::create_dir_all(dir)?;

    let path = dir.join(name);
    std::fs::write(&path, &download.bytes)?;
    info!("다운로드 저장: {} ({} bytes)", path.display(), download.bytes.len());
    Ok(path)
}
