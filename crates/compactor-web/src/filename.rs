//! 업로드 파일명 정리 및 결과 파일명 생성.

use compactor_core::models::Algorithm;
use unicode_normalization::UnicodeNormalization;

/// 정리 결과가 비었을 때 사용하는 파일명
const FALLBACK_NAME: &str = "file";

/// 업로드 파일명을 안전한 단일 경로 요소로 정리
///
/// NFKD 정규화 후 비 ASCII 문자 제거 → 경로 구분자를 공백으로 → 공백 구간을 `_`로 연결 →
/// `[A-Za-z0-9_.-]` 외 문자 제거 → 양끝 `.`/`_` 제거. 결과가 비면 `file`.
pub fn secure_filename(name: &str) -> String {
    let ascii: String = name
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");

    let cleaned: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// 파일명을 (stem, 확장자) 로 분리. 확장자는 `.`을 포함하며 선행 점은 확장자로 보지 않는다.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if name[..idx].chars().any(|c| c != '.') => name.split_at(idx),
        _ => (name, ""),
    }
}

/// 압축 결과 파일명: `{stem}_compressed_{algorithm}{ext}`
pub fn compressed_name(safe_name: &str, algorithm: Algorithm) -> String {
    let (stem, ext) = split_extension(safe_name);
    format!("{stem}_compressed_{algorithm}{ext}")
}

/// 해제 결과 파일명: `_compressed_{algorithm}` 표식을 모두 제거
pub fn decompressed_name(safe_name: &str, algorithm: Algorithm) -> String {
    let restored = safe_name.replace(&format!("_compressed_{algorithm}"), "");
    if restored.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        restored
    }
}
