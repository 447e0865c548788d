//! 결과 영역 렌더링.
//!
//! 패널의 [`ResultView`]를 터미널 출력용 텍스트로 변환한다.

use compactor_core::models::{Algorithm, CompressionStats};

use crate::panel::ResultView;

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// 바이트 수를 사람이 읽기 쉬운 크기로 변환
///
/// 1024 단위, 소수점 `decimals` 자리에서 반올림 후 뒤쪽 0은 제거한다.
/// `1536 → "1.5 KB"`, `1024 → "1 KB"`, `0 → "0 Bytes"`.
pub fn format_bytes(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    // log_1024(x) = log2(x) / 10
    let value = bytes as f64;
    let index = ((value.log2() / 10.0).floor() as usize).min(UNITS.len() - 1);
    let scaled = value / 1024f64.powi(index as i32);

    format!("{} {}", trim_fixed(scaled, decimals), UNITS[index])
}

/// 고정 소수점 반올림 후 불필요한 0과 소수점 제거
///
/// 동점은 0에서 먼 쪽으로 올린다 (`1.125 → 1.13`).
fn trim_fixed(value: f64, decimals: usize) -> String {
    let scale = 10f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
    let rounded = if scale.is_finite() {
        (value * scale).round() / scale
    } else {
        value
    };
    let fixed = format!("{rounded:.decimals$}");
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}

/// 통계 카드 4종 (라벨, 값)
pub fn stat_fields(stats: &CompressionStats) -> [(&'static str, String); 4] {
    [
        ("Original Size", format_bytes(stats.original_size, 2)),
        ("Compressed Size", format_bytes(stats.compressed_size, 2)),
        ("Processing Time", format!("{} ms", stats.processing_time)),
        ("Ratio", format!("{}%", stats.compression_ratio)),
    ]
}

/// 결과 영역 텍스트
pub fn render_view(view: &ResultView) -> String {
    match view {
        ResultView::Processing => "Processing your file...".to_string(),
        ResultView::Error(message) => message.clone(),
        ResultView::Stats(stats) => stat_fields(stats)
            .iter()
            .map(|(label, value)| format!("{label:<16} {value}"))
            .collect::<Vec<_>>()
            .join("\n"),
        ResultView::Decompressed => "File Decompressed!\nYour download has been saved.".to_string(),
        ResultView::Placeholder => "Statistics will appear here.".to_string(),
    }
}

/// 알고리즘 설명 블록
pub fn algorithm_info(algorithm: Algorithm) -> String {
    format!(
        "How {} Works\n{}",
        algorithm.display_name(),
        algorithm.description()
    )
}
