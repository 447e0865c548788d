//! 압축 통계 모델.
//!
//! HTTP 헤더와 JSON 본문으로 서버-클라이언트 간에 공유된다.

use serde::{Deserialize, Serialize};

/// 압축 통계가 실리는 응답 헤더 이름
pub const STATS_HEADER: &str = "x-compression-stats";

/// 압축 통계
///
/// `x-compression-stats` 헤더에 camelCase JSON으로 직렬화된다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionStats {
    /// 원본 크기 (바이트)
    pub original_size: u64,
    /// 압축 결과 크기 (바이트)
    pub compressed_size: u64,
    /// 절감률 (%) - 음수면 결과가 원본보다 큼
    pub compression_ratio: f64,
    /// 처리 시간 (밀리초)
    pub processing_time: f64,
}

impl CompressionStats {
    /// 크기와 경과 시간으로 통계 생성
    ///
    /// 비율과 처리 시간은 소수점 둘째 자리로 반올림한다.
    /// 원본이 비어 있으면 비율은 0.
    pub fn new(original_size: u64, compressed_size: u64, elapsed_ms: f64) -> Self {
        let compression_ratio = if original_size > 0 {
            round2((1.0 - compressed_size as f64 / original_size as f64) * 100.0)
        } else {
            0.0
        };

        Self {
            original_size,
            compressed_size,
            compression_ratio,
            processing_time: round2(elapsed_ms),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_rounded_to_two_places() {
        let stats = CompressionStats::new(3, 2, 0.123_456);
        assert_eq!(stats.compression_ratio, 33.33);
        assert_eq!(stats.processing_time, 0.12);
    }

    #[test]
    fn empty_original_has_zero_ratio() {
        let stats = CompressionStats::new(0, 0, 1.0);
        assert_eq!(stats.compression_ratio, 0.0);
    }

    #[test]
    fn expansion_gives_negative_ratio() {
        let stats = CompressionStats::new(100, 150, 1.0);
        assert_eq!(stats.compression_ratio, -50.0);
    }

    #[test]
    fn stats_serialize_camel_case() {
        let stats = CompressionStats::new(1000, 250, 4.5);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["originalSize"], 1000);
        assert_eq!(json["compressedSize"], 250);
        assert_eq!(json["compressionRatio"], 75.0);
        assert_eq!(json["processingTime"], 4.5);
    }

    #[test]
    fn stats_accept_integer_numbers() {
        let stats: CompressionStats = serde_json::from_str(
            r#"{"originalSize":10,"compressedSize":4,"compressionRatio":60,"processingTime":1}"#,
        )
        .unwrap();
        assert_eq!(stats.compression_ratio, 60.0);
    }
}
