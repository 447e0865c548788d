//! 압축 알고리즘 / 작업 모드 모델.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// 압축 알고리즘 유형
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Huffman 코딩 (빈도 기반 가변 길이 접두 코드)
    #[default]
    Huffman,
    /// Run-Length Encoding
    Rle,
}

impl Algorithm {
    /// 지원하는 모든 알고리즘
    pub const ALL: [Algorithm; 2] = [Algorithm::Huffman, Algorithm::Rle];

    /// 폼 필드 / 파일명에 사용되는 식별자
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Huffman => "huffman",
            Algorithm::Rle => "rle",
        }
    }

    /// 사용자 표시 이름
    pub fn display_name(&self) -> &'static str {
        match self {
            Algorithm::Huffman => "Huffman Coding",
            Algorithm::Rle => "Run-Length Encoding (RLE)",
        }
    }

    /// 알고리즘 동작 설명
    pub fn description(&self) -> &'static str {
        match self {
            Algorithm::Huffman => {
                "A lossless algorithm that assigns variable-length codes to characters based on \
                 their frequency. More common characters get shorter codes. Excellent for text \
                 files and is often used after an algorithm like LZ77."
            }
            Algorithm::Rle => {
                "A simple lossless compression where runs of data (e.g., AAAA) are stored as a \
                 single value and count (4A). It is only effective for files with long sequences \
                 of repeating characters, like simple bitmap images."
            }
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "huffman" => Ok(Algorithm::Huffman),
            "rle" => Ok(Algorithm::Rle),
            other => Err(CoreError::Validation {
                field: "algorithm".to_string(),
                message: format!("unsupported value '{other}'"),
            }),
        }
    }
}

/// 작업 모드 (압축 / 해제)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// 압축
    #[default]
    Compress,
    /// 압축 해제
    Decompress,
}

impl Mode {
    /// API 엔드포인트 경로 세그먼트 (`/api/{endpoint}`)
    pub fn endpoint(&self) -> &'static str {
        match self {
            Mode::Compress => "compress",
            Mode::Decompress => "decompress",
        }
    }

    /// 사용자 표시 이름
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Compress => "Compress",
            Mode::Decompress => "Decompress",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}
