//! # compactor-codec
//!
//! `Codec` 포트 구현. Huffman 코딩과 Run-Length Encoding을 지원한다.
//!
//! ## 사용 예시
//!
//! ```rust
//! use compactor_codec::ByteCodec;
//! use compactor_core::models::Algorithm;
//! use compactor_core::ports::codec::Codec;
//!
//! let codec = ByteCodec::new();
//! let packed = codec.compress(b"aaaabbb", Algorithm::Rle).unwrap();
//! assert_eq!(packed, vec![4, b'a', 3, b'b']);
//! ```

pub mod huffman;
pub mod rle;

use compactor_core::error::CoreError;
use compactor_core::models::Algorithm;
use compactor_core::ports::codec::Codec;
use tracing::debug;

/// 알고리즘별 바이트 코덱 - `Codec` 포트 구현
#[derive(Debug, Clone, Copy, Default)]
pub struct ByteCodec;

impl ByteCodec {
    /// 새 코덱 생성
    pub fn new() -> Self {
        Self
    }
}

impl Codec for ByteCodec {
    fn compress(&self, data: &[u8], algorithm: Algorithm) -> Result<Vec<u8>, CoreError> {
        let encoded = match algorithm {
            Algorithm::Huffman => huffman::compress(data)?,
            Algorithm::Rle => rle::compress(data),
        };
        debug!("{algorithm} 압축: {} → {} bytes", data.len(), encoded.len());
        Ok(encoded)
    }

    fn decompress(&self, data: &[u8], algorithm: Algorithm) -> Result<Vec<u8>, CoreError> {
        let decoded = match algorithm {
            Algorithm::Huffman => huffman::decompress(data)?,
            Algorithm::Rle => rle::decompress(data)?,
        };
        debug!("{algorithm} 해제: {} → {} bytes", data.len(), decoded.len());
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_every_algorithm() {
        let codec = ByteCodec::new();
        let data = b"Hello compactor! aaaaaaaaaaaaaaaa bbbbbbbbbbbbbbbb".to_vec();
        for algo in Algorithm::ALL {
            let compressed = codec.compress(&data, algo).unwrap();
            let decompressed = codec.decompress(&compressed, algo).unwrap();
            assert_eq!(decompressed, data, "{algo} roundtrip");
        }
    }

    #[test]
    fn empty_data() {
        let codec = ByteCodec::new();
        for algo in Algorithm::ALL {
            let compressed = codec.compress(b"", algo).unwrap();
            assert!(compressed.is_empty());
            assert!(codec.decompress(&compressed, algo).unwrap().is_empty());
        }
    }

    #[test]
    fn wrong_algorithm_huffman_as_rle() {
        let codec = ByteCodec::new();
        // Huffman 컨테이너를 RLE로 해석 → 에러이거나 원본과 다른 결과
        let data = b"abc";
        let compressed = codec.compress(data, Algorithm::Huffman).unwrap();
        let result = codec.decompress(&compressed, Algorithm::Rle);
        match result {
            Ok(bytes) => assert_ne!(bytes, data.to_vec()),
            Err(e) => assert!(matches!(e, CoreError::Codec(_))),
        }
    }

    #[test]
    fn wrong_algorithm_rle_as_huffman() {
        let codec = ByteCodec::new();
        let compressed = codec
            .compress(b"cross algorithm test data", Algorithm::Rle)
            .unwrap();
        let result = codec.decompress(&compressed, Algorithm::Huffman);
        assert!(result.is_err());
    }
}
