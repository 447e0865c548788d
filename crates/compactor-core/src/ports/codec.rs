//! 코덱 포트.
//!
//! 구현: `compactor-codec` crate (Huffman, RLE)

use crate::error::CoreError;
use crate::models::Algorithm;

/// 데이터 압축/해제 인터페이스
pub trait Codec: Send + Sync {
    /// 데이터 압축
    fn compress(&self, data: &[u8], algorithm: Algorithm) -> Result<Vec<u8>, CoreError>;

    /// 데이터 해제
    fn decompress(&self, data: &[u8], algorithm: Algorithm) -> Result<Vec<u8>, CoreError>;
}
