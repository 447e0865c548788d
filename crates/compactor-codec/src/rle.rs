//! Run-Length Encoding.
//!
//! 컨테이너: `(count: u8, value: u8)` 쌍의 연속. count는 1..=255이며
//! 255보다 긴 런은 여러 쌍으로 나뉜다.

use compactor_core::error::CoreError;

/// 한 쌍이 표현할 수 있는 최대 런 길이
const MAX_RUN: usize = u8::MAX as usize;

/// RLE 압축
pub fn compress(data: &[u8]) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(data.len().min(1 << 16));

    for run in data.chunk_by(|a, b| a == b) {
        for piece in run.chunks(MAX_RUN) {
            encoded.push(piece.len() as u8);
            encoded.push(piece[0]);
        }
    }

    encoded
}

/// RLE 해제
///
/// 홀수 길이 입력은 손상된 스트림으로 취급한다. count가 0인 쌍은 무시.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, CoreError> {
    if data.len() % 2 != 0 {
        return Err(CoreError::codec(format!(
            "RLE stream has odd length {} (expected count/value pairs)",
            data.len()
        )));
    }

    let decoded_len: usize = data.chunks_exact(2).map(|pair| pair[0] as usize).sum();
    let mut decoded = Vec::with_capacity(decoded_len);
    for pair in data.chunks_exact(2) {
        decoded.extend(std::iter::repeat(pair[1]).take(pair[0] as usize));
    }

    Ok(decoded)
}
