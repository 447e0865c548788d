//! Huffman 코딩.
//!
//! 컨테이너 레이아웃:
//!
//! ```text
//! u32 BE header_len | header (JSON {"<byte>": count}) | pad: u8 | bitstream (MSB-first)
//! ```
//!
//! `pad`는 마지막 바이트에 덧붙인 0 비트 수 (0..=7). 빈 입력은 빈 출력.
//!
//! 트리는 빈도 테이블만으로 결정적으로 재구성된다. 리프는 바이트 값 오름차순으로
//! 생성되고, (빈도, 생성 순번)이 가장 작은 두 노드를 반복 병합하며 먼저 꺼낸
//! 노드가 왼쪽(`0`) 가지가 된다.

use compactor_core::error::CoreError;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};
use tracing::trace;

/// 헤더 길이 접두사 크기
const LENGTH_PREFIX: usize = 4;

/// 바이트 → 출현 횟수
type FrequencyTable = BTreeMap<u8, u64>;

enum Node {
    Leaf(u8),
    Internal { left: usize, right: usize },
}

/// 인덱스 기반 Huffman 트리
struct Tree {
    nodes: Vec<Node>,
    root: usize,
}

impl Tree {
    fn build(frequencies: &FrequencyTable) -> Option<Self> {
        let mut nodes = Vec::with_capacity(frequencies.len() * 2);
        let mut heap = BinaryHeap::with_capacity(frequencies.len());

        for (&byte, &count) in frequencies {
            heap.push(Reverse((count, nodes.len())));
            nodes.push(Node::Leaf(byte));
        }

        while heap.len() > 1 {
            let (Some(Reverse((left_count, left))), Some(Reverse((right_count, right)))) =
                (heap.pop(), heap.pop())
            else {
                break;
            };
            heap.push(Reverse((left_count.saturating_add(right_count), nodes.len())));
            nodes.push(Node::Internal { left, right });
        }

        heap.pop().map(|Reverse((_, root))| Self { nodes, root })
    }

    /// 바이트별 코드 테이블. 리프 하나뿐인 트리는 모든 심볼에 `0` 한 비트를 쓴다.
    fn codes(&self) -> Vec<Vec<bool>> {
        let mut codes = vec![Vec::new(); 256];
        let mut stack = vec![(self.root, Vec::new())];

        while let Some((index, prefix)) = stack.pop() {
            match self.nodes[index] {
                Node::Leaf(byte) => {
                    codes[byte as usize] = if prefix.is_empty() { vec![false] } else { prefix };
                }
                Node::Internal { left, right } => {
                    let mut right_prefix = prefix.clone();
                    right_prefix.push(true);
                    stack.push((right, right_prefix));

                    let mut left_prefix = prefix;
                    left_prefix.push(false);
                    stack.push((left, left_prefix));
                }
            }
        }

        codes
    }
}

/// MSB-first 비트 버퍼
struct BitWriter {
    bytes: Vec<u8>,
    current: u8,
    filled: u8,
}

impl BitWriter {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            current: 0,
            filled: 0,
        }
    }

    fn write(&mut self, bits: &[bool]) {
        for &bit in bits {
            self.current = (self.current << 1) | u8::from(bit);
            self.filled += 1;
            if self.filled == 8 {
                self.bytes.push(self.current);
                self.current = 0;
                self.filled = 0;
            }
        }
    }

    /// 남은 비트를 0으로 채워 내보내고 (바이트, 패딩 비트 수)를 반환
    fn finish(mut self) -> (Vec<u8>, u8) {
        if self.filled == 0 {
            return (self.bytes, 0);
        }
        let pad = 8 - self.filled;
        self.bytes.push(self.current << pad);
        (self.bytes, pad)
    }
}

fn frequency_table(data: &[u8]) -> FrequencyTable {
    let mut counts = [0u64; 256];
    for &byte in data {
        counts[byte as usize] += 1;
    }
    (0..=u8::MAX)
        .zip(counts)
        .filter(|&(_, count)| count > 0)
        .collect()
}

/// Huffman 압축
pub fn compress(data: &[u8]) -> Result<Vec<u8>, CoreError> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let frequencies = frequency_table(data);
    let tree = Tree::build(&frequencies)
        .ok_or_else(|| CoreError::Internal("cannot build Huffman tree".to_string()))?;
    let codes = tree.codes();

    let mut writer = BitWriter::with_capacity(data.len() / 2);
    for &byte in data {
        writer.write(&codes[byte as usize]);
    }
    let (payload, pad) = writer.finish();

    let header = serde_json::to_vec(&frequencies)?;
    let header_len = u32::try_from(header.len())
        .map_err(|_| CoreError::Internal("Huffman header exceeds 4 GiB".to_string()))?;

    trace!(
        symbols = frequencies.len(),
        header_len,
        payload_len = payload.len(),
        "huffman encoded"
    );

    let mut out = Vec::with_capacity(LENGTH_PREFIX + header.len() + 1 + payload.len());
    out.extend_from_slice(&header_len.to_be_bytes());
    out.extend_from_slice(&header);
    out.push(pad);
    out.extend_from_slice(&payload);
    Ok(out)
}

/// Huffman 해제
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, CoreError> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let (prefix, rest) = data
        .split_first_chunk::<LENGTH_PREFIX>()
        .ok_or_else(|| CoreError::codec("truncated Huffman header length"))?;
    let header_len = u32::from_be_bytes(*prefix) as usize;
    if header_len > rest.len() {
        return Err(CoreError::codec(format!(
            "Huffman header length {header_len} exceeds available {} bytes",
            rest.len()
        )));
    }
    let (header, body) = rest.split_at(header_len);

    let frequencies: FrequencyTable = serde_json::from_slice(header)
        .map_err(|e| CoreError::codec(format!("invalid Huffman header: {e}")))?;
    if frequencies.is_empty() {
        return Err(CoreError::codec("Huffman frequency table is empty"));
    }
    if frequencies.values().any(|&count| count == 0) {
        return Err(CoreError::codec("Huffman frequency table has a zero count"));
    }
    let total = frequencies
        .values()
        .try_fold(0u64, |acc, &count| acc.checked_add(count))
        .ok_or_else(|| CoreError::codec("Huffman symbol count overflows"))?;

    let (&pad, payload) = body
        .split_first()
        .ok_or_else(|| CoreError::codec("missing Huffman padding byte"))?;
    if pad > 7 {
        return Err(CoreError::codec(format!("invalid Huffman padding {pad}")));
    }
    let bit_len = (payload.len() as u64 * 8)
        .checked_sub(u64::from(pad))
        .ok_or_else(|| CoreError::codec("Huffman padding exceeds bitstream"))?;

    // 단일 심볼: 심볼당 `0` 한 비트
    if let Some((&byte, _)) = frequencies.iter().next().filter(|_| frequencies.len() == 1) {
        if bit_len != total {
            return Err(CoreError::codec(format!(
                "Huffman bitstream holds {bit_len} bits, header declares {total} symbols"
            )));
        }
        let count = usize::try_from(total)
            .map_err(|_| CoreError::codec("Huffman symbol count too large"))?;
        return Ok(vec![byte; count]);
    }

    let tree = Tree::build(&frequencies)
        .ok_or_else(|| CoreError::Internal("cannot build Huffman tree".to_string()))?;
    decode_bits(&tree, payload, bit_len, total)
}

fn decode_bits(tree: &Tree, payload: &[u8], bit_len: u64, total: u64) -> Result<Vec<u8>, CoreError> {
    let capacity = usize::try_from(total.min(bit_len)).unwrap_or(0);
    let mut decoded = Vec::with_capacity(capacity);
    let mut node = tree.root;

    for i in 0..bit_len {
        let byte = payload[(i / 8) as usize];
        let bit = (byte >> (7 - (i % 8))) & 1 == 1;

        node = match tree.nodes[node] {
            Node::Internal { left, right } => {
                if bit {
                    right
                } else {
                    left
                }
            }
            Node::Leaf(_) => {
                return Err(CoreError::Internal(
                    "Huffman decoder cursor rested on a leaf".to_string(),
                ))
            }
        };

        if let Node::Leaf(symbol) = tree.nodes[node] {
            if decoded.len() as u64 == total {
                return Err(CoreError::codec(format!(
                    "Huffman bitstream decodes past the declared {total} symbols"
                )));
            }
            decoded.push(symbol);
            node = tree.root;
        }
    }

    if node != tree.root {
        return Err(CoreError::codec("Huffman bitstream ends in the middle of a code"));
    }
    if decoded.len() as u64 != total {
        return Err(CoreError::codec(format!(
            "Huffman bitstream decoded {} symbols, header declares {total}",
            decoded.len()
        )));
    }

    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_of(encoded: &[u8]) -> serde_json::Value {
        let len = u32::from_be_bytes(encoded[..4].try_into().unwrap()) as usize;
        serde_json::from_slice(&encoded[4..4 + len]).unwrap()
    }

    #[test]
    fn text_roundtrip_shrinks() {
        let data = b"this is an example of a huffman tree, this is an example".repeat(20);
        let encoded = compress(&data).unwrap();
        assert!(encoded.len() < data.len());
        assert_eq!(decompress(&encoded).unwrap(), data);
    }

    #[test]
    fn header_is_json_frequency_map() {
        let encoded = compress(b"aab").unwrap();
        let header = header_of(&encoded);
        assert_eq!(header["97"], 2);
        assert_eq!(header["98"], 1);
    }

    #[test]
    fn known_layout_for_two_symbols() {
        // 'b'(1) < 'a'(2): b가 먼저 꺼내져 왼쪽(0), a는 오른쪽(1)
        // "aab" → 1 1 0 → 0b1100_0000, pad 5
        let encoded = compress(b"aab").unwrap();
        let header_len = u32::from_be_bytes(encoded[..4].try_into().unwrap()) as usize;
        let tail = &encoded[4 + header_len..];
        assert_eq!(tail, &[5, 0b1100_0000]);
    }

    #[test]
    fn single_symbol_uses_one_bit_per_byte() {
        let data = vec![b'z'; 20];
        let encoded = compress(&data).unwrap();
        let header_len = u32::from_be_bytes(encoded[..4].try_into().unwrap()) as usize;
        // 20비트 → 3바이트, pad 4
        assert_eq!(&encoded[4 + header_len..], &[4, 0, 0, 0]);
        assert_eq!(decompress(&encoded).unwrap(), data);
    }

    #[test]
    fn every_byte_value_roundtrips() {
        let data: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        assert_eq!(decompress(&compress(&data).unwrap()).unwrap(), data);
    }

    #[test]
    fn skewed_distribution_roundtrips() {
        let mut data = vec![0u8; 10_000];
        data.extend((1..=40u8).flat_map(|b| std::iter::repeat(b).take(b as usize)));
        assert_eq!(decompress(&compress(&data).unwrap()).unwrap(), data);
    }

    #[test]
    fn empty_roundtrip() {
        assert!(compress(b"").unwrap().is_empty());
        assert!(decompress(b"").unwrap().is_empty());
    }

    #[test]
    fn truncated_length_prefix() {
        assert!(matches!(decompress(&[0, 0, 1]), Err(CoreError::Codec(_))));
    }

    #[test]
    fn header_length_past_end() {
        assert!(matches!(
            decompress(&[0, 0, 0, 50, b'{', b'}']),
            Err(CoreError::Codec(_))
        ));
    }

    #[test]
    fn header_not_json() {
        let mut data = vec![0, 0, 0, 3];
        data.extend_from_slice(b"abc");
        data.push(0);
        assert!(matches!(decompress(&data), Err(CoreError::Codec(_))));
    }

    #[test]
    fn header_key_out_of_byte_range() {
        let header = br#"{"300":1,"1":1}"#;
        let mut data = (header.len() as u32).to_be_bytes().to_vec();
        data.extend_from_slice(header);
        data.extend_from_slice(&[6, 0b0100_0000]);
        assert!(matches!(decompress(&data), Err(CoreError::Codec(_))));
    }

    #[test]
    fn missing_padding_byte() {
        let encoded = compress(b"hello").unwrap();
        let header_len = u32::from_be_bytes(encoded[..4].try_into().unwrap()) as usize;
        let truncated = &encoded[..4 + header_len];
        assert!(matches!(decompress(truncated), Err(CoreError::Codec(_))));
    }

    #[test]
    fn truncated_bitstream_is_error() {
        let data = b"abracadabra, abracadabra, abracadabra".to_vec();
        let mut encoded = compress(&data).unwrap();
        encoded.truncate(encoded.len() - 2);
        assert!(matches!(decompress(&encoded), Err(CoreError::Codec(_))));
    }

    #[test]
    fn bad_padding_value() {
        let mut encoded = compress(b"hello world").unwrap();
        let header_len = u32::from_be_bytes(encoded[..4].try_into().unwrap()) as usize;
        encoded[4 + header_len] = 9;
        assert!(matches!(decompress(&encoded), Err(CoreError::Codec(_))));
    }

    #[test]
    fn rle_stream_is_rejected() {
        // RLE 출력을 Huffman으로 해제 시도 → 에러 (패닉 없음)
        let rle = crate::rle::compress(b"aaaaabbbbbcccccdddd");
        assert!(decompress(&rle).is_err());
    }

    fn container(header: &[u8], tail: &[u8]) -> Vec<u8> {
        let mut data = (header.len() as u32).to_be_bytes().to_vec();
        data.extend_from_slice(header);
        data.extend_from_slice(tail);
        data
    }

    #[test]
    fn zero_count_in_header() {
        let data = container(br#"{"97":0,"98":1}"#, &[7, 0]);
        assert!(matches!(decompress(&data), Err(CoreError::Codec(_))));
    }

    #[test]
    fn padding_larger_than_bitstream() {
        let data = container(br#"{"97":1,"98":1}"#, &[7]);
        assert!(matches!(decompress(&data), Err(CoreError::Codec(_))));
    }

    #[test]
    fn single_symbol_bit_count_mismatch() {
        // 3개 심볼 선언, 비트스트림은 8비트
        let data = container(br#"{"97":3}"#, &[0, 0]);
        assert!(matches!(decompress(&data), Err(CoreError::Codec(_))));
    }

    #[test]
    fn bitstream_decodes_past_declared_total() {
        // 2개 심볼 선언, 8비트 모두 'a'(0)로 해석됨
        let data = container(br#"{"97":1,"98":1}"#, &[0, 0]);
        assert!(matches!(decompress(&data), Err(CoreError::Codec(_))));
    }
}
