//! Compactor 도메인 모델.
//!
//! 서버-클라이언트 간 공유하는 핵심 데이터 구조체를 정의한다.

pub mod algorithm;
pub mod stats;

pub use algorithm::{Algorithm, Mode};
pub use stats::{CompressionStats, STATS_HEADER};
