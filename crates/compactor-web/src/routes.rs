//! API 라우트 정의.

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::AppState;

/// API 라우트 생성
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/compress", post(handlers::compress::compress_file))
        .route("/decompress", post(handlers::decompress::decompress_file))
}
