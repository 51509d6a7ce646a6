//! # ヘルスチェックハンドラ
//!
//! ホスティング先の死活監視向けエンドポイント。
//!
//! レスポンス型は [`kasa_shared::HealthResponse`] を参照。

use axum::Json;
use kasa_shared::HealthResponse;

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}
