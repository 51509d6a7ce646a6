//! # ルーター構築
//!
//! ハンドラとミドルウェアを組み立てた [`Router`] を返す。
//! `main` と統合テストが同じ構成を使う。
//!
//! ## レイヤー構成（外側から）
//!
//! 1. `SetRequestIdLayer`: `X-Request-Id` を生成（クライアント提供値があればそれを使う）
//! 2. `TraceLayer`: request_id を含むリクエストスパンを作成
//! 3. `PropagateRequestIdLayer`: `X-Request-Id` をレスポンスヘッダーにコピー
//! 4. `CanonicalLogLineLayer`: リクエストごとのサマリログ

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    routing::{get, post},
};
use kasa_shared::{canonical_log::CanonicalLogLineLayer, observability::make_request_span};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::handler::{InteractionState, handle_interaction, health_check};

/// アプリケーションのルーターを構築する
pub fn build_app(state: Arc<InteractionState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/", post(handle_interaction))
        .with_state(state)
        .layer(CanonicalLogLineLayer)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
