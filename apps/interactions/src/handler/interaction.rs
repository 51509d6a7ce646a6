//! # Interaction ハンドラ
//!
//! Discord から届く Interaction を検証し、種別に応じて応答する。
//!
//! ## エンドポイント
//!
//! - `POST /` - Interactions Endpoint URL
//!
//! ## 処理順序
//!
//! 1. 署名検証（失敗したらボディを読まずに 401）
//! 2. `type` による分類
//! 3. Ping → Pong / ApplicationCommand → メッセージ / それ以外 → 400

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::HeaderMap,
};
use kasa_domain::{
    interaction::{InteractionResponse, InteractionType},
    signature::{SIGNATURE_HEADER, SignatureEnvelope, TIMESTAMP_HEADER},
};
use kasa_infra::SignatureVerifier;

use crate::{error::InteractionError, usecase::AdvisoryUseCase};

/// Interaction ハンドラの共有状態
pub struct InteractionState {
    pub verifier: Arc<dyn SignatureVerifier>,
    pub advisory: Arc<dyn AdvisoryUseCase>,
}

/// POST /
///
/// ボディは署名検証のため受信したバイト列のまま扱う。
/// ボディを読み取れない場合も署名検証の失敗として扱う。
pub async fn handle_interaction(
    State(state): State<Arc<InteractionState>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<InteractionResponse>, InteractionError> {
    let signature = header_str(&headers, SIGNATURE_HEADER);
    let timestamp = header_str(&headers, TIMESTAMP_HEADER);
    let (Some(signature), Some(timestamp)) = (signature, timestamp) else {
        tracing::warn!("署名ヘッダーがありません");
        return Err(InteractionError::InvalidSignature);
    };
    let body = body.map_err(|rejection| {
        tracing::warn!(error.message = %rejection, "リクエストボディを読み取れません");
        InteractionError::InvalidSignature
    })?;

    let envelope = SignatureEnvelope::new(signature, timestamp, &body);
    if !state.verifier.verify(&envelope).is_valid() {
        tracing::warn!("署名検証に失敗しました");
        return Err(InteractionError::InvalidSignature);
    }

    let interaction_type = InteractionType::classify(&body);
    tracing::info!(
        interaction.r#type = interaction_type.as_str(),
        "Interaction を受信しました"
    );

    match interaction_type {
        InteractionType::Ping => Ok(Json(InteractionResponse::pong())),
        InteractionType::ApplicationCommand => {
            let content = state.advisory.build_advisory().await?;
            Ok(Json(InteractionResponse::channel_message(content)))
        }
        InteractionType::Unsupported => Err(InteractionError::InvalidRequest),
    }
}

/// ヘッダー値を文字列として取得する（無い・UTF-8 でない場合は `None`）
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
