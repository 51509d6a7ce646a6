//! # Interactions エラー定義
//!
//! Interactions 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! `detail` には Discord 側に表示されるステータスメッセージを載せる。
//! 5xx の原因はログにのみ出力し、レスポンスには含めない。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kasa_shared::ErrorResponse;
use thiserror::Error;

use crate::usecase::AdvisoryError;

/// Interactions で発生するエラー
#[derive(Debug, Error)]
pub enum InteractionError {
    /// 署名ヘッダーが無い、または署名検証に失敗した
    #[error("署名検証に失敗しました")]
    InvalidSignature,

    /// 対応していない Interaction
    #[error("対応していないリクエストです")]
    InvalidRequest,

    /// メッセージ生成エラー
    #[error(transparent)]
    Advisory(#[from] AdvisoryError),
}

impl IntoResponse for InteractionError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            InteractionError::InvalidSignature => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::invalid_signature(),
            ),
            InteractionError::InvalidRequest => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::invalid_request(),
            ),
            InteractionError::Advisory(e) => {
                tracing::error!(stage = e.stage(), "メッセージ生成エラー: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal_error(),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
