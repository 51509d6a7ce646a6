//! # エラーレスポンス（RFC 9457 Problem Details）
//!
//! Interactions エンドポイントが返すエラーボディ。
//!
//! Discord はエンドポイント登録時に「署名が不正なリクエストへ 401 を返すか」を検証する。
//! そのため `detail` の文言はクライアントに見える固定メッセージとし、
//! 原因の詳細は載せない。
//!
//! | 種別 | status | detail |
//! |------|--------|--------|
//! | [`invalid_signature`](ErrorResponse::invalid_signature) | 401 | `Invalid request signature` |
//! | [`invalid_request`](ErrorResponse::invalid_request) | 400 | `Invalid request` |
//! | [`internal_error`](ErrorResponse::internal_error) | 500 | `内部エラーが発生しました` |

use serde::{Deserialize, Serialize};

const ERROR_TYPE_BASE: &str = "https://kasa.example.com/errors";

/// エラーレスポンス（RFC 9457 Problem Details）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 種別 URI
    #[serde(rename = "type")]
    pub error_type: String,
    pub title:      String,
    pub status:     u16,
    pub detail:     String,
}

impl ErrorResponse {
    /// `slug` は種別 URI の末尾（例: `"invalid-signature"`）
    pub fn new(
        slug: &str,
        title: impl Into<String>,
        status: u16,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            error_type: format!("{ERROR_TYPE_BASE}/{slug}"),
            title: title.into(),
            status,
            detail: detail.into(),
        }
    }

    /// 署名ヘッダーが無い、または署名検証に失敗した（401）
    pub fn invalid_signature() -> Self {
        Self::new(
            "invalid-signature",
            "Unauthorized",
            401,
            "Invalid request signature",
        )
    }

    /// 対応していない Interaction（400）
    pub fn invalid_request() -> Self {
        Self::new("invalid-request", "Bad Request", 400, "Invalid request")
    }

    /// 内部エラー（500）
    pub fn internal_error() -> Self {
        Self::new(
            "internal-error",
            "Internal Server Error",
            500,
            "内部エラーが発生しました",
        )
    }
}
