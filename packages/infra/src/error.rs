//! # インフラ層エラー定義
//!
//! 外部 API 通信や鍵の読み込みで発生するエラーを表現する。
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターン:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別
//!
//! `From` 実装や convenience constructor で生成した時点のスパンが記録されるため、
//! 上位層で粗いエラーに包み直しても、どの処理で失敗したかをログから辿れる。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// HTTP 通信エラー
    ///
    /// 接続失敗、タイムアウト、ボディ読み取り失敗など。
    #[error("HTTP 通信エラー: {0}")]
    Http(#[source] reqwest::Error),

    /// 外部 API が 2xx 以外を返した
    #[error("予期しないステータス {status}: {body}")]
    UnexpectedStatus {
        /// HTTP ステータスコード
        status: u16,
        /// レスポンスボディ（診断用）
        body:   String,
    },

    /// レスポンスが期待するスキーマに一致しない
    #[error("レスポンスの解析に失敗しました: {0}")]
    Decode(#[source] serde_json::Error),

    /// 署名検証用の公開鍵が不正
    #[error("公開鍵が不正です: {0}")]
    InvalidPublicKey(String),
}

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// 2xx 以外のステータスエラーを生成する
    pub fn unexpected_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::UnexpectedStatus {
                status,
                body: body.into(),
            },
            span_trace: SpanTrace::capture(),
        }
    }

    /// 公開鍵エラーを生成する
    pub fn invalid_public_key(msg: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::InvalidPublicKey(msg.into()),
            span_trace: SpanTrace::capture(),
        }
    }
}

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

impl From<reqwest::Error> for InfraError {
    fn from(source: reqwest::Error) -> Self {
        Self {
            kind:       InfraErrorKind::Http(source),
            span_trace: SpanTrace::capture(),
        }
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(source: serde_json::Error) -> Self {
        Self {
            kind:       InfraErrorKind::Decode(source),
            span_trace: SpanTrace::capture(),
        }
    }
}
