//! # Observability 基盤
//!
//! `tracing` の subscriber 初期化と、HTTP リクエストごとのスパン生成。
//!
//! | 環境変数 | 説明 |
//! |----------|------|
//! | `RUST_LOG` | ログフィルタ（未設定時は [`DEFAULT_LOG_FILTER`]） |
//! | `LOG_FORMAT` | `json`（本番）または `pretty`（開発、デフォルト） |

use std::str::FromStr;

use thiserror::Error;

/// Request ID を運ぶ HTTP ヘッダー名
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_LOG_FILTER: &str = "info,kasa=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 行 1 JSON（ログ基盤への取り込み向け）
    Json,
    #[default]
    Pretty,
}

/// `LOG_FORMAT` の値が不正
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown LOG_FORMAT={0:?}")]
pub struct UnknownLogFormat(String);

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    /// 前後の空白と大文字小文字は無視する
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            _ => Err(UnknownLogFormat(s.to_string())),
        }
    }
}

impl LogFormat {
    /// 環境変数 `LOG_FORMAT` から読み取る
    ///
    /// 未設定なら `Pretty`。不正な値は stderr に警告して `Pretty` とする
    /// （subscriber 初期化前なので tracing は使えない）。
    pub fn from_env() -> Self {
        let Ok(value) = std::env::var("LOG_FORMAT") else {
            return Self::default();
        };
        value.parse().unwrap_or_else(|e| {
            eprintln!("WARNING: {e}, falling back to pretty");
            Self::default()
        })
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// サービス名（起動ログに出力する）
    pub service_name: String,
    pub log_format:   LogFormat,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
        }
    }

    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::new(service_name, LogFormat::from_env())
    }
}

/// グローバル subscriber を初期化する
///
/// `ErrorLayer` を登録するため、以降に生成した `InfraError` は SpanTrace を持つ。
#[cfg(feature = "observability")]
pub fn init_tracing(config: TracingConfig) {
    use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().with_target(false).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .init();

    tracing::debug!(
        service = %config.service_name,
        log_format = ?config.log_format,
        "トレーシングを初期化しました"
    );
}

/// HTTP リクエストごとのスパンを生成する
///
/// `TraceLayer::make_span_with` に渡す。`SetRequestIdLayer` の内側で呼ばれるため、
/// `x-request-id` は常に付与済み（無ければ `-`）。
#[cfg(feature = "observability")]
pub fn make_request_span<B>(request: &http::Request<B>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}
