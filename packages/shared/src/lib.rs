//! # Kasa 共有ユーティリティ
//!
//! ワークスペース全体で使用される、ビジネスロジックを含まない共通部品。
//!
//! ## モジュール構成
//!
//! - [`error_response`] - RFC 9457 Problem Details 形式のエラーレスポンス
//! - [`health`] - ヘルスチェックレスポンス
//! - [`observability`] - トレーシング初期化・リクエストスパン
//! - `canonical_log` - リクエスト完了サマリログ（`observability` feature）

#[cfg(feature = "observability")]
pub mod canonical_log;
pub mod error_response;
pub mod health;
pub mod observability;

pub use error_response::ErrorResponse;
pub use health::HealthResponse;
