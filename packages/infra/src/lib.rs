//! # Kasa インフラ層
//!
//! 外部システムとの接続・暗号処理を担当する。
//!
//! ## 責務
//!
//! - **署名検証**: Discord Interaction の Ed25519 署名検証
//! - **外部 API クライアント**: 天気予報 API からの予報取得
//!
//! ## 依存関係
//!
//! ```text
//! app → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`error`] - インフラ層エラー定義
//! - [`signature`] - 署名検証
//! - [`weather`] - 天気予報 API クライアント

pub mod error;
pub mod signature;
pub mod weather;

pub use error::{InfraError, InfraErrorKind};
pub use signature::{Ed25519SignatureVerifier, SignatureVerifier};
pub use weather::{TsukumijimaWeatherClient, WEATHER_API_ENDPOINT, WeatherForecastClient};
