//! # Kasa ドメイン層
//!
//! Discord Interaction の受付と「傘が必要か」の判定に関するドメインモデル。
//!
//! ## 依存関係の方向
//!
//! ```text
//! app → infra → domain
//! ```
//!
//! ドメイン層は HTTP・暗号ライブラリ・外部 API に依存しない。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメインエラー
//! - [`interaction`] - Interaction の種別判定とレスポンス
//! - [`signature`] - 署名検証の入力と結果
//! - [`weather`] - 天気予報スキーマ、降水確率、傘の要否メッセージ

pub mod error;
pub mod interaction;
pub mod signature;
pub mod weather;

pub use error::DomainError;
