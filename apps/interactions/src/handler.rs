//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## ハンドラ一覧
//!
//! - `health`: ヘルスチェック
//! - `interaction`: Discord Interaction の受け口

pub mod health;
pub mod interaction;

pub use health::health_check;
pub use interaction::{InteractionState, handle_interaction};
