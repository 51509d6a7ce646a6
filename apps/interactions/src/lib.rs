//! # Kasa Interactions ライブラリ
//!
//! Discord の Interactions Endpoint として動作する API サーバーのコアモジュール。
//!
//! ## モジュール構成
//!
//! - `app`: ルーター構築（ミドルウェア込み）
//! - `config`: 環境変数からの設定読み込み
//! - `error`: エラーと HTTP レスポンスへの変換
//! - `handler`: HTTP ハンドラ
//! - `usecase`: 傘の要否メッセージ生成

pub mod app;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
