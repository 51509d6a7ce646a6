//! # Interactions 設定
//!
//! 環境変数から Interactions サーバーの設定を読み込む。

use std::env;

use thiserror::Error;

/// デフォルトのバインドアドレス
const DEFAULT_HOST: &str = "0.0.0.0";

/// デフォルトのポート番号
const DEFAULT_PORT: u16 = 3000;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 必須の環境変数が無い（空文字を含む）
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    /// 値の形式が不正
    #[error("{name} の値が不正です: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Interactions サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionsConfig {
    /// バインドアドレス
    pub host:               String,
    /// ポート番号
    pub port:               u16,
    /// Discord アプリケーションの公開鍵（16 進）
    pub discord_public_key: String,
}

impl InteractionsConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// `lookup` は変数名を受け取り、値があれば `Some` を返す。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("INTERACTIONS_HOST")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("INTERACTIONS_PORT").filter(|v| !v.is_empty()) {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "INTERACTIONS_PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let discord_public_key = lookup("DISCORD_PUBLIC_KEY")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("DISCORD_PUBLIC_KEY"))?;

        Ok(Self {
            host,
            port,
            discord_public_key,
        })
    }
}
