//! # ドメイン層エラー定義

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 外部から受け取ったデータがドメインの前提を満たさない場合に使用する。
    /// 例: 天気予報の `forecasts` が空
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}
