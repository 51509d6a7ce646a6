//! # ユースケース層
//!
//! Interactions のビジネスロジックを実装する。
//!
//! ハンドラはトレイト経由で呼び出し、テストではスタブに差し替える。

pub mod advisory;

pub use advisory::{AdvisoryError, UmbrellaAdvisoryUseCaseImpl};
use async_trait::async_trait;

/// 傘の要否メッセージ生成ユースケーストレイト
#[async_trait]
pub trait AdvisoryUseCase: Send + Sync {
    /// Discord に返すメッセージ本文を生成する
    ///
    /// ## 戻り値
    ///
    /// - `Ok(String)`: メッセージ本文
    /// - `Err(AdvisoryError)`: 予報の取得や解釈に失敗した
    async fn build_advisory(&self) -> Result<String, AdvisoryError>;
}

/// UmbrellaAdvisoryUseCaseImpl に AdvisoryUseCase トレイトを実装
#[async_trait]
impl AdvisoryUseCase for UmbrellaAdvisoryUseCaseImpl {
    async fn build_advisory(&self) -> Result<String, AdvisoryError> {
        self.build_advisory().await
    }
}
