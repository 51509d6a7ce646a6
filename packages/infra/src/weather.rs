//! # 天気予報 API クライアント
//!
//! 天気予報 API（weather.tsukumijima.net）から東京の予報を取得する。
//!
//! ## エンドポイント
//!
//! - `GET /api/forecast/city/130010` - 東京の 3 日分の予報
//!
//! 失敗（接続エラー・2xx 以外・スキーマ不一致）はログに記録したうえで
//! [`InfraError`] として返す。

use async_trait::async_trait;
use kasa_domain::weather::Forecast;

use crate::InfraError;

/// 天気予報 API のエンドポイント（東京）
pub const WEATHER_API_ENDPOINT: &str = "https://weather.tsukumijima.net/api/forecast/city/130010";

/// 天気予報クライアントトレイト
///
/// テスト時にスタブを使用できるようトレイトで定義。
#[async_trait]
pub trait WeatherForecastClient: Send + Sync {
    /// 今日を含む予報を取得する
    async fn fetch_forecast(&self) -> Result<Forecast, InfraError>;
}

/// weather.tsukumijima.net を使う天気予報クライアント
#[derive(Debug, Clone)]
pub struct TsukumijimaWeatherClient {
    endpoint: String,
    client:   reqwest::Client,
}

impl TsukumijimaWeatherClient {
    /// 既定のエンドポイントを使うクライアントを作成する
    pub fn new() -> Self {
        Self::with_endpoint(WEATHER_API_ENDPOINT)
    }

    /// エンドポイントを指定してクライアントを作成する
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client:   reqwest::Client::new(),
        }
    }

    async fn request_forecast(&self) -> Result<Forecast, InfraError> {
        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InfraError::unexpected_status(status.as_u16(), body));
        }

        let bytes = response.bytes().await?;
        let forecast = serde_json::from_slice::<Forecast>(&bytes)?;
        Ok(forecast)
    }
}

impl Default for TsukumijimaWeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherForecastClient for TsukumijimaWeatherClient {
    #[tracing::instrument(skip_all, level = "debug", fields(endpoint = %self.endpoint))]
    async fn fetch_forecast(&self) -> Result<Forecast, InfraError> {
        self.request_forecast().await.inspect_err(|e| {
            tracing::error!(
                error.message = %e,
                span_trace = %e.span_trace(),
                "天気予報の取得に失敗しました"
            );
        })
    }
}
