//! # 傘の要否メッセージ生成ユースケース
//!
//! 天気予報を取得し、今日の最高降水確率から傘の要否メッセージを組み立てる。
//!
//! ```text
//! fetch_forecast → RainChanceForecast::from_forecast → UmbrellaAdvisory::evaluate → message
//! ```

use std::sync::Arc;

use kasa_domain::{
    DomainError,
    weather::{RainChanceForecast, UmbrellaAdvisory},
};
use kasa_infra::{InfraError, WeatherForecastClient};
use thiserror::Error;

/// メッセージ生成の失敗
///
/// 失敗した段階と元エラーを保持する。呼び出し元には段階を問わず
/// 内部エラーとして返し、詳細はログにのみ出力する。
#[derive(Debug, Error)]
pub enum AdvisoryError {
    /// 天気予報の取得に失敗
    #[error("天気予報の取得に失敗しました: {0}")]
    Fetch(#[source] InfraError),

    /// 予報から今日の降水確率を取り出せない
    #[error("今日の降水確率を取り出せませんでした: {0}")]
    Extract(#[source] DomainError),
}

impl AdvisoryError {
    /// 失敗した段階（ログ用）
    pub fn stage(&self) -> &'static str {
        match self {
            AdvisoryError::Fetch(_) => "fetch",
            AdvisoryError::Extract(_) => "extract",
        }
    }
}

/// 傘の要否メッセージ生成ユースケースの実装
pub struct UmbrellaAdvisoryUseCaseImpl {
    weather_client: Arc<dyn WeatherForecastClient>,
}

impl UmbrellaAdvisoryUseCaseImpl {
    pub fn new(weather_client: Arc<dyn WeatherForecastClient>) -> Self {
        Self { weather_client }
    }

    /// メッセージ本文を生成する
    pub async fn build_advisory(&self) -> Result<String, AdvisoryError> {
        let forecast = self
            .weather_client
            .fetch_forecast()
            .await
            .map_err(AdvisoryError::Fetch)?;

        let rain_chance =
            RainChanceForecast::from_forecast(&forecast).map_err(AdvisoryError::Extract)?;
        let advisory = UmbrellaAdvisory::evaluate(&rain_chance);

        tracing::info!(
            chances = ?rain_chance.to_numeric_chances(),
            max_chance = advisory.max_chance(),
            umbrella_needed = advisory.umbrella_needed(),
            "傘の要否を判定しました"
        );

        Ok(advisory.message())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use kasa_domain::weather::{
        ChanceOfRain,
        DailyForecast,
        Forecast,
        UMBRELLA_NEEDED_MARKER,
        UMBRELLA_NOT_NEEDED_MARKER,
    };
    use kasa_infra::InfraErrorKind;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    // テスト用スタブ
    enum StubWeatherClient {
        Success(Forecast),
        Unavailable,
    }

    #[async_trait]
    impl WeatherForecastClient for StubWeatherClient {
        async fn fetch_forecast(&self) -> Result<Forecast, InfraError> {
            match self {
                StubWeatherClient::Success(forecast) => Ok(forecast.clone()),
                StubWeatherClient::Unavailable => {
                    Err(InfraError::unexpected_status(503, "maintenance"))
                }
            }
        }
    }

    fn today(slots: [&str; 4]) -> Forecast {
        let [t00_06, t06_12, t12_18, t18_24] = slots.map(|s| Some(s.to_string()));
        Forecast {
            forecasts: vec![DailyForecast {
                chance_of_rain: Some(ChanceOfRain {
                    t00_06,
                    t06_12,
                    t12_18,
                    t18_24,
                }),
            }],
        }
    }

    fn sut(client: StubWeatherClient) -> UmbrellaAdvisoryUseCaseImpl {
        UmbrellaAdvisoryUseCaseImpl::new(Arc::new(client))
    }

    #[rstest]
    #[tokio::test]
    async fn test_降水確率30なら傘が必要なメッセージ() {
        let sut = sut(StubWeatherClient::Success(today(["10%", "--%", "30%", "5%"])));

        let message = sut.build_advisory().await.unwrap();

        assert_eq!(
            message,
            "☔️ 傘を持って行った方が良さそう！\n- 本日の最高降水確率: 30%"
        );
    }

    #[rstest]
    #[case::全て0(["0%", "0%", "0%", "0%"], 0)]
    #[case::全て不明(["--%", "--%", "--%", "--%"], 0)]
    #[case::しきい値未満(["19%", "0%", "10%", "--%"], 19)]
    #[tokio::test]
    async fn test_しきい値未満なら傘が不要なメッセージ(
        #[case] slots: [&str; 4],
        #[case] max_chance: u32,
    ) {
        let sut = sut(StubWeatherClient::Success(today(slots)));

        let message = sut.build_advisory().await.unwrap();

        assert!(message.starts_with(UMBRELLA_NOT_NEEDED_MARKER));
        assert!(message.ends_with(&format!("本日の最高降水確率: {max_chance}%")));
    }

    #[rstest]
    #[tokio::test]
    async fn test_しきい値ちょうどなら傘が必要() {
        let sut = sut(StubWeatherClient::Success(today(["0%", "20%", "0%", "0%"])));

        let message = sut.build_advisory().await.unwrap();

        assert!(message.starts_with(UMBRELLA_NEEDED_MARKER));
    }

    #[rstest]
    #[tokio::test]
    async fn test_予報の取得に失敗するとfetchエラー() {
        let sut = sut(StubWeatherClient::Unavailable);

        let err = sut.build_advisory().await.unwrap_err();

        assert_eq!(err.stage(), "fetch");
        assert!(matches!(
            &err,
            AdvisoryError::Fetch(e) if matches!(e.kind(), InfraErrorKind::UnexpectedStatus { status: 503, .. })
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn test_予報が空ならextractエラー() {
        let sut = sut(StubWeatherClient::Success(Forecast { forecasts: vec![] }));

        let err = sut.build_advisory().await.unwrap_err();

        assert_eq!(err.stage(), "extract");
        assert!(matches!(err, AdvisoryError::Extract(DomainError::Validation(_))));
    }

    #[rstest]
    #[tokio::test]
    async fn test_今日の降水確率が無ければextractエラー() {
        let sut = sut(StubWeatherClient::Success(Forecast {
            forecasts: vec![DailyForecast::default(), today(["90%"; 4]).forecasts[0].clone()],
        }));

        let err = sut.build_advisory().await.unwrap_err();

        assert_eq!(err.stage(), "extract");
    }
}
