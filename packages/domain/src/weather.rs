//! # 天気予報と傘の要否判定
//!
//! 天気予報 API のレスポンスから今日の時間帯別降水確率を取り出し、
//! 最大値としきい値を比較して「傘を持って行くべきか」のメッセージを組み立てる。
//!
//! ```text
//! Forecast ─(today)→ RainChanceForecast ─(数値化・最大値)→ UmbrellaAdvisory ─→ メッセージ
//! ```
//!
//! ## 寛容なパース
//!
//! 降水確率は `"10%"` や `"--%"` のような文字列で届く。先頭の整数部分だけを読み、
//! 読めない値は 0 % として扱う。パースエラーで判定全体を失敗させない。

use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::DomainError;

/// 傘が必要と判断する降水確率のしきい値（%）
pub const RAIN_PROBABILITY_THRESHOLD: u32 = 20;

/// 傘が必要なときのメッセージ先頭マーカー
pub const UMBRELLA_NEEDED_MARKER: &str = "☔️";

/// 傘が不要なときのメッセージ先頭マーカー
pub const UMBRELLA_NOT_NEEDED_MARKER: &str = "✅";

// =========================================================================
// 天気予報 API スキーマ
// =========================================================================

/// 天気予報 API のレスポンス
///
/// 必要なフィールドのみを定義し、それ以外は無視する。
/// 判定に使うのは今日の予報だけなので、明日以降の形が崩れていても失敗させない。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Forecast {
    /// 日別予報（先頭が今日）
    #[serde(deserialize_with = "lenient_days")]
    pub forecasts: Vec<DailyForecast>,
}

/// 日別予報
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    /// 欠落・オブジェクト以外は `None`
    #[serde(default, deserialize_with = "lenient_chance_of_rain")]
    pub chance_of_rain: Option<ChanceOfRain>,
}

/// 日別予報の配列を寛容にデシリアライズする
///
/// 要素の数は保ち、読めない要素は空の [`DailyForecast`] にする。
fn lenient_days<'de, D>(deserializer: D) -> Result<Vec<DailyForecast>, D::Error>
where
    D: Deserializer<'de>,
{
    let days = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(days
        .into_iter()
        .map(|day| DailyForecast::deserialize(day).unwrap_or_default())
        .collect())
}

fn lenient_chance_of_rain<'de, D>(deserializer: D) -> Result<Option<ChanceOfRain>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Object(_) => ChanceOfRain::deserialize(value).ok(),
        _ => None,
    })
}

/// 6 時間ごとの降水確率（生の値）
///
/// 各値は文字列・数値・`null`・欠落のいずれでも受け付け、
/// 文字列以外は `None`（= 読めない値）として保持する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChanceOfRain {
    #[serde(rename = "T00_06", default, deserialize_with = "lenient_slot")]
    pub t00_06: Option<String>,
    #[serde(rename = "T06_12", default, deserialize_with = "lenient_slot")]
    pub t06_12: Option<String>,
    #[serde(rename = "T12_18", default, deserialize_with = "lenient_slot")]
    pub t12_18: Option<String>,
    #[serde(rename = "T18_24", default, deserialize_with = "lenient_slot")]
    pub t18_24: Option<String>,
}

/// 降水確率の 1 枠を寛容にデシリアライズする
fn lenient_slot<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

// =========================================================================
// RainChanceForecast（今日の時間帯別降水確率）
// =========================================================================

/// 今日の時間帯別降水確率
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RainChanceForecast {
    /// 0-6 時
    pub morning: String,
    /// 6-12 時
    pub noon:    String,
    /// 12-18 時
    pub evening: String,
    /// 18-24 時
    pub night:   String,
}

impl RainChanceForecast {
    pub fn new(
        morning: impl Into<String>,
        noon: impl Into<String>,
        evening: impl Into<String>,
        night: impl Into<String>,
    ) -> Self {
        Self {
            morning: morning.into(),
            noon:    noon.into(),
            evening: evening.into(),
            night:   night.into(),
        }
    }

    /// 予報の先頭（今日）から 4 枠を取り出す
    ///
    /// # エラー
    ///
    /// `forecasts` が空、または今日の `chanceOfRain` が無い場合は
    /// `DomainError::Validation` を返す。
    pub fn from_forecast(forecast: &Forecast) -> Result<Self, DomainError> {
        let today = forecast.forecasts.first().ok_or_else(|| {
            DomainError::Validation("天気予報に今日の予報が含まれていません".to_string())
        })?;
        let slots = today.chance_of_rain.as_ref().ok_or_else(|| {
            DomainError::Validation("今日の予報に降水確率が含まれていません".to_string())
        })?;

        Ok(Self::new(
            slots.t00_06.clone().unwrap_or_default(),
            slots.t06_12.clone().unwrap_or_default(),
            slots.t12_18.clone().unwrap_or_default(),
            slots.t18_24.clone().unwrap_or_default(),
        ))
    }

    /// 4 枠を数値（%）に変換する
    ///
    /// 読めない値は 0 になる。
    pub fn to_numeric_chances(&self) -> [u32; 4] {
        [
            parse_chance(&self.morning),
            parse_chance(&self.noon),
            parse_chance(&self.evening),
            parse_chance(&self.night),
        ]
    }

    /// 4 枠のうち最大の降水確率
    pub fn max_chance(&self) -> u32 {
        self.to_numeric_chances().into_iter().max().unwrap_or(0)
    }
}

/// 降水確率の文字列を数値に変換する
///
/// 先頭の空白を読み飛ばし、続く 10 進数字だけを読む（`"30%"` → 30）。
/// 数字が無い・負号で始まる場合は 0。`u32` に収まらない場合は `u32::MAX` に丸める。
fn parse_chance(raw: &str) -> u32 {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());

    if digits_end == 0 {
        return 0;
    }
    unsigned[..digits_end].parse().unwrap_or(u32::MAX)
}

/// 傘が必要かどうか（しきい値以上で必要）
pub fn needs_umbrella(max_chance: u32, threshold: u32) -> bool {
    max_chance >= threshold
}

// =========================================================================
// UmbrellaAdvisory（傘の要否判定結果）
// =========================================================================

/// 傘の要否判定結果
///
/// [`Display`](fmt::Display) で Discord に返すメッセージを生成する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UmbrellaAdvisory {
    max_chance:      u32,
    umbrella_needed: bool,
}

impl UmbrellaAdvisory {
    /// 今日の降水確率から判定する
    pub fn evaluate(rain_chance: &RainChanceForecast) -> Self {
        let max_chance = rain_chance.max_chance();
        Self {
            max_chance,
            umbrella_needed: needs_umbrella(max_chance, RAIN_PROBABILITY_THRESHOLD),
        }
    }

    pub fn max_chance(&self) -> u32 {
        self.max_chance
    }

    pub fn umbrella_needed(&self) -> bool {
        self.umbrella_needed
    }

    /// Discord に返すメッセージ
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for UmbrellaAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.umbrella_needed {
            write!(f, "{UMBRELLA_NEEDED_MARKER} 傘を持って行った方が良さそう！")?;
        } else {
            write!(f, "{UMBRELLA_NOT_NEEDED_MARKER} 傘を持って行かなくて良さそう！")?;
        }
        write!(f, "\n- 本日の最高降水確率: {}%", self.max_chance)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn forecast_json(slots: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "publicTime": "2024-12-29T11:00:00+09:00",
            "forecasts": [
                { "date": "2024-12-29", "chanceOfRain": slots },
                { "date": "2024-12-30", "chanceOfRain": {
                    "T00_06": "90%", "T06_12": "90%", "T12_18": "90%", "T18_24": "90%"
                } }
            ]
        })
    }

    // ===== parse_chance =====

    #[rstest]
    #[case("10", 10)]
    #[case("10%", 10)]
    #[case("--", 0)]
    #[case("--%", 0)]
    #[case("", 0)]
    #[case("  35%", 35)]
    #[case("+5", 5)]
    #[case("-5", 0)]
    #[case("abc", 0)]
    #[case("99999999999", u32::MAX)]
    #[case("99999999999%", u32::MAX)]
    fn test_parse_chanceは先頭の整数のみ読む(#[case] raw: &str, #[case] expected: u32) {
        assert_eq!(parse_chance(raw), expected);
    }

    // ===== RainChanceForecast =====

    #[rstest]
    fn test_数値化で読めない値は0になる() {
        let sut = RainChanceForecast::new("10", "--", "30", "5");

        assert_eq!(sut.to_numeric_chances(), [10, 0, 30, 5]);
        assert_eq!(sut.max_chance(), 30);
    }

    #[rstest]
    fn test_全て読めない場合の最大値は0() {
        let sut = RainChanceForecast::new("--%", "--%", "", "--");

        assert_eq!(sut.max_chance(), 0);
    }

    #[rstest]
    fn test_from_forecastは先頭の予報を使う() {
        let forecast: Forecast = serde_json::from_value(forecast_json(serde_json::json!({
            "T00_06": "0%", "T06_12": "10%", "T12_18": "20%", "T18_24": "--%"
        })))
        .unwrap();

        let sut = RainChanceForecast::from_forecast(&forecast).unwrap();

        assert_eq!(sut, RainChanceForecast::new("0%", "10%", "20%", "--%"));
    }

    #[rstest]
    fn test_from_forecastで予報が空ならバリデーションエラー() {
        let forecast = Forecast { forecasts: vec![] };

        let result = RainChanceForecast::from_forecast(&forecast);

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[rstest]
    fn test_欠落やnullや数値の枠も寛容に受け付ける() {
        let forecast: Forecast = serde_json::from_value(forecast_json(serde_json::json!({
            "T00_06": null, "T06_12": 40, "T12_18": "20%"
        })))
        .unwrap();

        let sut = RainChanceForecast::from_forecast(&forecast).unwrap();

        assert_eq!(sut, RainChanceForecast::new("", "40", "20%", ""));
        assert_eq!(sut.to_numeric_chances(), [0, 40, 20, 0]);
    }

    #[rstest]
    #[case::欠落(serde_json::json!({ "date": "2024-12-29" }))]
    #[case::null(serde_json::json!({ "date": "2024-12-29", "chanceOfRain": null }))]
    #[case::文字列(serde_json::json!({ "date": "2024-12-29", "chanceOfRain": "--%" }))]
    fn test_今日のchance_of_rainが無ければバリデーションエラー(#[case] today: serde_json::Value) {
        let forecast: Forecast =
            serde_json::from_value(serde_json::json!({ "forecasts": [today] })).unwrap();

        let result = RainChanceForecast::from_forecast(&forecast);

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[rstest]
    #[case::chance_of_rain欠落(serde_json::json!({ "date": "2024-12-30" }))]
    #[case::chance_of_rainが配列(serde_json::json!({ "date": "2024-12-30", "chanceOfRain": [] }))]
    #[case::オブジェクトでない(serde_json::json!(null))]
    fn test_明日以降の予報が崩れていても今日の予報を読める(#[case] tomorrow: serde_json::Value) {
        // Given
        let json = serde_json::json!({
            "forecasts": [
                { "date": "2024-12-29", "chanceOfRain": {
                    "T00_06": "30%", "T06_12": "0%", "T12_18": "0%", "T18_24": "0%"
                } },
                tomorrow
            ]
        });

        // When
        let forecast: Forecast = serde_json::from_value(json).unwrap();
        let sut = RainChanceForecast::from_forecast(&forecast).unwrap();

        // Then
        assert_eq!(forecast.forecasts.len(), 2);
        assert_eq!(forecast.forecasts[1].chance_of_rain, None);
        assert_eq!(sut.max_chance(), 30);
    }

    #[rstest]
    fn test_forecastsが無いレスポンスはデシリアライズに失敗する() {
        let result = serde_json::from_value::<Forecast>(serde_json::json!({
            "error": "city not found"
        }));

        assert!(result.is_err());
    }

    // ===== needs_umbrella =====

    #[rstest]
    #[case(0, false)]
    #[case(19, false)]
    #[case(20, true)]
    #[case(30, true)]
    #[case(100, true)]
    fn test_needs_umbrellaはしきい値を含む(#[case] max_chance: u32, #[case] expected: bool) {
        assert_eq!(
            needs_umbrella(max_chance, RAIN_PROBABILITY_THRESHOLD),
            expected
        );
    }

    // ===== UmbrellaAdvisory =====

    #[rstest]
    fn test_降水確率30なら傘が必要なメッセージ() {
        let sut = UmbrellaAdvisory::evaluate(&RainChanceForecast::new("10", "--", "30", "5"));

        assert!(sut.umbrella_needed());
        assert_eq!(sut.max_chance(), 30);
        assert_eq!(
            sut.message(),
            "☔️ 傘を持って行った方が良さそう！\n- 本日の最高降水確率: 30%"
        );
    }

    #[rstest]
    fn test_降水確率0なら傘が不要なメッセージ() {
        let sut = UmbrellaAdvisory::evaluate(&RainChanceForecast::new("0", "0", "0", "0"));

        assert!(!sut.umbrella_needed());
        let message = sut.message();
        assert!(message.starts_with(UMBRELLA_NOT_NEEDED_MARKER));
        assert!(message.contains("0%"));
    }

    #[rstest]
    fn test_u32に収まらない降水確率は傘が必要() {
        let sut = UmbrellaAdvisory::evaluate(&RainChanceForecast::new("99999999999", "0", "0", "0"));

        assert!(sut.umbrella_needed());
        assert_eq!(sut.max_chance(), u32::MAX);
    }

    #[rstest]
    fn test_しきい値ちょうどは傘が必要() {
        let sut = UmbrellaAdvisory::evaluate(&RainChanceForecast::new("20%", "0%", "0%", "0%"));

        assert!(sut.message().starts_with(UMBRELLA_NEEDED_MARKER));
    }
}
