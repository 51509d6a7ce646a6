//! # Discord Interaction
//!
//! Interactions Endpoint に届くリクエストの種別判定と、返却するレスポンスを定義する。
//!
//! ## 種別とレスポンスの対応
//!
//! | リクエスト `type` | 種別 | レスポンス `type` |
//! |------------------|------|-------------------|
//! | `1` | [`InteractionType::Ping`] | `1`（Pong） |
//! | `2` | [`InteractionType::ApplicationCommand`] | `4`（ChannelMessageWithSource） |
//! | その他・欠落 | [`InteractionType::Unsupported`] | なし（400 で拒否） |
//!
//! 値は Discord API v10 の `InteractionType` / `InteractionResponseType` に従う。

use serde::{Serialize, Serializer};
use strum::IntoStaticStr;

/// Interaction の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum InteractionType {
    /// 疎通確認（Discord がエンドポイント登録時・定期的に送る）
    Ping,
    /// スラッシュコマンドの実行
    ApplicationCommand,
    /// 上記以外（本エンドポイントでは扱わない）
    Unsupported,
}

impl InteractionType {
    /// Discord 側の数値コードから種別を得る
    pub fn from_code(code: u64) -> Self {
        match code {
            1 => Self::Ping,
            2 => Self::ApplicationCommand,
            _ => Self::Unsupported,
        }
    }

    /// リクエストボディの `type` フィールドから種別を判定する
    ///
    /// ボディが JSON でない、`type` が欠落している、数値でない場合は
    /// [`Unsupported`](InteractionType::Unsupported) とする。
    /// 署名検証後の生バイト列をそのまま受け取る。
    ///
    /// ```
    /// use kasa_domain::interaction::InteractionType;
    ///
    /// assert_eq!(InteractionType::classify(br#"{"type":1}"#), InteractionType::Ping);
    /// assert_eq!(InteractionType::classify(b"not json"), InteractionType::Unsupported);
    /// ```
    pub fn classify(body: &[u8]) -> Self {
        serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|value| value.get("type").and_then(serde_json::Value::as_u64))
            .map_or(Self::Unsupported, Self::from_code)
    }

    /// ログ出力用の名前
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Interaction レスポンスの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionResponseType {
    /// Ping への応答
    Pong,
    /// メッセージ付き応答
    ChannelMessageWithSource,
}

impl InteractionResponseType {
    /// Discord 側の数値コード
    pub fn code(self) -> u8 {
        match self {
            Self::Pong => 1,
            Self::ChannelMessageWithSource => 4,
        }
    }
}

impl Serialize for InteractionResponseType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// メッセージ本文
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageData {
    pub content: String,
}

/// Interaction レスポンス
///
/// # 不変条件
///
/// - `Pong` は `data` を持たない
/// - `ChannelMessageWithSource` は必ず `data.content` を持つ
///
/// コンストラクタ経由でのみ生成できるため、種別と中身の組み合わせが崩れない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    response_type: InteractionResponseType,
    #[serde(skip_serializing_if = "Option::is_none")]
    data:          Option<MessageData>,
}

impl InteractionResponse {
    /// Ping に対する Pong レスポンス（`{"type":1}`）
    pub fn pong() -> Self {
        Self {
            response_type: InteractionResponseType::Pong,
            data:          None,
        }
    }

    /// 本文付きメッセージレスポンス（`{"type":4,"data":{"content":...}}`）
    pub fn channel_message(content: impl Into<String>) -> Self {
        Self {
            response_type: InteractionResponseType::ChannelMessageWithSource,
            data:          Some(MessageData {
                content: content.into(),
            }),
        }
    }

    pub fn response_type(&self) -> InteractionResponseType {
        self.response_type
    }

    /// メッセージ本文（Pong の場合は `None`）
    pub fn content(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(br#"{"type":1}"#.as_slice(), InteractionType::Ping)]
    #[case(br#"{"type":1,"data":{"name":"kasa"},"token":"x"}"#.as_slice(), InteractionType::Ping)]
    #[case(br#"{"type":2,"data":{"name":"kasa"}}"#.as_slice(), InteractionType::ApplicationCommand)]
    #[case(br#"{"type":3}"#.as_slice(), InteractionType::Unsupported)]
    #[case(br#"{"type":0}"#.as_slice(), InteractionType::Unsupported)]
    #[case(br#"{"type":"1"}"#.as_slice(), InteractionType::Unsupported)]
    #[case(br#"{"type":-1}"#.as_slice(), InteractionType::Unsupported)]
    #[case(br#"{"id":"123"}"#.as_slice(), InteractionType::Unsupported)]
    #[case(br#"[1]"#.as_slice(), InteractionType::Unsupported)]
    #[case(b"".as_slice(), InteractionType::Unsupported)]
    #[case(b"{broken".as_slice(), InteractionType::Unsupported)]
    fn test_classifyでtypeフィールドから種別を判定する(
        #[case] body: &[u8],
        #[case] expected: InteractionType,
    ) {
        assert_eq!(InteractionType::classify(body), expected);
    }

    #[rstest]
    fn test_as_strはsnake_caseの名前を返す() {
        assert_eq!(InteractionType::Ping.as_str(), "ping");
        assert_eq!(
            InteractionType::ApplicationCommand.as_str(),
            "application_command"
        );
        assert_eq!(InteractionType::Unsupported.as_str(), "unsupported");
    }

    #[rstest]
    fn test_pongはtype1のみのjsonになる() {
        let json = serde_json::to_value(InteractionResponse::pong()).unwrap();

        assert_eq!(json, serde_json::json!({ "type": 1 }));
    }

    #[rstest]
    fn test_pongは何度生成しても同一() {
        let first = serde_json::to_string(&InteractionResponse::pong()).unwrap();
        let second = serde_json::to_string(&InteractionResponse::pong()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, r#"{"type":1}"#);
    }

    #[rstest]
    fn test_channel_messageはtype4とcontentを持つ() {
        let response = InteractionResponse::channel_message("こんにちは");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "type": 4, "data": { "content": "こんにちは" } })
        );
        assert_eq!(
            response.response_type(),
            InteractionResponseType::ChannelMessageWithSource
        );
        assert_eq!(response.content(), Some("こんにちは"));
    }

    #[rstest]
    fn test_pongはcontentを持たない() {
        let response = InteractionResponse::pong();

        assert_eq!(response.response_type(), InteractionResponseType::Pong);
        assert_eq!(response.content(), None);
    }
}
