//! # リクエスト署名
//!
//! Discord は Interaction リクエストごとに Ed25519 署名を付与する。
//! 署名対象は `タイムスタンプ + 生のリクエストボディ` のバイト列。
//!
//! ボディは受信したバイト列のまま扱う。JSON として再シリアライズすると
//! キー順や空白が変わり、署名が一致しなくなる。
//!
//! 検証アルゴリズム自体はインフラ層（`kasa_infra::signature`）が担う。

/// 署名ヘッダー名（16 進文字列）
pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";

/// タイムスタンプヘッダー名
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// 署名検証の入力一式
///
/// 1 リクエストにつき 1 度だけ使われ、保存されない。
#[derive(Debug, Clone, Copy)]
pub struct SignatureEnvelope<'a> {
    /// `X-Signature-Ed25519` の値（16 進）
    pub signature: &'a str,
    /// `X-Signature-Timestamp` の値
    pub timestamp: &'a str,
    /// 生のリクエストボディ
    pub body:      &'a [u8],
}

impl<'a> SignatureEnvelope<'a> {
    pub fn new(signature: &'a str, timestamp: &'a str, body: &'a [u8]) -> Self {
        Self {
            signature,
            timestamp,
            body,
        }
    }

    /// 署名対象のメッセージ（タイムスタンプ + ボディ）を組み立てる
    ///
    /// ```
    /// use kasa_domain::signature::SignatureEnvelope;
    ///
    /// let envelope = SignatureEnvelope::new("00", "1700000000", b"{}");
    /// assert_eq!(envelope.signed_message(), b"1700000000{}".to_vec());
    /// ```
    pub fn signed_message(&self) -> Vec<u8> {
        let mut message = Vec::with_capacity(self.timestamp.len() + self.body.len());
        message.extend_from_slice(self.timestamp.as_bytes());
        message.extend_from_slice(self.body);
        message
    }
}

/// 署名検証結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureVerifyResult {
    /// 署名が正しい
    Valid,
    /// 署名が不正（形式不正を含む）
    Invalid,
}

impl SignatureVerifyResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl From<bool> for SignatureVerifyResult {
    fn from(valid: bool) -> Self {
        if valid { Self::Valid } else { Self::Invalid }
    }
}
