//! # Interaction 署名検証
//!
//! Discord の Interactions Endpoint に要求される Ed25519 署名検証を提供する。
//!
//! 検証対象は `X-Signature-Timestamp` の値と生のリクエストボディを連結したバイト列で、
//! 公開鍵は Discord Developer Portal の「PUBLIC KEY」（16 進 64 文字）。
//!
//! → [Discord: Setting Up an Endpoint](https://discord.com/developers/docs/interactions/overview#setting-up-an-endpoint)

use ed25519_dalek::{Signature, VerifyingKey};
use kasa_domain::signature::{SignatureEnvelope, SignatureVerifyResult};

use crate::InfraError;

/// 署名検証を担当するトレイト
pub trait SignatureVerifier: Send + Sync {
    /// 署名を検証する
    ///
    /// 署名が 16 進でない・長さが違うなどの形式不正も
    /// [`SignatureVerifyResult::Invalid`] として返し、エラーにはしない。
    fn verify(&self, envelope: &SignatureEnvelope<'_>) -> SignatureVerifyResult;
}

/// Ed25519 による署名検証の実装
#[derive(Debug, Clone)]
pub struct Ed25519SignatureVerifier {
    public_key: VerifyingKey,
}

impl Ed25519SignatureVerifier {
    pub fn new(public_key: VerifyingKey) -> Self {
        Self { public_key }
    }

    /// 16 進文字列の公開鍵から作成する
    ///
    /// # Errors
    ///
    /// - 16 進として読めない場合
    /// - 32 バイトでない場合
    /// - Ed25519 の公開鍵として不正な点の場合
    pub fn from_hex(public_key_hex: &str) -> Result<Self, InfraError> {
        let bytes = hex::decode(public_key_hex.trim())
            .map_err(|e| InfraError::invalid_public_key(format!("16 進として読めません: {e}")))?;

        let bytes: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
            InfraError::invalid_public_key(format!(
                "32 バイトである必要があります（実際: {} バイト）",
                bytes.len()
            ))
        })?;

        let public_key = VerifyingKey::from_bytes(&bytes)
            .map_err(|e| InfraError::invalid_public_key(e.to_string()))?;

        Ok(Self::new(public_key))
    }
}

impl SignatureVerifier for Ed25519SignatureVerifier {
    fn verify(&self, envelope: &SignatureEnvelope<'_>) -> SignatureVerifyResult {
        let Ok(signature_bytes) = hex::decode(envelope.signature) else {
            tracing::debug!("署名が 16 進として読めません");
            return SignatureVerifyResult::Invalid;
        };
        let Ok(signature) = Signature::from_slice(&signature_bytes) else {
            tracing::debug!(len = signature_bytes.len(), "署名の長さが不正です");
            return SignatureVerifyResult::Invalid;
        };

        self.public_key
            .verify_strict(&envelope.signed_message(), &signature)
            .is_ok()
            .into()
    }
}
