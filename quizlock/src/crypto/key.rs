use aes_gcm::Aes256Gcm;
use aes_gcm::aead::{KeyInit, OsRng};

use crate::common::constants::KEY_LEN;

/// Defines errors that can occur when decoding a persisted key.
//
// // 定义在解码持久化密钥时可能发生的错误。
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    /// The persisted key text is not valid hex.
    //
    // // 持久化的密钥文本不是有效的十六进制。
    #[error("Persisted key is not valid hex: {0}")]
    InvalidEncoding(#[from] hex::FromHexError),

    /// The decoded key has the wrong length.
    //
    // // 解码后的密钥长度错误。
    #[error("Persisted key has wrong length: expected {KEY_LEN} bytes, found {0}")]
    InvalidLength(usize),
}

/// The symmetric key guarding one encryption run.
///
/// Exactly one key is active at a time: generated when an attack starts and
/// erased from the persisted document when the matching release completes.
/// The persisted form is lowercase hex, 64 characters.
//
// // 守护一次加密运行的对称密钥。同一时刻至多存在一个活动密钥。
#[derive(Clone, PartialEq, Eq)]
pub struct AttackKey([u8; KEY_LEN]);

impl AttackKey {
    /// 使用操作系统随机源生成一个新的 AES-256 密钥。
    pub fn generate() -> Self {
        let key = Aes256Gcm::generate_key(OsRng);
        AttackKey(key.into())
    }

    /// Encodes the key into its persisted textual form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Decodes a key from its persisted textual form.
    pub fn from_hex(text: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(text)?;
        let len = bytes.len();
        let array: [u8; KEY_LEN] = bytes.try_into().map_err(|_| KeyError::InvalidLength(len))?;
        Ok(AttackKey(array))
    }

    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

// Keep raw key bytes out of log output.
impl std::fmt::Debug for AttackKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AttackKey(..)")
    }
}
