use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};

use crate::common::constants::NONCE_LEN;
use crate::crypto::key::AttackKey;

/// Defines errors that can occur during file content transformation.
//
// // 定义在文件内容变换期间可能发生的错误。
#[derive(Debug, thiserror::Error)]
pub enum CipherError {
    /// The data is too short to even contain a nonce.
    //
    // // 数据太短，连 nonce 都容纳不下。
    #[error("Ciphertext is too short to contain a nonce ({NONCE_LEN} bytes)")]
    Truncated,

    /// GCM tag verification failed: wrong key or tampered ciphertext.
    /// The plaintext is never released in this case.
    //
    // // GCM 标签校验失败：密钥错误或密文被篡改。此时绝不输出明文。
    #[error("Authentication failed: wrong key or tampered ciphertext")]
    AuthenticationFailed,

    /// The AEAD backend refused to encrypt (payload beyond the GCM limit).
    //
    // // AEAD 后端拒绝加密（载荷超出 GCM 上限）。
    #[error("Encryption failed")]
    EncryptionFailed,
}

/// 加密一段文件内容。
///
/// 每次调用生成一个全新的随机 12 字节 nonce，输出布局为
/// `nonce || ciphertext+tag`，解密时从前缀恢复 nonce。
pub fn seal(key: &AttackKey, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
    let cipher = Aes256Gcm::new(key.as_bytes().into());
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|_| CipherError::EncryptionFailed)?;

    // output is nonce + ciphertext since we need the nonce when decrypting
    let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// 解密一段由 [`seal`] 产生的文件内容。
///
/// 任何篡改或错误密钥都会以 [`CipherError::AuthenticationFailed`] 报告，
/// 而不是静默产出垃圾数据。
pub fn open(key: &AttackKey, data: &[u8]) -> Result<Vec<u8>, CipherError> {
    if data.len() < NONCE_LEN {
        return Err(CipherError::Truncated);
    }
    let (nonce_bytes, ciphertext) = data.split_at(NONCE_LEN);

    let cipher = Aes256Gcm::new(key.as_bytes().into());
    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| CipherError::AuthenticationFailed)
}
