//! # Quizlock
//!
//! The file attack engine behind a gamified encryption demonstrator: a quiz
//! layer (not part of this crate) decides whether a configured set of user
//! folders gets bulk-encrypted or, if previously encrypted, restored.
//!
//! The crate owns the three pieces with real invariants:
//! - [`collect`] — eligible-file discovery under the target roots;
//! - [`crypto`] — the symmetric key and the authenticated file cipher;
//! - [`engine`] — key lifecycle, batch encrypt/decrypt, marker files and
//!   progress reporting.
//
// // 游戏化加密演示器背后的文件攻击引擎：测验层（不在本 crate 中）决定
// // 配置的用户文件夹是被批量加密，还是（若此前已加密）被恢复。

pub mod collect;
pub mod common;
pub mod crypto;
pub mod engine;
