// --- 标记文件与保留名称 ---

/// The marker file written into each target root after encryption.
/// Its presence is the on-disk signal that the root's files are ciphertext.
pub const MARKER_FILE_NAME: &str = "readme.txt";

/// Legacy key file name from the old key-on-disk layout. Never written by
/// this engine, but still reserved so stale deployments are left alone.
pub const KEY_FILE_NAME: &str = "thekey.key";

/// File names the collector must never include in a batch.
pub const RESERVED_FILE_NAMES: [&str; 2] = [MARKER_FILE_NAME, KEY_FILE_NAME];

// --- 批处理限制 ---

/// Default per-file size ceiling: 100 MiB.
pub const DEFAULT_SIZE_CEILING: u64 = 100 * 1024 * 1024;

// --- 密码学参数 ---

/// Symmetric key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// AES-GCM nonce length in bytes, stored as the ciphertext prefix.
pub const NONCE_LEN: usize = 12;
