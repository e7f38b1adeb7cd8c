pub mod cipher;
pub mod key;

pub use cipher::{CipherError, open, seal};
pub use key::{AttackKey, KeyError};
