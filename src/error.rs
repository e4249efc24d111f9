//! Defines the custom error type for the `cipher-kit` crate.
//!
//! ---
//!
//! 定义 `cipher-kit` 的统一错误类型。所有破解函数都是基于统计的启发式方法，
//! 它们可能在不报错的情况下返回错误的密钥；这里的错误只描述“无法给出结果”的情形。

use thiserror::Error;

/// The main error type for the `cipher-kit` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// 代换密钥不是字母表的排列，或维吉尼亚密钥不含任何字母
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// 字母表或频率排名不是 26 个互不相同的小写字母
    #[error("invalid alphabet: {0}")]
    InvalidAlphabet(String),

    /// 在 `TieBreak::Reject` 策略下，多个字母并列出现次数最多
    #[error("ambiguous frequency tie between {letters:?} (count {count})")]
    AmbiguousFrequencyTie { letters: Vec<char>, count: usize },

    /// 待分析的密文中没有任何字母
    #[error("empty input: frequency analysis needs at least one letter")]
    EmptyInput,

    /// 卡西斯基检验中没有重复出现的三字母组
    #[error("no repeated trigram found, the key period cannot be inferred")]
    NoRepeatedTrigram,

    #[error("invalid period {period} for a text of {length} letters")]
    InvalidPeriod { period: usize, length: usize },

    #[error("unsupported bit length: {0}")]
    InvalidBitLength(u32),

    #[error("{value} and modulus {modulus} are not coprime")]
    NotCoprime { value: u64, modulus: u64 },

    #[error("message {message} does not fit below modulus {modulus}")]
    MessageTooLarge { message: u64, modulus: u64 },

    #[error("no modular inverse exists")]
    NoModularInverse,

    /// 有界重试循环在给定次数内没有找到合适的候选值
    #[error("search exhausted after {attempts} attempts")]
    SearchExhausted { attempts: u32 },

    #[error("random number generator failed: {0}")]
    Random(String),

    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error")]
    Io(#[from] std::io::Error),
}

/// `cipher-kit` 的结果类型别名
pub type Result<T> = std::result::Result<T, Error>;
