//! 通用模块，包含字母表、频率模型、文本规范化、配置、工具函数和共享的 trait

pub mod alphabet;
pub mod config;
pub mod frequency;
pub mod normalize;
pub mod traits;
pub mod utils;

pub use self::alphabet::Alphabet;
pub use self::config::{AnalysisConfig, ConfigFile, Language, RsaConfig};
pub use self::frequency::{FrequencyRank, LanguageModel, LetterCounts, TieBreak};
pub use self::normalize::{letters_only, normalize};
pub use self::traits::{ClassicalCipher, FrequencyCracker};
pub use self::utils::gcd;
