//! 古典密码系统的核心 Trait。
use crate::common::frequency::{LanguageModel, TieBreak};
use crate::error::Result;
use std::fmt::Debug;

/// `ClassicalCipher` 定义了古典密码必须实现的加解密功能。
///
/// 输入文本先经过规范化；不属于字母表的字符原样保留，位置不变。
pub trait ClassicalCipher {
    /// 密钥类型
    type Key: Clone + Debug;

    /// 加密
    fn encrypt(key: &Self::Key, plaintext: &str) -> Result<String>;

    /// 解密
    fn decrypt(key: &Self::Key, ciphertext: &str) -> Result<String>;
}

/// 只依据字母频率从密文恢复密钥。
///
/// 结果是基于统计的尽力而为：密钥可能错误而不会报告任何错误。
pub trait FrequencyCracker: ClassicalCipher {
    fn crack_key(
        ciphertext: &str,
        model: &LanguageModel,
        tie_break: TieBreak,
    ) -> Result<Self::Key>;
}
