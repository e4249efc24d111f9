//! 维吉尼亚密码：按密钥循环位移的多表代换。
//!
//! 非字母字符不消耗密钥位置。单独的密钥恢复由卡西斯基检验完成，见 `analysis::kasiski`。

use crate::common::alphabet::Alphabet;
use crate::common::normalize::{letters_only, normalize};
use crate::common::traits::ClassicalCipher;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use zeroize::ZeroizeOnDrop;

/// 运算方向
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// 加上密钥字母的下标
    Encrypt,
    /// 减去密钥字母的下标
    Decrypt,
}

/// 维吉尼亚密钥：非空的字母序列，按与文本相同的方式规范化
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, ZeroizeOnDrop)]
#[serde(try_from = "String", into = "String")]
pub struct VigenereKey {
    letters: String,
}

impl VigenereKey {
    /// 规范化后只保留字母；不含任何字母时返回 `Error::InvalidKey`
    pub fn new(key: &str) -> Result<Self> {
        let letters = letters_only(key);
        if letters.is_empty() {
            return Err(Error::InvalidKey(
                "vigenere key must contain at least one letter".to_string(),
            ));
        }
        Ok(Self { letters })
    }

    /// 密钥长度，即加密周期
    pub fn period(&self) -> usize {
        self.letters.len()
    }

    pub fn as_str(&self) -> &str {
        &self.letters
    }

    fn shifts(&self) -> Vec<i32> {
        self.letters
            .chars()
            .filter_map(|c| Alphabet::LATIN.index_of(c))
            .map(|i| i as i32)
            .collect()
    }
}

impl std::fmt::Debug for VigenereKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("VigenereKey").field(&self.letters).finish()
    }
}

impl From<VigenereKey> for String {
    fn from(key: VigenereKey) -> Self {
        key.letters.clone()
    }
}

impl TryFrom<String> for VigenereKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        VigenereKey::new(&value)
    }
}

/// 维吉尼亚密码实现
pub struct VigenereCipher;

impl VigenereCipher {
    /// 加解密统一入口。
    ///
    /// 计数器 `i` 只在遇到字母时递增；第 `i` 个字母的位移为 `index(key[i mod len])`。
    pub fn apply(text: &str, key: &VigenereKey, direction: Direction) -> String {
        let alphabet = Alphabet::LATIN;
        let shifts = key.shifts();
        let sign = match direction {
            Direction::Encrypt => 1,
            Direction::Decrypt => -1,
        };

        let mut i = 0;
        normalize(text)
            .chars()
            .map(|c| match alphabet.index_of(c) {
                Some(index) => {
                    let shift = shifts[i % shifts.len()];
                    i += 1;
                    alphabet.shifted(index, sign * shift)
                }
                None => c,
            })
            .collect()
    }
}

impl ClassicalCipher for VigenereCipher {
    type Key = VigenereKey;

    fn encrypt(key: &Self::Key, plaintext: &str) -> Result<String> {
        Ok(Self::apply(plaintext, key, Direction::Encrypt))
    }

    fn decrypt(key: &Self::Key, ciphertext: &str) -> Result<String> {
        Ok(Self::apply(ciphertext, key, Direction::Decrypt))
    }
}
