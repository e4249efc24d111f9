//! # Substitution Cipher
//!
//! General monoalphabetic substitution: each letter at alphabet position `i` is replaced by
//! `key[i]`. Decoding applies the inverse permutation.
//!
//! ---
//!
//! # 单表代换密码
//!
//! 密钥是字母表的一个排列。密钥恢复只做频率排名对齐，没有迭代优化，
//! 也不使用二元组或三元组打分，在短密文上不可靠。

use crate::common::alphabet::{ALPHABET_LEN, Alphabet, validate_permutation};
use crate::common::frequency::{LanguageModel, LetterCounts, TieBreak};
use crate::common::normalize::normalize;
use crate::common::traits::{ClassicalCipher, FrequencyCracker};
use crate::error::{Error, Result};
use rand_core::{OsRng, TryRngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::ZeroizeOnDrop;

/// 代换密钥：字母表位置到替换字母的双射
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, ZeroizeOnDrop)]
#[serde(try_from = "String", into = "String")]
pub struct SubstitutionKey {
    letters: [u8; ALPHABET_LEN],
}

impl SubstitutionKey {
    /// 校验并构造密钥；不是 26 个字母的排列时返回 `Error::InvalidKey`
    pub fn new(key: &str) -> Result<Self> {
        let letters = validate_permutation(&normalize(key)).map_err(|e| match e {
            Error::InvalidAlphabet(reason) => Error::InvalidKey(reason),
            other => other,
        })?;
        Ok(Self { letters })
    }

    /// 用给定随机源生成均匀随机的排列（Fisher-Yates）
    pub fn generate<R: TryRngCore>(rng: &mut R) -> Result<Self> {
        let mut letters = *b"abcdefghijklmnopqrstuvwxyz";
        for i in (1..ALPHABET_LEN).rev() {
            let r = rng
                .try_next_u32()
                .map_err(|e| Error::Random(e.to_string()))?;
            let j = (r as usize) % (i + 1);
            letters.swap(i, j);
        }
        Ok(Self { letters })
    }

    /// 位置 `index` 处的替换字母
    pub fn image(&self, index: usize) -> char {
        self.letters[index] as char
    }

    /// 逆排列，用于解密
    pub fn inverse(&self) -> Self {
        let mut letters = [0u8; ALPHABET_LEN];
        for (i, &c) in self.letters.iter().enumerate() {
            letters[(c - b'a') as usize] = b'a' + i as u8;
        }
        Self { letters }
    }

    pub fn as_str(&self) -> &str {
        // 构造时已保证全部为 ASCII 字母
        std::str::from_utf8(&self.letters).unwrap_or_default()
    }

    fn apply(&self, text: &str) -> String {
        let alphabet = Alphabet::LATIN;
        normalize(text)
            .chars()
            .map(|c| match alphabet.index_of(c) {
                Some(i) => self.image(i),
                None => c,
            })
            .collect()
    }
}

impl std::fmt::Debug for SubstitutionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SubstitutionKey").field(&self.as_str()).finish()
    }
}

impl From<SubstitutionKey> for String {
    fn from(key: SubstitutionKey) -> Self {
        key.as_str().to_string()
    }
}

impl TryFrom<String> for SubstitutionKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        SubstitutionKey::new(&value)
    }
}

/// 单表代换密码实现
pub struct SubstitutionCipher;

impl SubstitutionCipher {
    /// 使用操作系统随机源生成密钥
    pub fn generate_key() -> Result<SubstitutionKey> {
        SubstitutionKey::generate(&mut OsRng)
    }
}

impl ClassicalCipher for SubstitutionCipher {
    type Key = SubstitutionKey;

    fn encrypt(key: &Self::Key, plaintext: &str) -> Result<String> {
        Ok(key.apply(plaintext))
    }

    fn decrypt(key: &Self::Key, ciphertext: &str) -> Result<String> {
        Ok(key.inverse().apply(ciphertext))
    }
}

impl FrequencyCracker for SubstitutionCipher {
    /// 将密文字母按出现次数降序排列，与语言的频率排名逐位对齐：
    /// 第 i 常见的密文字母被视为第 i 常见明文字母的像。
    /// 返回加密密钥，即 `decrypt(ciphertext, key)` 给出推测的明文。
    fn crack_key(
        ciphertext: &str,
        model: &LanguageModel,
        tie_break: TieBreak,
    ) -> Result<Self::Key> {
        let counts = LetterCounts::from_text(&normalize(ciphertext), &Alphabet::LATIN);
        // 检查空输入以及最高次数的并列
        counts.most_frequent(tie_break)?;

        let mut letters = [0u8; ALPHABET_LEN];
        for (plain, (cipher, _)) in model.rank.iter().zip(counts.ranked()) {
            let slot = Alphabet::LATIN
                .index_of(plain)
                .ok_or_else(|| Error::InvalidAlphabet(format!("{:?} is not a latin letter", plain)))?;
            letters[slot] = cipher as u8;
        }

        let key = SubstitutionKey::new(std::str::from_utf8(&letters).unwrap_or_default())?;
        debug!(key = key.as_str(), "recovered substitution key");
        Ok(key)
    }
}
