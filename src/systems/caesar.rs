//! `CaesarCipher` 提供固定位移的单表代换及基于频率的密钥恢复。

use crate::common::alphabet::Alphabet;
use crate::common::frequency::{LanguageModel, LetterCounts, TieBreak};
use crate::common::normalize::normalize;
use crate::common::traits::{ClassicalCipher, FrequencyCracker};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 凯撒密钥：有符号位移，语义上取模 26；负位移即逆运算
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaesarKey(pub i32);

impl CaesarKey {
    /// 位移在 `0..26` 中的代表元
    pub fn normalized(self) -> u8 {
        self.0.rem_euclid(26) as u8
    }

    /// 解密所用的逆密钥
    pub fn inverse(self) -> Self {
        CaesarKey(-self.0)
    }
}

impl From<i32> for CaesarKey {
    fn from(shift: i32) -> Self {
        CaesarKey(shift)
    }
}

/// 凯撒密码实现
pub struct CaesarCipher;

impl CaesarCipher {
    /// 将文本中每个字母替换为下标 `(index + shift) mod 26` 处的字母。
    ///
    /// 任何整数位移都可以接受；解密即以 `-shift` 调用本函数。
    pub fn encode(text: &str, shift: i32) -> String {
        Self::shift_with(&Alphabet::LATIN, &normalize(text), shift)
    }

    pub fn decode(text: &str, shift: i32) -> String {
        Self::encode(text, -shift)
    }

    /// 在给定字母表上位移已规范化的文本
    pub fn shift_with(alphabet: &Alphabet, text: &str, shift: i32) -> String {
        text.chars()
            .map(|c| match alphabet.index_of(c) {
                Some(i) => alphabet.shifted(i, shift),
                None => c,
            })
            .collect()
    }

    /// 恢复位移：假设密文中出现最多的字母是语言中最常见字母的密文像。
    ///
    /// 返回 `index(m) - index(top)`，位于 `-25..=25`。`m` 是密文中最常见的字母，
    /// `top` 是语言模型中最常见的字母；用 `-shift` 解码即可还原明文。
    /// 这是单一假设的启发式方法，不会用完整的频率分布做交叉验证。
    pub fn crack_shift(ciphertext: &str, model: &LanguageModel, tie_break: TieBreak) -> Result<i32> {
        let counts = LetterCounts::from_text(&normalize(ciphertext), &Alphabet::LATIN);
        let most_frequent = counts.most_frequent(tie_break)?;

        let top = model.rank.most_frequent();
        let alphabet = Alphabet::LATIN;
        let (Some(m), Some(t)) = (alphabet.index_of(most_frequent), alphabet.index_of(top)) else {
            return Err(Error::InvalidAlphabet(format!(
                "{:?} is not part of the alphabet",
                top
            )));
        };

        let shift = m as i32 - t as i32;
        debug!(%most_frequent, shift, "recovered caesar shift");
        Ok(shift)
    }
}

impl ClassicalCipher for CaesarCipher {
    type Key = CaesarKey;

    fn encrypt(key: &Self::Key, plaintext: &str) -> Result<String> {
        Ok(Self::encode(plaintext, key.0))
    }

    fn decrypt(key: &Self::Key, ciphertext: &str) -> Result<String> {
        Ok(Self::decode(ciphertext, key.0))
    }
}

impl FrequencyCracker for CaesarCipher {
    fn crack_key(
        ciphertext: &str,
        model: &LanguageModel,
        tie_break: TieBreak,
    ) -> Result<Self::Key> {
        Self::crack_shift(ciphertext, model, tie_break).map(CaesarKey)
    }
}
