//! 字母表：定义编码域以及每个字母的规范下标（0 起）。
//!
//! 所有模运算都基于这里的下标。`Alphabet::LATIN` 是整个库共享的规范字母表。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// 字母表大小
pub const ALPHABET_LEN: usize = 26;

const NO_POSITION: u8 = u8::MAX;

/// 26 个互不相同的小写 ASCII 字母组成的有序序列
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alphabet {
    letters: [u8; ALPHABET_LEN],
    positions: [u8; 128],
}

impl Alphabet {
    /// 规范的 `a..z` 字母表
    pub const LATIN: Alphabet = Alphabet::from_letters(*b"abcdefghijklmnopqrstuvwxyz");

    const fn from_letters(letters: [u8; ALPHABET_LEN]) -> Self {
        let mut positions = [NO_POSITION; 128];
        let mut i = 0;
        while i < ALPHABET_LEN {
            positions[letters[i] as usize] = i as u8;
            i += 1;
        }
        Self { letters, positions }
    }

    /// 从字符串构造字母表，要求恰好 26 个互不相同的小写 ASCII 字母
    pub fn new(letters: &str) -> Result<Self> {
        Ok(Self::from_letters(validate_permutation(letters)?))
    }

    /// 返回字母的下标；不属于字母表的字符返回 `None`
    #[inline]
    pub fn index_of(&self, c: char) -> Option<usize> {
        if !c.is_ascii() {
            return None;
        }
        match self.positions[c as usize] {
            NO_POSITION => None,
            p => Some(p as usize),
        }
    }

    /// 返回下标 `index mod 26` 处的字母
    #[inline]
    pub fn letter_at(&self, index: usize) -> char {
        self.letters[index % ALPHABET_LEN] as char
    }

    /// 按有符号位移取字母，结果下标为 `(index + shift) mod 26`
    #[inline]
    pub fn shifted(&self, index: usize, shift: i32) -> char {
        let i = (index as i64 + shift as i64).rem_euclid(ALPHABET_LEN as i64);
        self.letter_at(i as usize)
    }

    pub fn contains(&self, c: char) -> bool {
        self.index_of(c).is_some()
    }

    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.letters.iter().map(|&b| b as char)
    }

    /// 仅保留属于字母表的字符
    pub fn retain_letters(&self, text: &str) -> String {
        text.chars().filter(|&c| self.contains(c)).collect()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::LATIN
    }
}

impl std::fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Alphabet").field(&String::from(*self)).finish()
    }
}

impl From<Alphabet> for String {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.letters().collect()
    }
}

impl TryFrom<String> for Alphabet {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Alphabet::new(&value)
    }
}

/// 校验字符串是 `a..z` 的一个排列，返回其字节形式。
///
/// 字母表、频率排名和代换密钥共用这一校验。
pub(crate) fn validate_permutation(letters: &str) -> Result<[u8; ALPHABET_LEN]> {
    let bytes = letters.as_bytes();
    if bytes.len() != ALPHABET_LEN {
        return Err(Error::InvalidAlphabet(format!(
            "expected {} letters, got {}",
            ALPHABET_LEN,
            letters.chars().count()
        )));
    }
    let mut seen = [false; ALPHABET_LEN];
    let mut out = [0u8; ALPHABET_LEN];
    for (i, &b) in bytes.iter().enumerate() {
        if !b.is_ascii_lowercase() {
            return Err(Error::InvalidAlphabet(format!(
                "{:?} is not a lowercase ascii letter",
                b as char
            )));
        }
        let slot = (b - b'a') as usize;
        if seen[slot] {
            return Err(Error::InvalidAlphabet(format!(
                "letter {:?} appears more than once",
                b as char
            )));
        }
        seen[slot] = true;
        out[i] = b;
    }
    Ok(out)
}
