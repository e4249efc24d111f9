//! # Frequency Model
//!
//! Reference letter-frequency rankings and per-text letter counts.
//!
//! ---
//!
//! # 频率模型
//!
//! `FrequencyRank` 是目标语言中字母按期望频率的全序（最常见在前），作为密码分析的统计先验；
//! `LetterCounts` 是某段文本的字母计数，每次分析时重新计算，不在调用之间缓存。
//!
//! 计数排序使用确定的全序：出现次数降序，次数相同时按字母表下标升序。

use crate::common::alphabet::{ALPHABET_LEN, Alphabet, validate_permutation};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// 并列时的处理策略
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// 次数相同时取字母表下标最小者
    #[default]
    LowestIndex,
    /// 最高次数出现并列时返回 `Error::AmbiguousFrequencyTie`
    Reject,
}

/// 字母按期望频率的排名，最常见的字母在前
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FrequencyRank {
    order: [u8; ALPHABET_LEN],
}

impl FrequencyRank {
    /// 法语字母频率排名
    pub const FRENCH: FrequencyRank = FrequencyRank {
        order: *b"easintrluodcpmvgfbqhxjyzkw",
    };

    /// 英语字母频率排名
    pub const ENGLISH: FrequencyRank = FrequencyRank {
        order: *b"etaoinshrdlcumwfgypbvkjxqz",
    };

    /// 由“最常见在前”的 26 个字母构造排名
    pub fn from_order(order: &str) -> Result<Self> {
        Ok(Self {
            order: validate_permutation(order)?,
        })
    }

    /// 语言中最常见的字母
    pub fn most_frequent(&self) -> char {
        self.order[0] as char
    }

    /// 字母的排名（0 为最常见）
    pub fn rank_of(&self, letter: char) -> Option<usize> {
        self.order.iter().position(|&b| b as char == letter)
    }

    /// 按频率从高到低遍历字母
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.order.iter().map(|&b| b as char)
    }
}

impl std::fmt::Debug for FrequencyRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("FrequencyRank")
            .field(&String::from(*self))
            .finish()
    }
}

impl From<FrequencyRank> for String {
    fn from(rank: FrequencyRank) -> Self {
        rank.iter().collect()
    }
}

impl TryFrom<String> for FrequencyRank {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        FrequencyRank::from_order(&value)
    }
}

/// 破解器使用的语言模型：目标语言的频率排名。
///
/// 排名是不可变值，可以替换为其他语言的表或测试替身。下标运算固定在
/// `Alphabet::LATIN` 上，与加解密使用的字母表一致，恢复出的密钥可以直接用于解密。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageModel {
    pub rank: FrequencyRank,
}

impl LanguageModel {
    pub const FRENCH: LanguageModel = LanguageModel {
        rank: FrequencyRank::FRENCH,
    };

    pub const ENGLISH: LanguageModel = LanguageModel {
        rank: FrequencyRank::ENGLISH,
    };

    pub fn new(rank: FrequencyRank) -> Self {
        Self { rank }
    }
}

impl Default for LanguageModel {
    fn default() -> Self {
        Self::FRENCH
    }
}

/// 文本中每个字母的出现次数（包含零次）
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LetterCounts {
    alphabet: Alphabet,
    counts: [usize; ALPHABET_LEN],
}

impl LetterCounts {
    /// 统计 `text` 中属于字母表的字符，其他字符被忽略
    pub fn from_text(text: &str, alphabet: &Alphabet) -> Self {
        let mut counts = [0usize; ALPHABET_LEN];
        for i in text.chars().filter_map(|c| alphabet.index_of(c)) {
            counts[i] += 1;
        }
        Self {
            alphabet: *alphabet,
            counts,
        }
    }

    pub fn count(&self, letter: char) -> usize {
        self.alphabet
            .index_of(letter)
            .map_or(0, |i| self.counts[i])
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// 全部 26 个字母按 (次数降序, 下标升序) 排列
    pub fn ranked(&self) -> Vec<(char, usize)> {
        let mut ranked: Vec<(usize, usize)> = self.counts.iter().copied().enumerate().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
            .into_iter()
            .map(|(i, n)| (self.alphabet.letter_at(i), n))
            .collect()
    }

    /// 出现次数最多的字母。
    ///
    /// 文本中没有字母时返回 `Error::EmptyInput`。
    pub fn most_frequent(&self, tie_break: TieBreak) -> Result<char> {
        let ranked = self.ranked();
        let (top, count) = ranked[0];
        if count == 0 {
            return Err(Error::EmptyInput);
        }
        if tie_break == TieBreak::Reject {
            let letters: Vec<char> = ranked
                .iter()
                .take_while(|(_, n)| *n == count)
                .map(|(c, _)| *c)
                .collect();
            if letters.len() > 1 {
                return Err(Error::AmbiguousFrequencyTie { letters, count });
            }
        }
        Ok(top)
    }
}
