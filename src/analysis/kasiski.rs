//! # Kasiski Examination
//!
//! Breaks a Vigenère ciphertext in stages, each a pure function of its input:
//!
//! 1. strip the ciphertext down to its letters;
//! 2. index every trigram with the positions where it occurs;
//! 3. take the distance between the first two occurrences of each repeated trigram;
//! 4. pick a period from those spacings with an injected [`PeriodStrategy`] and split the
//!    stripped text into cosets;
//! 5. crack each coset as an independent Caesar cipher;
//! 6. interleave the decoded cosets back into one stream.
//!
//! ---
//!
//! # 卡西斯基检验
//!
//! 每个陪集都被同一个密钥字母位移，因此可以独立地按凯撒密码破解。
//! 陪集之间没有依赖，启用 `parallel` 特性时使用 `rayon` 并行处理，结果与串行一致。
//! 结果是统计意义上的尽力而为，错误的周期或不典型的陪集会得到错误的明文而不报错。

use crate::analysis::period::{MostCommonFactor, PeriodStrategy};
use crate::common::alphabet::Alphabet;
use crate::common::config::AnalysisConfig;
use crate::common::frequency::{LanguageModel, TieBreak};
use crate::common::normalize::letters_only;
use crate::error::{Error, Result};
use crate::systems::caesar::CaesarCipher;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// 重组时用于补齐较短陪集的占位字符
const PADDING: char = ' ';

/// 一个 n 元组及其全部起始位置
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigram {
    pub text: String,
    pub positions: Vec<usize>,
}

impl Trigram {
    pub fn count(&self) -> usize {
        self.positions.len()
    }

    /// 前两次出现之间的距离
    pub fn spacing(&self) -> Option<usize> {
        match self.positions.as_slice() {
            [first, second, ..] => Some(second - first),
            _ => None,
        }
    }
}

/// 按首次出现顺序排列的 n 元组索引
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrigramIndex {
    entries: Vec<Trigram>,
}

impl TrigramIndex {
    /// 为去除非字母后的文本建立长度为 `n` 的 n 元组索引
    pub fn build(stripped: &str, n: usize) -> Self {
        let chars: Vec<char> = stripped.chars().collect();
        let mut entries: Vec<Trigram> = Vec::new();
        if n == 0 || chars.len() < n {
            return Self { entries };
        }

        let mut slots: HashMap<String, usize> = HashMap::new();
        for (i, window) in chars.windows(n).enumerate() {
            let gram: String = window.iter().collect();
            match slots.get(&gram) {
                Some(&slot) => entries[slot].positions.push(i),
                None => {
                    slots.insert(gram.clone(), entries.len());
                    entries.push(Trigram {
                        text: gram,
                        positions: vec![i],
                    });
                }
            }
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, text: &str) -> Option<&Trigram> {
        self.entries.iter().find(|t| t.text == text)
    }

    /// 出现不止一次的 n 元组
    pub fn repeated(&self) -> impl Iterator<Item = &Trigram> {
        self.entries.iter().filter(|t| t.count() > 1)
    }

    /// 每个重复 n 元组前两次出现的间距，按首次出现顺序排列
    pub fn spacings(&self) -> Result<Vec<usize>> {
        let spacings: Vec<usize> = self.repeated().filter_map(Trigram::spacing).collect();
        if spacings.is_empty() {
            return Err(Error::NoRepeatedTrigram);
        }
        Ok(spacings)
    }
}

/// 将文本规范化并只保留字母
pub fn strip(ciphertext: &str) -> String {
    letters_only(ciphertext)
}

/// 按周期 `p` 把文本分成 `p` 个陪集，第 `j` 个陪集包含所有下标 `≡ j (mod p)` 的字符
pub fn partition(stripped: &str, period: usize) -> Result<Vec<String>> {
    let length = stripped.chars().count();
    if period == 0 || period > length {
        return Err(Error::InvalidPeriod { period, length });
    }
    let mut cosets = vec![String::with_capacity(length / period + 1); period];
    for (k, c) in stripped.chars().enumerate() {
        cosets[k % period].push(c);
    }
    Ok(cosets)
}

/// 右侧补齐各陪集后逐列交错，重建位置 `k*p + j` 的字符，最后去掉占位符
pub fn reassemble<S: AsRef<str>>(cosets: &[S]) -> String {
    let columns: Vec<Vec<char>> = cosets.iter().map(|c| c.as_ref().chars().collect()).collect();
    let longest = columns.iter().map(Vec::len).max().unwrap_or(0);

    let mut out = String::with_capacity(longest * columns.len());
    for k in 0..longest {
        for column in &columns {
            out.push(column.get(k).copied().unwrap_or(PADDING));
        }
    }
    letters_only(&out)
}

/// 单个陪集的破解结果
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CosetSolution {
    /// 恢复出的位移
    pub shift: i32,
    /// 对应的维吉尼亚密钥字母
    pub key_letter: char,
    pub plaintext: String,
}

fn crack_coset(coset: &str, model: &LanguageModel, tie_break: TieBreak) -> Result<CosetSolution> {
    let shift = CaesarCipher::crack_shift(coset, model, tie_break)?;
    Ok(CosetSolution {
        shift,
        key_letter: Alphabet::LATIN.shifted(0, shift),
        plaintext: CaesarCipher::decode(coset, shift),
    })
}

/// 对每个陪集独立地做凯撒破解与解密
pub fn crack_cosets<S: AsRef<str> + Sync>(
    cosets: &[S],
    model: &LanguageModel,
    tie_break: TieBreak,
    parallel: bool,
) -> Result<Vec<CosetSolution>> {
    if parallel {
        return crack_cosets_parallel(cosets, model, tie_break);
    }
    cosets
        .iter()
        .map(|c| crack_coset(c.as_ref(), model, tie_break))
        .collect()
}

#[cfg(feature = "parallel")]
fn crack_cosets_parallel<S: AsRef<str> + Sync>(
    cosets: &[S],
    model: &LanguageModel,
    tie_break: TieBreak,
) -> Result<Vec<CosetSolution>> {
    cosets
        .par_iter()
        .map(|c| crack_coset(c.as_ref(), model, tie_break))
        .collect()
}

// 未启用 `parallel` 特性时退回串行实现
#[cfg(not(feature = "parallel"))]
fn crack_cosets_parallel<S: AsRef<str> + Sync>(
    cosets: &[S],
    model: &LanguageModel,
    tie_break: TieBreak,
) -> Result<Vec<CosetSolution>> {
    crack_cosets(cosets, model, tie_break, false)
}

/// 周期选择之前的分析数据
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KasiskiReport {
    pub stripped: String,
    /// 重复出现的 n 元组，按首次出现顺序
    pub repeated: Vec<Trigram>,
    /// 候选间距，与 `repeated` 一一对应
    pub spacings: Vec<usize>,
}

/// 完整破解的结果
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KasiskiSolution {
    pub period: usize,
    /// 由各陪集位移推出的密钥
    pub key: String,
    pub cosets: Vec<CosetSolution>,
    pub plaintext: String,
}

/// 卡西斯基检验
#[derive(Clone, Debug, Default)]
pub struct Kasiski {
    config: AnalysisConfig,
}

impl Kasiski {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// 执行前三个阶段：去除非字母、建立索引、计算间距
    pub fn examine(&self, ciphertext: &str) -> Result<KasiskiReport> {
        let stripped = strip(ciphertext);
        if stripped.is_empty() {
            return Err(Error::EmptyInput);
        }
        let index = TrigramIndex::build(&stripped, self.config.ngram_length);
        let spacings = index.spacings()?;
        let repeated: Vec<Trigram> = index.repeated().cloned().collect();
        debug!(
            letters = stripped.len(),
            repeated = repeated.len(),
            ?spacings,
            "kasiski examination"
        );
        Ok(KasiskiReport {
            stripped,
            repeated,
            spacings,
        })
    }

    /// 用策略选择周期后破解
    pub fn solve(&self, ciphertext: &str, strategy: &dyn PeriodStrategy) -> Result<KasiskiSolution> {
        let report = self.examine(ciphertext)?;
        let period = strategy.choose_period(&report.spacings)?;
        debug!(period, "period chosen");
        self.solve_stripped(&report.stripped, period)
    }

    /// 使用配置中的参数自动选择周期
    pub fn solve_auto(&self, ciphertext: &str) -> Result<KasiskiSolution> {
        self.solve(ciphertext, &MostCommonFactor::from_config(&self.config))
    }

    /// 跳过重复分析，直接按给定周期破解
    pub fn solve_with_period(&self, ciphertext: &str, period: usize) -> Result<KasiskiSolution> {
        let stripped = strip(ciphertext);
        if stripped.is_empty() {
            return Err(Error::EmptyInput);
        }
        self.solve_stripped(&stripped, period)
    }

    fn solve_stripped(&self, stripped: &str, period: usize) -> Result<KasiskiSolution> {
        let cosets = partition(stripped, period)?;
        let solutions = crack_cosets(
            &cosets,
            &self.config.model(),
            self.config.tie_break,
            self.config.parallel,
        )?;

        let key: String = solutions.iter().map(|s| s.key_letter).collect();
        let shifts: Vec<i32> = solutions.iter().map(|s| s.shift).collect();
        debug!(%key, ?shifts, "cosets cracked");

        let decoded: Vec<&str> = solutions.iter().map(|s| s.plaintext.as_str()).collect();
        Ok(KasiskiSolution {
            period,
            key,
            plaintext: reassemble(&decoded),
            cosets: solutions,
        })
    }
}
