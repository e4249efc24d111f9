//! 周期选择策略
//!
//! 卡西斯基检验给出重复三字母组的间距，由注入的策略从中选出密钥周期。
//! 任何 `Fn(&[usize]) -> Result<usize>` 闭包都可以直接作为策略使用。

use crate::common::config::AnalysisConfig;
use crate::common::utils::gcd_all;
use crate::error::{Error, Result};
use std::collections::HashMap;
use tracing::debug;

/// 从间距候选中选出周期
pub trait PeriodStrategy {
    fn choose_period(&self, spacings: &[usize]) -> Result<usize>;
}

impl<F> PeriodStrategy for F
where
    F: Fn(&[usize]) -> Result<usize>,
{
    fn choose_period(&self, spacings: &[usize]) -> Result<usize> {
        self(spacings)
    }
}

/// 调用方直接给定的周期
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedPeriod(pub usize);

impl PeriodStrategy for FixedPeriod {
    fn choose_period(&self, _spacings: &[usize]) -> Result<usize> {
        Ok(self.0)
    }
}

/// 出现最频繁的 `top` 个间距的最大公约数
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GcdOfFrequentSpacings {
    pub top: usize,
}

impl Default for GcdOfFrequentSpacings {
    fn default() -> Self {
        Self { top: 3 }
    }
}

impl PeriodStrategy for GcdOfFrequentSpacings {
    fn choose_period(&self, spacings: &[usize]) -> Result<usize> {
        if spacings.is_empty() {
            return Err(Error::NoRepeatedTrigram);
        }
        let mut tally: HashMap<usize, usize> = HashMap::new();
        for &s in spacings {
            *tally.entry(s).or_insert(0) += 1;
        }
        let mut frequent: Vec<(usize, usize)> = tally.into_iter().collect();
        frequent.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let period = gcd_all(
            frequent
                .iter()
                .take(self.top.max(1))
                .map(|&(s, _)| s as u64),
        ) as usize;
        debug!(period, "gcd of frequent spacings");
        Ok(period)
    }
}

/// 统计 `2..=max_period` 中每个因子整除的间距个数，
/// 取计数不低于最高计数 `ratio` 倍的最大因子。
///
/// 真周期的倍数计数约为真周期的一半，真周期的因子计数不低于真周期，
/// 因此比例阈值会落在真周期上。没有任何因子命中时退回到全部间距的最大公约数。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MostCommonFactor {
    pub max_period: usize,
    pub ratio: f64,
}

impl Default for MostCommonFactor {
    fn default() -> Self {
        Self {
            max_period: 20,
            ratio: 0.75,
        }
    }
}

impl MostCommonFactor {
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            max_period: config.max_period,
            ratio: config.factor_ratio,
        }
    }

    /// 每个候选因子整除的间距个数
    pub fn factor_counts(&self, spacings: &[usize]) -> Vec<(usize, usize)> {
        (2..=self.max_period)
            .map(|f| (f, spacings.iter().filter(|&&s| s % f == 0).count()))
            .collect()
    }
}

impl PeriodStrategy for MostCommonFactor {
    fn choose_period(&self, spacings: &[usize]) -> Result<usize> {
        if spacings.is_empty() {
            return Err(Error::NoRepeatedTrigram);
        }
        let counts = self.factor_counts(spacings);
        let best = counts.iter().map(|&(_, n)| n).max().unwrap_or(0);
        if best == 0 {
            let period = gcd_all(spacings.iter().map(|&s| s as u64)) as usize;
            debug!(period, "no factor matched, using gcd of all spacings");
            return Ok(period);
        }

        let threshold = best as f64 * self.ratio;
        let period = counts
            .iter()
            .filter(|&&(_, n)| n > 0 && n as f64 >= threshold)
            .map(|&(f, _)| f)
            .max()
            .unwrap_or(1);
        debug!(period, best, "most common factor");
        Ok(period)
    }
}
