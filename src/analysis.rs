//! 密码分析
//!
//! 卡西斯基检验流程与周期选择策略
pub mod kasiski;
pub mod period;

pub use kasiski::{CosetSolution, Kasiski, KasiskiReport, KasiskiSolution, Trigram, TrigramIndex};
pub use period::{FixedPeriod, GcdOfFrequentSpacings, MostCommonFactor, PeriodStrategy};
