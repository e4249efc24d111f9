//!
//! # 通用配置模块
//!
//! 包含密码分析与 RSA 子系统使用的配置结构。
//! 所有结构都实现了 `Default`，并可以通过 JSON 持久化。
//!
use crate::common::frequency::{LanguageModel, TieBreak};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 内置的目标语言
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    French,
    English,
}

impl Language {
    /// 对应的语言模型
    pub fn model(self) -> LanguageModel {
        match self {
            Language::French => LanguageModel::FRENCH,
            Language::English => LanguageModel::ENGLISH,
        }
    }
}

/// 密码分析配置
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    /// 目标语言
    #[serde(default)]
    pub language: Language,
    /// 频率并列时的处理策略
    #[serde(default)]
    pub tie_break: TieBreak,
    /// 卡西斯基检验中 n 元组的长度
    #[serde(default = "default_ngram_length")]
    pub ngram_length: usize,
    /// 自动选择周期时考虑的最大周期
    #[serde(default = "default_max_period")]
    pub max_period: usize,
    /// 因子计数达到最高计数的该比例时即可入选
    #[serde(default = "default_factor_ratio")]
    pub factor_ratio: f64,
    /// 是否并行破解各陪集（需要 `parallel` 特性）
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_ngram_length() -> usize {
    3
}

fn default_max_period() -> usize {
    20
}

fn default_factor_ratio() -> f64 {
    0.75
}

fn default_parallel() -> bool {
    true
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            tie_break: TieBreak::default(),
            ngram_length: default_ngram_length(),
            max_period: default_max_period(),
            factor_ratio: default_factor_ratio(),
            parallel: default_parallel(),
        }
    }
}

impl AnalysisConfig {
    pub fn model(&self) -> LanguageModel {
        self.language.model()
    }
}

/// 教学用 RSA 的参数
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RsaConfig {
    /// `generate_prime_pair` 使用的素数位数
    pub prime_bits: u32,
    /// 加密指数候选值的位数
    pub exponent_bits: u32,
    /// 每个随机搜索循环的最大尝试次数
    pub max_attempts: u32,
}

impl Default for RsaConfig {
    fn default() -> Self {
        Self {
            prime_bits: 16,
            exponent_bits: 16,
            max_attempts: 100_000,
        }
    }
}

/// 完整配置文件
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct ConfigFile {
    /// 分析配置
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// RSA 配置
    #[serde(default)]
    pub rsa: RsaConfig,
}

impl ConfigFile {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 从文件加载配置
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// 将配置写入文件
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_config_default() {
        let config = AnalysisConfig::default();
        assert_eq!(config.language, Language::French);
        assert_eq!(config.tie_break, TieBreak::LowestIndex);
        assert_eq!(config.ngram_length, 3);
        assert_eq!(config.max_period, 20);
        assert!(config.parallel);
        assert_eq!(config.model(), LanguageModel::FRENCH);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ConfigFile::from_json(
            r#"{ "analysis": { "language": "english", "tie_break": "reject" } }"#,
        )
        .unwrap();
        assert_eq!(config.analysis.language, Language::English);
        assert_eq!(config.analysis.tie_break, TieBreak::Reject);
        assert_eq!(config.analysis.ngram_length, 3);
        assert_eq!(config.rsa, RsaConfig::default());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(ConfigFile::from_json("{ not json").is_err());
    }
}
