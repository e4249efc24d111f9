//! 文本规范化
//!
//! 把任意输入文本映射为“所有与密码相关的字符都是小写 a..z”的形式：
//! 大写字母转为小写，其他文字的字母经 `deunicode` 音译为 ASCII 字母（去掉变音符号、展开连字）；
//! 其他字符（空格、标点、数字以及无法音译为纯字母的字符）原样保留，且保持相对位置不变。
//!
//! `normalize` 是全函数且幂等。

use crate::common::alphabet::Alphabet;
use deunicode::deunicode_char;

/// 规范化文本
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii() {
            out.push(c.to_ascii_lowercase());
            continue;
        }
        match fold(c) {
            Some(folded) => out.extend(folded.chars().map(|f| f.to_ascii_lowercase())),
            None => out.push(c),
        }
    }
    out
}

/// 规范化后只保留字母，用于需要丢弃非字母字符的分析
pub fn letters_only(text: &str) -> String {
    Alphabet::LATIN.retain_letters(&normalize(text))
}

/// 只音译字母，且结果必须全部是 ASCII 字母；标点和符号不做替换
fn fold(c: char) -> Option<&'static str> {
    if !c.is_alphabetic() {
        return None;
    }
    deunicode_char(c).filter(|s| !s.is_empty() && s.chars().all(|f| f.is_ascii_alphabetic()))
}
