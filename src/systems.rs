//! 古典密码系统集合
//!
//! 包含凯撒、单表代换和维吉尼亚密码
pub mod caesar;
pub mod substitution;
pub mod vigenere;

pub use caesar::{CaesarCipher, CaesarKey};
pub use substitution::{SubstitutionCipher, SubstitutionKey};
pub use vigenere::{Direction, VigenereCipher, VigenereKey};
