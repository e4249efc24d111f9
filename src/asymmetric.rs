//! # Asymmetric Module
//!
//! A textbook RSA exercise: prime generation, key selection and raw modular
//! exponentiation. It shares only integer helpers with the classical ciphers.
//!
//! ---
//!
//! # 非对称加密模块
//!
//! 教学用 RSA，与古典密码部分没有调用关系，仅共用整数工具函数。

pub mod rsa;

pub use rsa::{PrivateExponent, RsaEncryption, TextbookRsa};
