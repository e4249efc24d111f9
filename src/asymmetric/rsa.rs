//! `TextbookRsa` 提供教学用的 RSA：素数生成、密钥选择与原始的模幂加解密。
//!
//! 它与古典密码部分相互独立，不做任何填充，只适用于演示。
//! 所有随机搜索都是有界的迭代循环，超过 `RsaConfig::max_attempts` 次即返回
//! `Error::SearchExhausted`。数值使用 `u64`，中间结果使用 `u128`，因此素数最多 32 位。

use crate::common::config::RsaConfig;
use crate::common::utils::{gcd, mod_inverse, mod_pow};
use crate::error::{Error, Result};
use rand_core::{OsRng, TryRngCore};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use zeroize::ZeroizeOnDrop;

/// 素数允许的最大位数
pub const MAX_PRIME_BITS: u32 = 32;

/// 试除法判断素数
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut i = 3u64;
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// 私钥指数，离开作用域时自动清零
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, ZeroizeOnDrop)]
pub struct PrivateExponent(u64);

impl PrivateExponent {
    pub fn expose(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Debug for PrivateExponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PrivateExponent(..)")
    }
}

/// 一次加密的结果：密文以及本次选出的密钥对
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsaEncryption {
    pub ciphertext: u64,
    pub public_exponent: u64,
    pub private_exponent: PrivateExponent,
}

/// 教学用 RSA 实现
#[derive(Clone, Debug, Default)]
pub struct TextbookRsa {
    config: RsaConfig,
}

impl TextbookRsa {
    pub fn new(config: RsaConfig) -> Self {
        Self { config }
    }

    /// 生成 `bits` 位以内的随机素数
    pub fn generate_prime(&self, bits: u32) -> Result<u64> {
        self.generate_prime_with(bits, &mut OsRng)
    }

    /// 先用末位数字 {1, 3, 7, 9} 过滤候选值，再做试除
    pub fn generate_prime_with<R: TryRngCore>(&self, bits: u32, rng: &mut R) -> Result<u64> {
        check_bits(bits, 2, MAX_PRIME_BITS)?;
        for attempt in 0..self.config.max_attempts {
            let candidate = random_bits(rng, bits)?;
            if !matches!(candidate % 10, 1 | 3 | 7 | 9) {
                continue;
            }
            if is_prime(candidate) {
                debug!(candidate, attempt, "prime found");
                return Ok(candidate);
            }
            trace!(candidate, "rejected composite candidate");
        }
        Err(Error::SearchExhausted {
            attempts: self.config.max_attempts,
        })
    }

    /// 生成两个互不相同、位数为 `RsaConfig::prime_bits` 的素数
    pub fn generate_prime_pair(&self) -> Result<(u64, u64)> {
        self.generate_prime_pair_with(&mut OsRng)
    }

    pub fn generate_prime_pair_with<R: TryRngCore>(&self, rng: &mut R) -> Result<(u64, u64)> {
        let bits = self.config.prime_bits;
        let p = self.generate_prime_with(bits, rng)?;
        for _ in 0..self.config.max_attempts {
            let q = self.generate_prime_with(bits, rng)?;
            if q != p {
                return Ok((p, q));
            }
        }
        Err(Error::SearchExhausted {
            attempts: self.config.max_attempts,
        })
    }

    /// 随机选取 `e ∈ [1, n-1]` 且 `gcd(e, φ(n)) = 1`
    pub fn encryption_key(&self, p: u64, q: u64, bits: u32) -> Result<u64> {
        self.encryption_key_with(p, q, bits, &mut OsRng)
    }

    pub fn encryption_key_with<R: TryRngCore>(
        &self,
        p: u64,
        q: u64,
        bits: u32,
        rng: &mut R,
    ) -> Result<u64> {
        check_bits(bits, 1, 63)?;
        let (n, phi) = modulus(p, q)?;
        for _ in 0..self.config.max_attempts {
            let e = random_bits(rng, bits)?;
            if e < 1 || e > n - 1 {
                continue;
            }
            if gcd(e, phi) != 1 {
                trace!(e, "exponent shares a factor with phi");
                continue;
            }
            return Ok(e);
        }
        Err(Error::SearchExhausted {
            attempts: self.config.max_attempts,
        })
    }

    /// 计算 `d`，使 `e·d ≡ 1 (mod φ(n))`
    pub fn decryption_key(p: u64, q: u64, e: u64) -> Result<u64> {
        let (_, phi) = modulus(p, q)?;
        mod_inverse(e, phi).ok_or(Error::NoModularInverse)
    }

    /// 选出密钥对后加密。
    ///
    /// 消息必须小于 `n` 且与 `n` 互素。`d == e` 时重新选取 `e`。
    pub fn encrypt(&self, p: u64, q: u64, message: u64) -> Result<RsaEncryption> {
        self.encrypt_with(p, q, message, &mut OsRng)
    }

    pub fn encrypt_with<R: TryRngCore>(
        &self,
        p: u64,
        q: u64,
        message: u64,
        rng: &mut R,
    ) -> Result<RsaEncryption> {
        let (n, _) = modulus(p, q)?;
        check_message(message, n)?;

        for _ in 0..self.config.max_attempts {
            let e = self.encryption_key_with(p, q, self.config.exponent_bits, rng)?;
            let d = Self::decryption_key(p, q, e)?;
            if d == e {
                trace!(e, "private exponent equals public exponent");
                continue;
            }
            return Ok(RsaEncryption {
                ciphertext: mod_pow(message, e, n),
                public_exponent: e,
                private_exponent: PrivateExponent(d),
            });
        }
        Err(Error::SearchExhausted {
            attempts: self.config.max_attempts,
        })
    }

    /// 用私钥指数 `d` 解密
    pub fn decrypt(ciphertext: u64, d: u64, p: u64, q: u64) -> Result<u64> {
        let (n, _) = modulus(p, q)?;
        check_message(ciphertext, n)?;
        Ok(mod_pow(ciphertext, d, n))
    }
}

fn check_bits(bits: u32, min: u32, max: u32) -> Result<()> {
    if bits < min || bits > max {
        return Err(Error::InvalidBitLength(bits));
    }
    Ok(())
}

fn random_bits<R: TryRngCore>(rng: &mut R, bits: u32) -> Result<u64> {
    let value = rng
        .try_next_u64()
        .map_err(|e| Error::Random(e.to_string()))?;
    Ok(value >> (64 - bits))
}

/// 校验 `p`、`q` 并返回 `(n, φ(n))`
fn modulus(p: u64, q: u64) -> Result<(u64, u64)> {
    for factor in [p, q] {
        if !is_prime(factor) {
            return Err(Error::InvalidKey(format!("{} is not prime", factor)));
        }
    }
    if p == q {
        return Err(Error::InvalidKey("p and q must be distinct".to_string()));
    }
    let n = p
        .checked_mul(q)
        .ok_or_else(|| Error::InvalidKey("modulus does not fit in 64 bits".to_string()))?;
    Ok((n, (p - 1) * (q - 1)))
}

fn check_message(value: u64, n: u64) -> Result<()> {
    if value >= n {
        return Err(Error::MessageTooLarge {
            message: value,
            modulus: n,
        });
    }
    if gcd(value, n) != 1 {
        return Err(Error::NotCoprime { value, modulus: n });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 只产生偶数的随机源，用于触发搜索上限
    struct EvenOnly;

    impl rand_core::RngCore for EvenOnly {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    #[test]
    fn test_is_prime() {
        let primes: Vec<u64> = (0..30).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert!(is_prime(65_521));
        assert!(!is_prime(65_523));
        assert!(is_prime(4_294_967_291));
    }

    #[test]
    fn test_generate_prime() {
        let rsa = TextbookRsa::default();
        for _ in 0..5 {
            let p = rsa.generate_prime(16).unwrap();
            assert!(is_prime(p));
            assert!(p < 1 << 16);
            assert!(matches!(p % 10, 1 | 3 | 7 | 9));
        }
    }

    #[test]
    fn test_generate_prime_rejects_bit_lengths() {
        let rsa = TextbookRsa::default();
        assert!(matches!(rsa.generate_prime(1), Err(Error::InvalidBitLength(1))));
        assert!(matches!(rsa.generate_prime(33), Err(Error::InvalidBitLength(33))));
    }

    #[test]
    fn test_prime_pair_uses_configured_bits() {
        let rsa = TextbookRsa::new(RsaConfig {
            prime_bits: 12,
            ..Default::default()
        });
        let (p, q) = rsa.generate_prime_pair().unwrap();
        assert_ne!(p, q);
        assert!(is_prime(p) && is_prime(q));
        assert!(p < 1 << 12 && q < 1 << 12);

        let rsa = TextbookRsa::new(RsaConfig {
            prime_bits: 40,
            ..Default::default()
        });
        assert!(matches!(rsa.generate_prime_pair(), Err(Error::InvalidBitLength(40))));
    }

    #[test]
    fn test_search_is_bounded() {
        let rsa = TextbookRsa::new(RsaConfig {
            max_attempts: 10,
            ..Default::default()
        });
        let result = rsa.generate_prime_with(16, &mut EvenOnly);
        assert!(matches!(result, Err(Error::SearchExhausted { attempts: 10 })));
    }

    #[test]
    fn test_known_key_pair() {
        assert_eq!(TextbookRsa::decryption_key(61, 53, 17).unwrap(), 2753);
        assert_eq!(TextbookRsa::decrypt(2790, 2753, 61, 53).unwrap(), 65);
        assert!(matches!(
            TextbookRsa::decryption_key(61, 53, 12),
            Err(Error::NoModularInverse)
        ));
    }

    #[test]
    fn test_encryption_key_is_coprime_with_phi() {
        let rsa = TextbookRsa::default();
        let e = rsa.encryption_key(61, 53, 12).unwrap();
        assert!(e >= 1 && e < 61 * 53);
        assert_eq!(gcd(e, 60 * 52), 1);
    }

    fn assert_zeroize_on_drop<T: ZeroizeOnDrop>() {}

    #[test]
    fn test_private_exponent_is_only_zeroized_on_drop() {
        assert_zeroize_on_drop::<PrivateExponent>();
        let d = PrivateExponent(2753);
        drop(d.clone());
        assert_eq!(d.expose(), 2753);
        assert_eq!(format!("{:?}", d), "PrivateExponent(..)");
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let rsa = TextbookRsa::default();
        let encryption = rsa.encrypt(61, 53, 65).unwrap();
        assert_ne!(encryption.public_exponent, encryption.private_exponent.expose());
        let message = TextbookRsa::decrypt(
            encryption.ciphertext,
            encryption.private_exponent.expose(),
            61,
            53,
        )
        .unwrap();
        assert_eq!(message, 65);
    }

    #[test]
    fn test_rejects_non_coprime_and_oversized_messages() {
        let rsa = TextbookRsa::default();
        assert!(matches!(
            rsa.encrypt(61, 53, 122),
            Err(Error::NotCoprime { value: 122, modulus: 3233 })
        ));
        assert!(matches!(
            rsa.encrypt(61, 53, 3233),
            Err(Error::MessageTooLarge { .. })
        ));
        assert!(matches!(
            TextbookRsa::decrypt(106, 2753, 61, 53),
            Err(Error::NotCoprime { .. })
        ));
    }

    #[test]
    fn test_rejects_invalid_factors() {
        let rsa = TextbookRsa::default();
        assert!(matches!(rsa.encrypt(60, 53, 5), Err(Error::InvalidKey(_))));
        assert!(matches!(rsa.encrypt(61, 61, 5), Err(Error::InvalidKey(_))));
    }
}
