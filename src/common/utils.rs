//! 整数工具函数，供周期选择与 RSA 共用。

/// 欧几里得算法求最大公约数，`gcd(0, 0) == 0`
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// 一组数的最大公约数，空序列返回 0
pub fn gcd_all<I: IntoIterator<Item = u64>>(values: I) -> u64 {
    values.into_iter().fold(0, gcd)
}

/// 计算 `base^exp mod modulus`，中间结果使用 `u128` 防止溢出
pub fn mod_pow(base: u64, mut exp: u64, modulus: u64) -> u64 {
    if modulus == 1 {
        return 0;
    }
    let m = modulus as u128;
    let mut result: u128 = 1;
    let mut base = base as u128 % m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * base % m;
        }
        base = base * base % m;
        exp >>= 1;
    }
    result as u64
}

/// 扩展欧几里得求 `a` 模 `modulus` 的逆元，不存在时返回 `None`
pub fn mod_inverse(a: u64, modulus: u64) -> Option<u64> {
    if modulus == 0 {
        return None;
    }
    let (mut old_r, mut r) = (a as i128 % modulus as i128, modulus as i128);
    let (mut old_s, mut s) = (1i128, 0i128);
    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
    }
    if old_r != 1 {
        return None;
    }
    Some(old_s.rem_euclid(modulus as i128) as u64)
}
