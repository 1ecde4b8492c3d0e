//! 密码哈希工具模块
//!
//! 使用 Argon2id 算法进行密码哈希和验证

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use subtle::ConstantTimeEq;

use crate::errors::{LinkPulseError, Result};

/// 对密码进行 Argon2id 哈希
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| LinkPulseError::validation(format!("Password hash error: {}", e)))
}

/// 检测字符串是否是 Argon2 哈希格式
pub fn is_argon2_hash(s: &str) -> bool {
    s.starts_with("$argon2")
}

/// 校验输入密码与配置中的密码
///
/// 配置值为 Argon2 哈希时按哈希验证，否则按明文做常量时间比较。
pub fn verify_password(input: &str, stored: &str) -> Result<bool> {
    if stored.is_empty() {
        return Ok(false);
    }

    if is_argon2_hash(stored) {
        let parsed = PasswordHash::new(stored)
            .map_err(|e| LinkPulseError::config(format!("Invalid password hash: {}", e)))?;
        return Ok(Argon2::default()
            .verify_password(input.as_bytes(), &parsed)
            .is_ok());
    }

    Ok(input.as_bytes().ct_eq(stored.as_bytes()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("s3cret").unwrap();
        assert!(is_argon2_hash(&hash));
        assert!(verify_password("s3cret", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_plaintext_compare() {
        assert!(verify_password("s3cret", "s3cret").unwrap());
        assert!(!verify_password("s3cre", "s3cret").unwrap());
        assert!(!verify_password("", "s3cret").unwrap());
    }

    #[test]
    fn test_empty_stored_never_matches() {
        assert!(!verify_password("", "").unwrap());
        assert!(!verify_password("anything", "").unwrap());
    }

    #[test]
    fn test_malformed_hash_is_error() {
        assert!(verify_password("x", "$argon2id$broken").is_err());
    }
}
