pub mod ip;
pub mod password;
pub mod time_parser;
pub mod url_validator;

/// 短码字符集（小写 base-36）
const CODE_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// 不能作为别名的路径段，避免遮蔽固定路由
pub const RESERVED_CODES: &[&str] = &["api", "health"];

const MAX_ALIAS_LEN: usize = 64;

pub fn generate_random_code(length: usize) -> String {
    (0..length)
        .map(|_| CODE_CHARSET[rand::random_range(0..CODE_CHARSET.len())] as char)
        .collect()
}

/// 校验自定义别名：1-64 位，仅允许字母、数字、`_`、`-`、`.`
pub fn is_valid_alias(alias: &str) -> bool {
    !alias.is_empty()
        && alias.len() <= MAX_ALIAS_LEN
        && alias
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        && alias != "."
        && alias != ".."
}

pub fn is_reserved_code(code: &str) -> bool {
    RESERVED_CODES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_random_code_charset_and_length() {
        for len in [4, 6, 12] {
            let code = generate_random_code(len);
            assert_eq!(code.len(), len);
            assert!(
                code.bytes().all(|b| CODE_CHARSET.contains(&b)),
                "unexpected char in {}",
                code
            );
        }
    }

    #[test]
    fn test_is_valid_alias() {
        assert!(is_valid_alias("ex1"));
        assert!(is_valid_alias("my-link_v2.0"));
        assert!(!is_valid_alias(""));
        assert!(!is_valid_alias("has space"));
        assert!(!is_valid_alias("slash/inside"));
        assert!(!is_valid_alias(".."));
        assert!(!is_valid_alias(&"a".repeat(65)));
    }

    #[test]
    fn test_reserved_codes() {
        assert!(is_reserved_code("api"));
        assert!(is_reserved_code("Health"));
        assert!(!is_reserved_code("apis"));
    }
}
