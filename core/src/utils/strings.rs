//! Author: [Seclususs](https://github.com/seclususs)

#[inline]
pub fn validate_value(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '.' | ',' | '-' | '_' | '=' | ' '))
}

#[inline]
pub fn validate_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '_' || c == '-')
}
