/// Compare two strings byte for byte in constant time.
///
/// Equality is exact: no case folding, no trimming. Only the length check
/// short-circuits.
pub fn constant_time_eq(provided: &str, expected: &str) -> bool {
    provided.len() == expected.len()
        && provided
            .as_bytes()
            .iter()
            .zip(expected.as_bytes().iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

/// Verify the admin API key.
///
/// An empty configured key never matches anything.
pub fn verify_api_key(provided: &str, expected: &str) -> bool {
    !expected.is_empty() && constant_time_eq(provided, expected)
}
