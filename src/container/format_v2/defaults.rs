// src/container/format_v2/defaults.rs
// Default limits and producer placeholders, overridable from the environment

use std::env;

// =================================
// Size limits
// =================================
pub const DEFAULT_MAX_APP_SIZE: u64 = 500 * 1024; // Per-app limit on the device
pub const MAX_APP_SIZE_ENV: &str = "APPBUNDLE_MAX_APP_SIZE";

// =================================
// Producer defaults
// =================================
pub const DEFAULT_CODE_SIZE: usize = 1024; // Placeholder code blob
pub const DEFAULT_APP_EXTENSION: &str = "app";

/// Get the maximum accepted container size from the environment or default
pub fn get_max_app_size() -> u64 {
    env::var(MAX_APP_SIZE_ENV)
        .ok()
        .and_then(|val| parse_size(&val))
        .unwrap_or(DEFAULT_MAX_APP_SIZE)
}

/// Parse a byte count with an optional `K`/`M` (binary) suffix
pub fn parse_size(value: &str) -> Option<u64> {
    let value = value.trim();
    let (digits, multiplier) = match value.chars().last()? {
        'k' | 'K' => (&value[..value.len() - 1], 1024),
        'm' | 'M' => (&value[..value.len() - 1], 1024 * 1024),
        _ => (value, 1),
    };
    digits.trim().parse::<u64>().ok()?.checked_mul(multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("33920"), Some(33920));
        assert_eq!(parse_size("500K"), Some(500 * 1024));
        assert_eq!(parse_size(" 2m "), Some(2 * 1024 * 1024));
        assert_eq!(parse_size("lots"), None);
        assert_eq!(parse_size(""), None);
    }
}
