/// Tax/service percentage a freshly created bill starts with.
pub const DEFAULT_TAX_SERVICE_RATE: f64 = 10.0;

/// Accepted tax/service percentage range.
pub const MIN_TAX_SERVICE_RATE: f64 = 0.0;
pub const MAX_TAX_SERVICE_RATE: f64 = 100.0;

/// Currency prefix used when none is given on the command line.
pub const DEFAULT_CURRENCY: &str = "Rp";

// ─────────────────────────────────────────────────────────────────────────────
// Lookup and id generation
// ─────────────────────────────────────────────────────────────────────────────

/// Minimum Jaro-Winkler similarity for a fuzzy item-name match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.8;

/// Maximum number of fuzzy candidates offered to the user.
pub const FUZZY_MAX_CANDIDATES: usize = 5;

/// Random alphanumeric characters appended to generated ids.
pub const ID_SUFFIX_LEN: usize = 8;

/// Whether a tax/service rate is a usable percentage.
pub fn is_valid_rate(rate: f64) -> bool {
    rate.is_finite() && (MIN_TAX_SERVICE_RATE..=MAX_TAX_SERVICE_RATE).contains(&rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_bounds() {
        assert!(is_valid_rate(0.0));
        assert!(is_valid_rate(10.5));
        assert!(is_valid_rate(100.0));
        assert!(!is_valid_rate(-0.1));
        assert!(!is_valid_rate(100.1));
        assert!(!is_valid_rate(f64::NAN));
    }
}
