//! Difficulty progression helpers
//!
//! Every family maps the difficulty signal (correct answers so far) to
//! structural parameters through monotone step functions that clamp at the
//! top tier.

/// `floor(signal * num / den)` without overflow
pub fn scaled(signal: u32, num: u32, den: u32) -> u32 {
    let den = u64::from(den.max(1));
    (u64::from(signal) * u64::from(num) / den).min(u64::from(u32::MAX)) as u32
}

/// `min(base + increment, cap)`
pub fn capped(base: u32, increment: u32, cap: u32) -> u32 {
    base.saturating_add(increment).min(cap)
}

/// Table row for `signal`, clamped to the last row
pub fn table_entry<T>(table: &[T], signal: u32) -> &T {
    let idx = (signal as usize).min(table.len().saturating_sub(1));
    &table[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_matches_fractional_divisors() {
        // floor(n / 3.5)
        assert_eq!(scaled(6, 2, 7), 1);
        assert_eq!(scaled(7, 2, 7), 2);
        assert_eq!(scaled(u32::MAX, 2, 7), (u64::from(u32::MAX) * 2 / 7) as u32);
        // floor(n / 1.5)
        assert_eq!(scaled(4, 2, 3), 2);
    }

    #[test]
    fn test_capped() {
        assert_eq!(capped(10, 9, 99), 19);
        assert_eq!(capped(10, u32::MAX, 99), 99);
    }

    #[test]
    fn test_table_entry_clamps() {
        let table = [1, 2, 3];
        assert_eq!(*table_entry(&table, 0), 1);
        assert_eq!(*table_entry(&table, 2), 3);
        assert_eq!(*table_entry(&table, 500), 3);
    }
}
