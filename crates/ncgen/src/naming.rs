//! Program name generation.

/// Supplies a program name when the configuration does not set one.
pub trait NameGenerator {
    /// Produce the next name.
    fn next_name(&mut self) -> String;
}

/// Deterministic three-digit names from a seeded splitmix64 sequence.
#[derive(Debug, Clone)]
pub struct SeededNames {
    state: u64,
}

impl SeededNames {
    /// Seed used by [`SeededNames::default`].
    pub const DEFAULT_SEED: u64 = 0x5eed_0c0d_e000_0001;

    /// Create a generator from a seed.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }
}

impl Default for SeededNames {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

impl NameGenerator for SeededNames {
    fn next_name(&mut self) -> String {
        format!("{:03}", self.next_u64() % 1000)
    }
}

/// Always returns the same name.
#[derive(Debug, Clone)]
pub struct FixedName(pub String);

impl NameGenerator for FixedName {
    fn next_name(&mut self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_names_are_three_digits() {
        let mut names = SeededNames::new(7);
        for _ in 0..100 {
            let name = names.next_name();
            assert_eq!(name.len(), 3);
            assert!(name.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_seeded_names_reproducible() {
        let mut a = SeededNames::new(42);
        let mut b = SeededNames::new(42);
        for _ in 0..10 {
            assert_eq!(a.next_name(), b.next_name());
        }
    }

    #[test]
    fn test_fixed_name() {
        let mut names = FixedName("abc".into());
        assert_eq!(names.next_name(), "abc");
        assert_eq!(names.next_name(), "abc");
    }
}
