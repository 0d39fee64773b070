use rand::Rng;

/// Fixed bank of target texts. The session treats the chosen passage as
/// immutable for its whole lifetime.
pub const PASSAGES: &[&str] = &[
    "the quick brown fox jumps over the lazy dog while the keyboard shifts beneath your fingers",
    "every letter you press lands somewhere new, so look before you type and trust nothing",
    "muscle memory is a liability here, the only reliable guide is the key cap in front of you",
    "slow is smooth and smooth is fast, even when the home row refuses to stay home",
    "a steady rhythm beats a frantic hunt, find the letter, press it, and start the search again",
    "practice makes habits and habits make speed, but this keyboard was built to break both",
];

/// Passage by index, wrapping so any index is valid.
pub fn by_index(index: usize) -> &'static str {
    PASSAGES[index % PASSAGES.len()]
}

/// Uniformly random passage index.
pub fn random_index() -> usize {
    rand::thread_rng().gen_range(0..PASSAGES.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_is_non_empty_and_typeable() {
        assert!(!PASSAGES.is_empty());
        for passage in PASSAGES {
            assert!(!passage.is_empty());
            // Every character must be producible by the session: letters,
            // space, or the decoded punctuation set.
            for c in passage.chars() {
                assert!(
                    c.is_ascii_alphabetic() || c == ' ' || ",.;:'\"!?-".contains(c),
                    "passage contains untypeable char {:?}",
                    c
                );
            }
        }
    }

    #[test]
    fn by_index_wraps() {
        assert_eq!(by_index(0), PASSAGES[0]);
        assert_eq!(by_index(PASSAGES.len()), PASSAGES[0]);
        assert_eq!(by_index(PASSAGES.len() + 2), PASSAGES[2]);
    }

    #[test]
    fn random_index_stays_in_bounds() {
        for _ in 0..20 {
            assert!(random_index() < PASSAGES.len());
        }
    }
}
