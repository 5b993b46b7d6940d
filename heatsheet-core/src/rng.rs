/// Deterministic randomness for race builds.
///
/// A seed string is hashed (FNV-1a) into a xorshift64* stream of f64
/// values in [0,1). The same seed produces the same sequence on every
/// platform, which is what makes plans reproducible. Child streams are
/// made by constructing from a derived seed string (`"{seed}-gates"`
/// etc.) and share no state with their parent.
///
/// Not cryptographically secure; never use for secrets.
const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// xorshift64* locks up at state zero; seeds hashing to zero are
/// remapped to this arbitrary non-zero constant.
const ZERO_STATE_FALLBACK: u64 = 0x9e37_79b9_7f4a_7c15;

/// Deterministic RNG with a single 64-bit state, seeded from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedStream {
    state: u64,
}

impl SeedStream {
    pub fn new(seed: &str) -> Self {
        let mut hash = FNV_OFFSET_BASIS;
        for byte in seed.bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        let state = if hash == 0 { ZERO_STATE_FALLBACK } else { hash };
        SeedStream { state }
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_f491_4f6c_dd1d)
    }

    /// Next value in [0,1), with 53 bits of precision.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Fisher–Yates shuffle driven by a seed stream.
///
/// Iterates from the last index down to index 1, drawing
/// `j = floor(next_f64() * (i + 1))` and swapping i with j. The stop at
/// index 1 (not 0) is a literal contract: changing the boundary changes
/// every generated plan.
pub fn shuffle<T>(items: &mut [T], stream: &mut SeedStream) {
    for i in (1..items.len()).rev() {
        let j = (stream.next_f64() * (i as f64 + 1.0)) as usize;
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SeedStream::new("race-42");
        let mut b = SeedStream::new("race-42");
        for _ in 0..100 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn test_values_in_unit_interval() {
        let mut stream = SeedStream::new("bounds-check");
        for _ in 0..10_000 {
            let v = stream.next_f64();
            assert!((0.0..1.0).contains(&v), "value {v} outside [0,1)");
        }
    }

    #[test]
    fn test_distinct_seeds_diverge() {
        // Two of twenty differently-seeded streams agreeing on their
        // first draw is fine; all twenty agreeing means the seed hash
        // is broken.
        let firsts: Vec<f64> = (0..20)
            .map(|n| SeedStream::new(&format!("seed-{n}")).next_f64())
            .collect();
        let all_equal = firsts.iter().all(|&v| v == firsts[0]);
        assert!(!all_equal);
    }

    #[test]
    fn test_child_stream_independent_of_parent() {
        let mut parent = SeedStream::new("race-42");
        let child_before: Vec<f64> = {
            let mut c = SeedStream::new("race-42-gates");
            (0..10).map(|_| c.next_f64()).collect()
        };
        // Advancing the parent must not perturb a fresh child stream.
        for _ in 0..50 {
            parent.next_f64();
        }
        let mut child_after = SeedStream::new("race-42-gates");
        let after: Vec<f64> = (0..10).map(|_| child_after.next_f64()).collect();
        assert_eq!(child_before, after);
    }

    #[test]
    fn test_empty_seed_does_not_lock_up() {
        let mut stream = SeedStream::new("");
        let a = stream.next_f64();
        let b = stream.next_f64();
        assert_ne!(a, b);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut items: Vec<u32> = (0..50).collect();
        let mut stream = SeedStream::new("shuffle-perm");
        shuffle(&mut items, &mut stream);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<u32>>());
    }

    #[test]
    fn test_shuffle_deterministic() {
        let mut a: Vec<u32> = (0..30).collect();
        let mut b: Vec<u32> = (0..30).collect();
        shuffle(&mut a, &mut SeedStream::new("det"));
        shuffle(&mut b, &mut SeedStream::new("det"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_degenerate_lengths() {
        let mut empty: Vec<u32> = Vec::new();
        shuffle(&mut empty, &mut SeedStream::new("x"));
        assert!(empty.is_empty());

        let mut single = vec![7u32];
        shuffle(&mut single, &mut SeedStream::new("x"));
        assert_eq!(single, vec![7]);
    }
}
