#![allow(dead_code)]

pub const COUNT: usize = 4096;

#[derive(Debug, Clone, Copy)]
pub enum Pattern {
    Constant,
    Sequential,
    Alternating,
    Random,
    Extremes,
}

pub const ALL_PATTERNS: [Pattern; 5] = [
    Pattern::Constant,
    Pattern::Sequential,
    Pattern::Alternating,
    Pattern::Random,
    Pattern::Extremes,
];

pub const COUNTS: [usize; 9] = [0, 1, 2, 31, 32, 33, 129, 1000, COUNT];

/// Deterministic 64 bit generator (SplitMix64).
pub struct Rng(u64);

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    pub fn below(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }
}

pub fn generate_i64(count: usize, pattern: Pattern) -> Vec<i64> {
    let mut rng = Rng::new(count as u64);
    (0..count)
        .map(|i| match pattern {
            Pattern::Constant => 42,
            Pattern::Sequential => i as i64 * 7 - 1000,
            Pattern::Alternating => {
                if i % 2 == 0 {
                    -(i as i64)
                } else {
                    i as i64 * 3
                }
            }
            Pattern::Random => rng.next_u64() as i64,
            Pattern::Extremes => match rng.below(3) {
                0 => i64::MIN,
                1 => i64::MAX,
                _ => 0,
            },
        })
        .collect()
}

pub fn generate_i32(count: usize, pattern: Pattern) -> Vec<i32> {
    let mut rng = Rng::new(count as u64 + 1);
    match pattern {
        Pattern::Random => (0..count).map(|_| rng.next_u64() as i32).collect(),
        Pattern::Extremes => (0..count)
            .map(|_| match rng.below(3) {
                0 => i32::MIN,
                1 => i32::MAX,
                _ => -1,
            })
            .collect(),
        _ => generate_i64(count, pattern)
            .into_iter()
            .map(|v| v as i32)
            .collect(),
    }
}

/// Byte strings that often share a prefix with their predecessor.
pub fn generate_strings(count: usize, seed: u64) -> Vec<Vec<u8>> {
    let mut rng = Rng::new(seed);
    let mut values: Vec<Vec<u8>> = Vec::with_capacity(count);
    for _ in 0..count {
        let mut value = match values.last() {
            Some(last) if rng.below(4) != 0 => last[..rng.below(last.len() + 1)].to_vec(),
            _ => Vec::new(),
        };
        let suffix_len = rng.below(12);
        value.extend((0..suffix_len).map(|_| rng.next_u64() as u8));
        values.push(value);
    }
    values
}

pub fn as_slices(values: &[Vec<u8>]) -> Vec<&[u8]> {
    values.iter().map(|v| v.as_slice()).collect()
}
