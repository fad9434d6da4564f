//! Stateless pseudo-random values keyed by (pixel, clock).
//!
//! Every value here is a pure function of its inputs so the same frame can be
//! reproduced exactly; there is no generator state to advance.

/// One xorshift32 round. Zero is remapped since it is a fixed point.
fn xorshift32(mut x: u32) -> u32 {
    if x == 0 {
        x = 0xA5A5_1234;
    }
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    x
}

/// Hash two keys to a value in [0, 1).
pub fn hash01(a: u32, b: u32) -> f32 {
    let seed = a.wrapping_mul(0x9E37_79B9) ^ b.wrapping_mul(0x85EB_CA6B).rotate_left(16);
    let mut v = xorshift32(seed);
    v = (v ^ (v >> 16)).wrapping_mul(0x7FEB_352D);
    v ^= v >> 15;
    (v >> 8) as f32 / (1u32 << 24) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_reproducible_and_in_range() {
        for a in 0..64u32 {
            for b in 0..64u32 {
                let v = hash01(a, b);
                assert_eq!(v, hash01(a, b));
                assert!((0.0..1.0).contains(&v), "hash01({a}, {b}) = {v}");
            }
        }
    }

    #[test]
    fn hash_spreads_values() {
        let samples: Vec<f32> = (0..1000).map(|i| hash01(i, 7)).collect();
        let mean = samples.iter().sum::<f32>() / samples.len() as f32;
        assert!((mean - 0.5).abs() < 0.06, "mean {mean}");
        let low = samples.iter().filter(|&&v| v < 0.2).count();
        assert!(low > 120 && low < 280, "low bucket {low}");
    }
}
