const INT_TO_REAL: f64 = 1.0 / (i32::MAX as f64 + 1.0);
const INT_MASK: u32 = 0x7F_FF_FF_FF;

/// The xorshift generator osu! uses for legacy conversions.
///
/// Conversions rely on the exact sequence so the seed and the order of calls
/// must match.
pub struct Random {
    x: u32,
    y: u32,
    z: u32,
    w: u32,
    bit_buf: u32,
    bit_idx: i32,
}

impl Random {
    pub const fn new(seed: i32) -> Self {
        Self {
            x: seed as u32,
            y: 842_502_087,
            z: 3_579_807_591,
            w: 273_326_509,
            bit_buf: 0,
            bit_idx: 32,
        }
    }

    const fn next_u32(&mut self) -> u32 {
        let t = self.x ^ (self.x << 11);

        self.x = self.y;
        self.y = self.z;
        self.z = self.w;
        self.w = self.w ^ (self.w >> 19) ^ t ^ (t >> 8);

        self.w
    }

    /// A non-negative integer.
    pub const fn next_int(&mut self) -> i32 {
        (INT_MASK & self.next_u32()) as i32
    }

    /// A float in `0.0..1.0`.
    pub fn next_double(&mut self) -> f64 {
        INT_TO_REAL * f64::from(self.next_int())
    }

    /// A float in `min..max`, truncated.
    pub fn next_double_range(&mut self, min: f64, max: f64) -> i32 {
        (min + self.next_double() * (max - min)) as i32
    }

    /// Bools are taken from a buffered integer one bit at a time.
    pub const fn next_bool(&mut self) -> bool {
        if self.bit_idx == 32 {
            self.bit_buf = self.next_u32();
            self.bit_idx = 1;
        } else {
            self.bit_idx += 1;
            self.bit_buf >>= 1;
        }

        (self.bit_buf & 1) == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let mut a = Random::new(1337);
        let mut b = Random::new(1337);

        for _ in 0..100 {
            assert_eq!(a.next_int(), b.next_int());
        }

        assert_ne!(Random::new(1).next_int(), Random::new(2).next_int());
    }

    #[test]
    fn ranges() {
        let mut rng = Random::new(1337);

        for _ in 0..1000 {
            assert!(rng.next_int() >= 0);

            let double = rng.next_double();
            assert!((0.0..1.0).contains(&double));

            assert!((0..20).contains(&rng.next_double_range(0.0, 20.0)));
        }
    }

    #[test]
    fn bools_share_one_integer() {
        let mut bools = Random::new(42);
        let mut ints = Random::new(42);

        let bits = ints.next_u32();

        for i in 0..32 {
            assert_eq!(bools.next_bool(), (bits >> i) & 1 == 1);
        }
    }
}
