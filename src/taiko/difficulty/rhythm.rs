/// How the time since the previous object relates to the one before.
#[derive(Copy, Clone, Debug)]
pub struct HitObjectRhythm {
    id: u8,
    pub ratio: f64,
    pub difficulty: f64,
}

impl HitObjectRhythm {
    /// The rhythm in [`COMMON_RHYTHMS`] whose ratio is closest to
    /// `delta_time / prev_delta_time`.
    pub fn closest(delta_time: f64, prev_delta_time: f64) -> Self {
        let ratio = delta_time / prev_delta_time;

        COMMON_RHYTHMS
            .iter()
            .copied()
            .min_by(|r1, r2| {
                (r1.ratio - ratio)
                    .abs()
                    .total_cmp(&(r2.ratio - ratio).abs())
            })
            .unwrap_or_default()
    }
}

impl Default for HitObjectRhythm {
    fn default() -> Self {
        COMMON_RHYTHMS[0]
    }
}

impl PartialEq for HitObjectRhythm {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for HitObjectRhythm {}

#[rustfmt::skip]
pub static COMMON_RHYTHMS: [HitObjectRhythm; 9] = [
    HitObjectRhythm { id: 0, ratio: 1.0, difficulty: 0.0 },
    HitObjectRhythm { id: 1, ratio: 2.0 / 1.0, difficulty: 0.3 },
    HitObjectRhythm { id: 2, ratio: 1.0 / 2.0, difficulty: 0.5 },
    HitObjectRhythm { id: 3, ratio: 3.0 / 1.0, difficulty: 0.3 },
    HitObjectRhythm { id: 4, ratio: 1.0 / 3.0, difficulty: 0.35 },
    // * purposefully higher (requires hand switch in full alternating gameplay style)
    HitObjectRhythm { id: 5, ratio: 3.0 / 2.0, difficulty: 0.6 },
    HitObjectRhythm { id: 6, ratio: 2.0 / 3.0, difficulty: 0.4 },
    HitObjectRhythm { id: 7, ratio: 5.0 / 4.0, difficulty: 0.5 },
    HitObjectRhythm { id: 8, ratio: 4.0 / 5.0, difficulty: 0.7 },
];
