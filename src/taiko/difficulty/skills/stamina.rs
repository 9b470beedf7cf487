use crate::{
    any::difficulty::skills::{Decaying, StrainDecaySkill},
    taiko::{difficulty::object::TaikoDifficultyObject, object::HitType},
    util::limited_queue::LimitedQueue,
};

pub type Stamina = Decaying<StaminaStrain>;

/// Keeps the start times of the last two hits of each colour since those
/// are hit with the same key.
#[derive(Clone, Debug, Default)]
pub struct StaminaStrain {
    centres: LimitedQueue<f64, 2>,
    rims: LimitedQueue<f64, 2>,
}

impl StaminaStrain {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StrainDecaySkill for StaminaStrain {
    type DifficultyObject = TaikoDifficultyObject;

    const SKILL_MULTIPLIER: f64 = 1.1;
    const STRAIN_DECAY_BASE: f64 = 0.4;

    fn strain_value_of(&mut self, curr: &TaikoDifficultyObject, _: &[TaikoDifficultyObject]) -> f64 {
        let same_key = match curr.base_hit_type {
            HitType::Center => &mut self.centres,
            HitType::Rim => &mut self.rims,
            HitType::NonHit => return 0.0,
        };

        // * Find the previous hit object hit by the current key, which is two notes of the same colour prior.
        let key_prev_start_time = same_key.is_full().then(|| same_key[0]);
        same_key.push(curr.start_time);

        key_prev_start_time.map_or(0.0, |prev| StaminaEvaluator::evaluate_diff_of(curr, prev))
    }
}

struct StaminaEvaluator;

impl StaminaEvaluator {
    fn speed_bonus(interval: f64) -> f64 {
        // * Cap to 600bpm 1/4, 25ms note interval, 50ms key interval
        // * Interval will be capped at a very small value to avoid infinite/negative speed bonuses.
        30.0 / interval.max(50.0)
    }

    fn evaluate_diff_of(curr: &TaikoDifficultyObject, key_prev_start_time: f64) -> f64 {
        // * Add a base strain to all objects
        0.5 + Self::speed_bonus(curr.start_time - key_prev_start_time)
    }
}

#[cfg(test)]
mod tests {
    use crate::taiko::object::TaikoObject;

    use super::*;

    fn diff_object(idx: usize, start_time: f64, hit_type: HitType) -> TaikoDifficultyObject {
        let h = TaikoObject {
            start_time,
            end_time: start_time,
            hit_type,
        };

        let last = TaikoObject {
            start_time: start_time - 100.0,
            ..h
        };

        TaikoDifficultyObject::new(&h, &last, &last, 1.0, idx)
    }

    #[test]
    fn needs_two_previous_hits_of_same_colour() {
        let mut stamina = StaminaStrain::new();

        let values: Vec<_> = [HitType::Center, HitType::Rim, HitType::Center, HitType::Center]
            .into_iter()
            .enumerate()
            .map(|(i, hit_type)| {
                let h = diff_object(i, 100.0 * i as f64, hit_type);

                stamina.strain_value_of(&h, &[])
            })
            .collect();

        assert_eq!(&values[..3], [0.0, 0.0, 0.0]);

        // Key interval of 300ms
        assert!((values[3] - (0.5 + 0.1)).abs() < 1e-12);
    }

    #[test]
    fn non_hits_have_no_strain() {
        let mut stamina = StaminaStrain::new();

        for i in 0..4 {
            let h = diff_object(i, 100.0 * i as f64, HitType::NonHit);

            assert_eq!(stamina.strain_value_of(&h, &[]), 0.0);
        }
    }
}
