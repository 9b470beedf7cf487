use crate::{
    any::difficulty::skills::{Decaying, StrainDecaySkill},
    taiko::difficulty::{object::TaikoDifficultyObject, rhythm::HitObjectRhythm},
    util::limited_queue::LimitedQueue,
};

const HISTORY_MAX_LEN: usize = 8;

pub type Rhythm = Decaying<RhythmStrain>;

#[derive(Clone, Debug, Default)]
pub struct RhythmStrain {
    /// Separate from the decaying strain of the skill.
    curr_strain: f64,
    notes_since_rhythm_change: usize,
    history: LimitedQueue<HistoryElement, HISTORY_MAX_LEN>,
}

impl RhythmStrain {
    const STRAIN_DECAY: f64 = 0.96;

    pub fn new() -> Self {
        Self::default()
    }

    fn reset_rhythm_and_strain(&mut self) {
        self.curr_strain = 0.0;
        self.notes_since_rhythm_change = 0;
    }

    fn repetition_penalties(&mut self, curr: &TaikoDifficultyObject) -> f64 {
        let mut penalty = 1.0;

        self.history.push(HistoryElement::new(curr));

        let max_pattern_len = (HISTORY_MAX_LEN / 2).min(self.history.len());

        for most_recent_patterns_to_compare in 2..=max_pattern_len {
            let start = (0..self.history.len() - most_recent_patterns_to_compare)
                .rev()
                .find(|&start| self.same_pattern(start, most_recent_patterns_to_compare));

            if let Some(start) = start {
                let notes_since = curr.idx - self.history[start].idx;
                penalty *= Self::repetition_penalty(notes_since);
            }
        }

        penalty
    }

    fn same_pattern(&self, start: usize, most_recent_patterns_to_compare: usize) -> bool {
        let most_recent = self
            .history
            .iter()
            .skip(self.history.len() - most_recent_patterns_to_compare);

        self.history
            .iter()
            .skip(start)
            .zip(most_recent)
            .all(|(a, b)| a.rhythm == b.rhythm)
    }

    fn repetition_penalty(notes_since: usize) -> f64 {
        (0.032 * notes_since as f64).min(1.0)
    }

    fn pattern_len_penalty(pattern_len: usize) -> f64 {
        let pattern_len = pattern_len as f64;
        let short_pattern_penalty = (0.15 * pattern_len).min(1.0);
        let long_pattern_penalty = (2.5 - 0.15 * pattern_len).clamp(0.0, 1.0);

        short_pattern_penalty.min(long_pattern_penalty)
    }

    fn speed_penalty(&mut self, delta_time: f64) -> f64 {
        if delta_time < 80.0 {
            1.0
        } else if delta_time < 210.0 {
            (1.4 - 0.005 * delta_time).max(0.0)
        } else {
            self.reset_rhythm_and_strain();

            0.0
        }
    }
}

impl StrainDecaySkill for RhythmStrain {
    type DifficultyObject = TaikoDifficultyObject;

    const SKILL_MULTIPLIER: f64 = 10.0;
    const STRAIN_DECAY_BASE: f64 = 0.0;

    fn strain_value_of(&mut self, curr: &TaikoDifficultyObject, _: &[TaikoDifficultyObject]) -> f64 {
        // * drum rolls and swells are exempt.
        if !curr.is_hit() {
            self.reset_rhythm_and_strain();

            return 0.0;
        }

        self.curr_strain *= Self::STRAIN_DECAY;
        self.notes_since_rhythm_change += 1;

        // * rhythm difficulty zero (due to rhythm not changing) => no rhythm strain.
        if curr.rhythm.difficulty.abs() <= f64::EPSILON {
            return 0.0;
        }

        let mut obj_strain = curr.rhythm.difficulty;

        obj_strain *= self.repetition_penalties(curr);
        obj_strain *= Self::pattern_len_penalty(self.notes_since_rhythm_change);
        obj_strain *= self.speed_penalty(curr.delta_time);

        // * careful - needs to be done here since calls above read this value
        self.notes_since_rhythm_change = 0;

        self.curr_strain += obj_strain;

        self.curr_strain
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct HistoryElement {
    idx: usize,
    rhythm: HitObjectRhythm,
}

impl HistoryElement {
    const fn new(diff_object: &TaikoDifficultyObject) -> Self {
        Self {
            idx: diff_object.idx,
            rhythm: diff_object.rhythm,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::taiko::object::{HitType, TaikoObject};

    use super::*;

    fn diff_objects(times: &[f64], hit_type: HitType) -> Vec<TaikoDifficultyObject> {
        let objects: Vec<_> = times
            .iter()
            .map(|&start_time| TaikoObject {
                start_time,
                end_time: start_time,
                hit_type,
            })
            .collect();

        objects
            .windows(3)
            .enumerate()
            .map(|(i, w)| TaikoDifficultyObject::new(&w[2], &w[1], &w[0], 1.0, i))
            .collect()
    }

    #[test]
    fn constant_rhythm_has_no_strain() {
        let times: Vec<_> = (0..16).map(|i| 60.0 * f64::from(i)).collect();
        let objects = diff_objects(&times, HitType::Center);
        let mut rhythm = RhythmStrain::new();

        assert!(objects.iter().all(|h| rhythm.strain_value_of(h, &objects) == 0.0));
    }

    #[test]
    fn rhythm_change_adds_strain() {
        let objects = diff_objects(&[0.0, 60.0, 120.0, 180.0, 240.0, 270.0], HitType::Center);
        let mut rhythm = RhythmStrain::new();

        let last = objects
            .iter()
            .map(|h| rhythm.strain_value_of(h, &objects))
            .last()
            .unwrap();

        assert!(last > 0.0);
    }

    #[test]
    fn slow_changes_reset() {
        let objects = diff_objects(&[0.0, 300.0, 600.0, 1200.0], HitType::Center);
        let mut rhythm = RhythmStrain::new();

        for h in objects.iter() {
            assert_eq!(rhythm.strain_value_of(h, &objects), 0.0);
        }
    }

    #[test]
    fn non_hits_are_exempt() {
        let objects = diff_objects(&[0.0, 60.0, 120.0, 150.0], HitType::NonHit);
        let mut rhythm = RhythmStrain::new();

        assert_eq!(rhythm.strain_value_of(&objects[1], &objects), 0.0);
    }
}
