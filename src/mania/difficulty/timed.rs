use crate::{
    any::difficulty::{mode::ModeDifficulty, skills::Skill},
    mania::{attributes::ManiaDifficultyAttributes, object::ManiaObject},
    model::beatmap::Beatmap,
};

use super::{object::ManiaDifficultyObject, strain::Strain, DifficultyValues};

/// Lazily calculate the difficulty of an osu!mania map after every object.
pub struct ManiaTimedDifficulty {
    strain: Skill<Strain>,
    attrs: ManiaDifficultyAttributes,
    mania_objects: Box<[ManiaObject]>,
    diff_objects: Box<[ManiaDifficultyObject]>,
    clock_rate: f64,
    idx: usize,
}

impl ManiaTimedDifficulty {
    pub fn new(difficulty: &ModeDifficulty, map: &Beatmap) -> Self {
        let clock_rate = difficulty.get_clock_rate();
        let mania_objects = ManiaObject::from_map(map);
        let diff_objects = DifficultyValues::create_difficulty_objects(&mania_objects, clock_rate);

        Self {
            strain: Skill::new(DifficultyValues::new_strain(map)),
            attrs: DifficultyValues::initial_attrs(difficulty, map),
            mania_objects,
            diff_objects,
            clock_rate,
            idx: 0,
        }
    }
}

impl Iterator for ManiaTimedDifficulty {
    type Item = (f64, ManiaDifficultyAttributes);

    fn next(&mut self) -> Option<Self::Item> {
        let h = self.mania_objects.get(self.idx)?;
        self.attrs.n_objects += 1;
        self.attrs.max_combo += h.max_combo();
        let time = h.end_time / self.clock_rate;

        if let Some(curr) = self
            .idx
            .checked_sub(1)
            .and_then(|i| self.diff_objects.get(i))
        {
            self.strain.process(curr, &self.diff_objects);
        }

        self.idx += 1;
        DifficultyValues::eval(&mut self.attrs, &self.strain);

        Some((time, self.attrs.clone()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();

        (len, Some(len))
    }
}

impl ExactSizeIterator for ManiaTimedDifficulty {
    fn len(&self) -> usize {
        self.mania_objects.len() - self.idx
    }
}

#[cfg(test)]
mod tests {
    use crate::mania::difficulty::{difficulty, tests::rolls};

    use super::*;

    #[test]
    fn last_item_matches_full_calculation() {
        let map = rolls(32, 120.0);
        let mode_difficulty = ModeDifficulty::new().mods(256);

        let timed = ManiaTimedDifficulty::new(&mode_difficulty, &map);
        assert_eq!(timed.len(), 32);

        let (time, last) = timed.last().unwrap();

        // The last object is a hold note
        assert!((time - (1000.0 + 31.0 * 120.0 + 400.0) / 0.75).abs() < 1e-9);
        assert_eq!(last, difficulty(&mode_difficulty, &map));
    }

    #[test]
    fn each_item_matches_partial_calculation() {
        let map = rolls(24, 120.0);
        let timed = ManiaTimedDifficulty::new(&ModeDifficulty::new(), &map);

        for (i, (_, attrs)) in timed.enumerate() {
            let expected = difficulty(&ModeDifficulty::new().passed_objects(i + 1), &map);

            assert_eq!(attrs.max_combo, expected.max_combo);
            assert!((attrs.stars - expected.stars).abs() < 1e-9, "object {i}");
        }
    }
}
