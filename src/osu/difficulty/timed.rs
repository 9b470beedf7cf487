use crate::{
    any::difficulty::mode::ModeDifficulty,
    model::beatmap::Beatmap,
    osu::{attributes::OsuDifficultyAttributes, convert::count_object, object::OsuObject},
};

use super::{
    object::OsuDifficultyObject, skills::OsuSkills, DifficultyValues, OsuDifficultySetup,
};

/// Lazily calculate the difficulty of an osu!standard map after every
/// object.
///
/// Each item is the clock rate adjusted end time of the last processed
/// object alongside the attributes up to that object.
pub struct OsuTimedDifficulty {
    skills: OsuSkills,
    attrs: OsuDifficultyAttributes,
    osu_objects: Box<[OsuObject]>,
    diff_objects: Box<[OsuDifficultyObject]>,
    clock_rate: f64,
    idx: usize,
}

impl OsuTimedDifficulty {
    pub fn new(difficulty: &ModeDifficulty, map: &Beatmap) -> Self {
        let mut setup = OsuDifficultySetup::new(difficulty, map);

        // Objects are counted one by one while iterating
        let (skills, osu_objects, diff_objects) = setup.prepare(difficulty, map, 0);

        Self {
            skills,
            attrs: setup.attrs,
            osu_objects,
            diff_objects,
            clock_rate: difficulty.get_clock_rate(),
            idx: 0,
        }
    }
}

impl Iterator for OsuTimedDifficulty {
    type Item = (f64, OsuDifficultyAttributes);

    fn next(&mut self) -> Option<Self::Item> {
        let h = self.osu_objects.get(self.idx)?;
        count_object(h, &mut self.attrs);
        let time = h.end_time() / self.clock_rate;

        // The first object has no difficulty object
        if let Some(curr) = self
            .idx
            .checked_sub(1)
            .and_then(|i| self.diff_objects.get(i))
        {
            self.skills.process(curr, &self.diff_objects);
        }

        self.idx += 1;
        DifficultyValues::eval(&mut self.attrs, &self.skills);

        Some((time, self.attrs.clone()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();

        (len, Some(len))
    }
}

impl ExactSizeIterator for OsuTimedDifficulty {
    fn len(&self) -> usize {
        self.osu_objects.len() - self.idx
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        model::hit_object::{HitObject, Pos},
        osu::difficulty::difficulty,
    };

    use super::*;

    fn stream() -> Beatmap {
        let hit_objects = (0..20)
            .map(|i| {
                let pos = Pos::new(100.0 + 12.0 * i as f32, 192.0);

                HitObject::circle(pos, 500.0 + 100.0 * f64::from(i))
            })
            .collect();

        Beatmap {
            hit_objects,
            ..Default::default()
        }
    }

    #[test]
    fn last_item_matches_full_calculation() {
        let map = stream();
        let mode_difficulty = ModeDifficulty::new().mods(64);

        let timed = OsuTimedDifficulty::new(&mode_difficulty, &map);
        assert_eq!(timed.len(), 20);

        let (time, last) = timed.last().unwrap();

        assert!((time - 2400.0 / 1.5).abs() < 1e-9);
        assert_eq!(last, difficulty(&mode_difficulty, &map));
    }

    #[test]
    fn each_item_matches_partial_calculation() {
        let map = stream();
        let timed = OsuTimedDifficulty::new(&ModeDifficulty::new(), &map);

        for (i, (_, attrs)) in timed.enumerate() {
            let expected = difficulty(&ModeDifficulty::new().passed_objects(i + 1), &map);

            assert_eq!(attrs.max_combo, expected.max_combo);
            assert!((attrs.stars - expected.stars).abs() < 1e-9, "object {i}");
        }
    }

    #[test]
    fn first_item_matches_single_object() {
        let map = stream();
        let mut timed = OsuTimedDifficulty::new(&ModeDifficulty::new(), &map);
        let (time, attrs) = timed.next().unwrap();

        assert!((time - 500.0).abs() < f64::EPSILON);
        assert_eq!(attrs.aim, 0.0);
        assert_eq!(attrs.n_circles, 1);
        assert_eq!(timed.len(), 19);

        let single = difficulty(&ModeDifficulty::new().passed_objects(1), &map);
        assert!((attrs.stars - single.stars).abs() < 1e-12);
        assert!((attrs.stars - 0.141_026_930_121_013_03).abs() < 1e-12);
    }

    #[test]
    fn empty_map_yields_nothing() {
        let mut timed = OsuTimedDifficulty::new(&ModeDifficulty::new().mods(64), &Beatmap::default());

        assert_eq!(timed.len(), 0);
        assert!(timed.next().is_none());
    }
}
