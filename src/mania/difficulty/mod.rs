use std::cmp;

use crate::{
    any::difficulty::{mode::ModeDifficulty, skills::Skill},
    mania::{attributes::ManiaDifficultyAttributes, object::ManiaObject},
    model::beatmap::Beatmap,
};

use self::{object::ManiaDifficultyObject, strain::Strain};

pub mod object;
pub mod strain;
pub mod timed;

const DIFFICULTY_MULTIPLIER: f64 = 0.018;

pub fn difficulty(difficulty: &ModeDifficulty, map: &Beatmap) -> ManiaDifficultyAttributes {
    let DifficultyValues { strain, mut attrs } = DifficultyValues::calculate(difficulty, map);

    DifficultyValues::eval(&mut attrs, &strain);

    attrs
}

pub struct DifficultyValues {
    pub strain: Skill<Strain>,
    pub attrs: ManiaDifficultyAttributes,
}

impl DifficultyValues {
    pub fn calculate(difficulty: &ModeDifficulty, map: &Beatmap) -> Self {
        let take = difficulty.get_passed_objects();

        let mut attrs = Self::initial_attrs(difficulty, map);
        let mania_objects = ManiaObject::from_map(map);

        for h in mania_objects.iter().take(take) {
            attrs.n_objects += 1;
            attrs.max_combo += h.max_combo();
        }

        let diff_objects =
            Self::create_difficulty_objects(&mania_objects, difficulty.get_clock_rate());

        let mut strain = Skill::new(Self::new_strain(map));

        // The first object has no difficulty object
        let take_diff_objects = cmp::min(mania_objects.len(), take).saturating_sub(1);

        for curr in diff_objects.iter().take(take_diff_objects) {
            strain.process(curr, &diff_objects);
        }

        Self { strain, attrs }
    }

    pub fn new_strain(map: &Beatmap) -> Strain {
        Strain::new(ManiaObject::total_columns(map) as usize)
    }

    /// Attributes that do not depend on the processed objects.
    pub fn initial_attrs(difficulty: &ModeDifficulty, map: &Beatmap) -> ManiaDifficultyAttributes {
        let hit_window = map
            .attributes()
            .difficulty(difficulty)
            .hit_windows()
            .od;

        ManiaDifficultyAttributes {
            hit_window,
            is_convert: map.is_convert,
            mods: difficulty.get_mods().clone(),
            ..Default::default()
        }
    }

    /// Process the difficulty values and store the results in `attrs`.
    pub fn eval(attrs: &mut ManiaDifficultyAttributes, strain: &Skill<Strain>) {
        attrs.stars = strain.difficulty_value() * DIFFICULTY_MULTIPLIER;
    }

    /// Create a difficulty object for every object but the first.
    pub fn create_difficulty_objects(
        mania_objects: &[ManiaObject],
        clock_rate: f64,
    ) -> Box<[ManiaDifficultyObject]> {
        mania_objects
            .windows(2)
            .enumerate()
            .map(|(i, w)| ManiaDifficultyObject::new(&w[1], &w[0], clock_rate, i))
            .collect()
    }
}
