use std::cmp;

use crate::{
    any::difficulty::mode::ModeDifficulty,
    model::beatmap::Beatmap,
    taiko::{attributes::TaikoDifficultyAttributes, object::TaikoObject},
};

use self::{
    colour::ColourEncoding,
    object::TaikoDifficultyObject,
    skills::{TaikoRatings, TaikoSkills},
};

mod colour;
pub mod object;
mod rhythm;
pub mod skills;
pub mod timed;

pub fn difficulty(difficulty: &ModeDifficulty, map: &Beatmap) -> TaikoDifficultyAttributes {
    let DifficultyValues { skills, mut attrs } = DifficultyValues::calculate(difficulty, map);

    DifficultyValues::eval(&mut attrs, &skills);

    attrs
}

fn rescale(stars: f64) -> f64 {
    if stars < 0.0 {
        stars
    } else {
        10.43 * (stars / 8.0 + 1.0).ln()
    }
}

pub struct DifficultyValues {
    pub skills: TaikoSkills,
    pub attrs: TaikoDifficultyAttributes,
}

impl DifficultyValues {
    pub fn calculate(difficulty: &ModeDifficulty, map: &Beatmap) -> Self {
        let take = difficulty.get_passed_objects();

        let mut attrs = Self::initial_attrs(difficulty, map);
        let taiko_objects = TaikoObject::from_map(map);

        attrs.max_combo = taiko_objects
            .iter()
            .take(take)
            .filter(|h| h.is_hit())
            .count() as u32;

        let (encoding, diff_objects) =
            Self::create_difficulty_objects(&taiko_objects, difficulty.get_clock_rate());

        let mut skills = TaikoSkills::new(encoding);

        // The first two hit objects have no difficulty object
        let take_diff_objects = cmp::min(taiko_objects.len(), take).saturating_sub(2);

        for curr in diff_objects.iter().take(take_diff_objects) {
            skills.process(curr, &diff_objects);
        }

        Self { skills, attrs }
    }

    /// Attributes that do not depend on the processed objects.
    pub fn initial_attrs(difficulty: &ModeDifficulty, map: &Beatmap) -> TaikoDifficultyAttributes {
        let great_hit_window = map
            .attributes()
            .difficulty(difficulty)
            .hit_windows()
            .od;

        TaikoDifficultyAttributes {
            great_hit_window,
            is_convert: map.is_convert,
            mods: difficulty.get_mods().clone(),
            ..Default::default()
        }
    }

    /// Process the difficulty values and store the results in `attrs`.
    pub fn eval(attrs: &mut TaikoDifficultyAttributes, skills: &TaikoSkills) {
        let TaikoRatings {
            colour,
            rhythm,
            stamina,
            combined,
        } = skills.ratings();

        let mut star_rating = rescale(combined * 1.4);

        // * TODO: This is temporary measure as we don't detect abuse of multiple-input
        // * playstyles of converts within the current system.
        if attrs.is_convert {
            star_rating *= 0.925;

            // * For maps with low colour variance and high stamina requirement,
            // * multiple inputs are more likely to be abused.
            if colour < 2.0 && stamina > 8.0 {
                star_rating *= 0.8;
            }
        }

        attrs.stamina = stamina;
        attrs.rhythm = rhythm;
        attrs.colour = colour;
        attrs.peak = combined;
        attrs.stars = star_rating;
    }

    /// Create a difficulty object for every object but the first two and
    /// encode their colours.
    pub fn create_difficulty_objects(
        taiko_objects: &[TaikoObject],
        clock_rate: f64,
    ) -> (ColourEncoding, Box<[TaikoDifficultyObject]>) {
        let mut diff_objects: Box<[_]> = taiko_objects
            .windows(3)
            .enumerate()
            .map(|(i, w)| TaikoDifficultyObject::new(&w[2], &w[1], &w[0], clock_rate, i))
            .collect();

        let encoding = ColourEncoding::new(&mut diff_objects);

        (encoding, diff_objects)
    }
}
