use crate::{
    any::difficulty::skills::{self, Skill},
    taiko::difficulty::{colour::ColourEncoding, object::TaikoDifficultyObject},
    util::{difficulty::norm, strains_vec::StrainsVec},
};

use self::{
    colour::{Colour, ColourStrain},
    rhythm::{Rhythm, RhythmStrain},
    stamina::{Stamina, StaminaStrain},
};

pub mod colour;
pub mod rhythm;
pub mod stamina;

const FINAL_MULTIPLIER: f64 = 0.0625;
const RHYTHM_SKILL_MULTIPLIER: f64 = 0.2 * FINAL_MULTIPLIER;
const COLOUR_SKILL_MULTIPLIER: f64 = 0.375 * FINAL_MULTIPLIER;
const STAMINA_SKILL_MULTIPLIER: f64 = 0.375 * FINAL_MULTIPLIER;

#[derive(Clone, Debug)]
pub struct TaikoSkills {
    pub colour: Skill<Colour>,
    pub rhythm: Skill<Rhythm>,
    pub stamina: Skill<Stamina>,
}

/// Ratings of all skills after their multipliers.
pub struct TaikoRatings {
    pub colour: f64,
    pub rhythm: f64,
    pub stamina: f64,
    pub combined: f64,
}

impl TaikoSkills {
    pub fn new(encoding: ColourEncoding) -> Self {
        Self {
            colour: Skill::new(Colour::new(ColourStrain::new(encoding))),
            rhythm: Skill::new(Rhythm::new(RhythmStrain::new())),
            stamina: Skill::new(Stamina::new(StaminaStrain::new())),
        }
    }

    pub fn process(&mut self, curr: &TaikoDifficultyObject, diff_objects: &[TaikoDifficultyObject]) {
        self.colour.process(curr, diff_objects);
        self.rhythm.process(curr, diff_objects);
        self.stamina.process(curr, diff_objects);
    }

    pub fn ratings(&self) -> TaikoRatings {
        TaikoRatings {
            colour: self.colour.difficulty_value() * COLOUR_SKILL_MULTIPLIER,
            rhythm: self.rhythm.difficulty_value() * RHYTHM_SKILL_MULTIPLIER,
            stamina: self.stamina.difficulty_value() * STAMINA_SKILL_MULTIPLIER,
            combined: self.combined_difficulty_value(),
        }
    }

    /// Combine the skills' peaks of each section into one peak, then reduce
    /// those.
    fn combined_difficulty_value(&self) -> f64 {
        let colour_peaks = self.colour.current_strain_peaks();
        let rhythm_peaks = self.rhythm.current_strain_peaks();
        let stamina_peaks = self.stamina.current_strain_peaks();

        let mut peaks = StrainsVec::with_capacity(colour_peaks.len());

        let zip = colour_peaks
            .iter()
            .zip(rhythm_peaks.iter())
            .zip(stamina_peaks.iter());

        for ((colour_peak, rhythm_peak), stamina_peak) in zip {
            let colour_peak = colour_peak * COLOUR_SKILL_MULTIPLIER;
            let rhythm_peak = rhythm_peak * RHYTHM_SKILL_MULTIPLIER;
            let stamina_peak = stamina_peak * STAMINA_SKILL_MULTIPLIER;

            let peak = norm(1.5, [colour_peak, stamina_peak]);
            peaks.push(norm(2.0, [peak, rhythm_peak]));
        }

        skills::difficulty_value(peaks, 0.9)
    }
}
