use std::f64::consts::E;

use crate::{
    any::difficulty::skills::{Decaying, StrainDecaySkill},
    taiko::difficulty::{
        colour::{ColourEncoding, TaikoDifficultyColour},
        object::TaikoDifficultyObject,
    },
};

pub type Colour = Decaying<ColourStrain>;

#[derive(Clone, Debug)]
pub struct ColourStrain {
    encoding: ColourEncoding,
}

impl ColourStrain {
    pub const fn new(encoding: ColourEncoding) -> Self {
        Self { encoding }
    }
}

impl StrainDecaySkill for ColourStrain {
    type DifficultyObject = TaikoDifficultyObject;

    const SKILL_MULTIPLIER: f64 = 0.12;
    const STRAIN_DECAY_BASE: f64 = 0.8;

    fn strain_value_of(&mut self, curr: &TaikoDifficultyObject, _: &[TaikoDifficultyObject]) -> f64 {
        ColourEvaluator::new(&self.encoding).evaluate_diff_of(&curr.colour)
    }
}

struct ColourEvaluator<'a> {
    encoding: &'a ColourEncoding,
}

impl<'a> ColourEvaluator<'a> {
    const fn new(encoding: &'a ColourEncoding) -> Self {
        Self { encoding }
    }

    fn sigmoid(val: f64, center: f64, width: f64, middle: f64, height: f64) -> f64 {
        let sigmoid = (E * -(val - center) / width).tanh();

        sigmoid * (height / 2.0) + middle
    }

    fn evaluate_diff_of_mono_streak(&self, idx: usize) -> f64 {
        let Some(mono_streak) = self.encoding.mono_streaks.get(idx) else {
            return 0.0;
        };

        let parent_eval = self.evaluate_diff_of_alternating_mono_pattern(mono_streak.parent);

        Self::sigmoid(mono_streak.idx as f64, 2.0, 2.0, 0.5, 1.0) * parent_eval * 0.5
    }

    fn evaluate_diff_of_alternating_mono_pattern(&self, idx: usize) -> f64 {
        let Some(pattern) = self.encoding.alternating_mono_patterns.get(idx) else {
            return 0.0;
        };

        let parent_eval = self.evaluate_diff_of_repeating_hit_patterns(pattern.parent);

        Self::sigmoid(pattern.idx as f64, 2.0, 2.0, 0.5, 1.0) * parent_eval
    }

    fn evaluate_diff_of_repeating_hit_patterns(&self, idx: usize) -> f64 {
        let Some(pattern) = self.encoding.repeating_hit_patterns.get(idx) else {
            return 0.0;
        };

        let repetition_interval = pattern.repetition_interval as f64;

        2.0 * (1.0 - Self::sigmoid(repetition_interval, 2.0, 2.0, 0.5, 1.0))
    }

    fn evaluate_diff_of(&self, colour: &TaikoDifficultyColour) -> f64 {
        let mut difficulty = 0.0;

        if let Some(idx) = colour.mono_streak {
            difficulty += self.evaluate_diff_of_mono_streak(idx);
        }

        if let Some(idx) = colour.alternating_mono_pattern {
            difficulty += self.evaluate_diff_of_alternating_mono_pattern(idx);
        }

        if let Some(idx) = colour.repeating_hit_patterns {
            difficulty += self.evaluate_diff_of_repeating_hit_patterns(idx);
        }

        difficulty
    }
}
