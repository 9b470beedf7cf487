use crate::{any::difficulty::mode::ModeDifficulty, model::beatmap::Beatmap};

use super::difficulty::DifficultyValues;

/// The result of calculating the strains on a osu!mania map.
///
/// Suitable to plot the difficulty of a map over time.
#[derive(Clone, Debug, PartialEq)]
pub struct ManiaStrains {
    /// Strain peaks of the strain skill.
    pub strains: Vec<f64>,
}

impl ManiaStrains {
    /// Time between two strains in ms.
    pub const SECTION_LEN: f64 = 400.0;
}

pub fn strains(difficulty: &ModeDifficulty, map: &Beatmap) -> ManiaStrains {
    let DifficultyValues { strain, .. } = DifficultyValues::calculate(difficulty, map);

    ManiaStrains {
        strains: strain.into_current_strain_peaks().into_vec(),
    }
}
