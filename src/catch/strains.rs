use crate::{any::difficulty::mode::ModeDifficulty, model::beatmap::Beatmap};

use super::difficulty::DifficultyValues;

/// The result of calculating the strains on a osu!catch map.
///
/// Suitable to plot the difficulty of a map over time.
#[derive(Clone, Debug, PartialEq)]
pub struct CatchStrains {
    /// Strain peaks of the movement skill.
    pub movement: Vec<f64>,
}

impl CatchStrains {
    /// Time between two strains in ms.
    pub const SECTION_LEN: f64 = 750.0;
}

pub fn strains(difficulty: &ModeDifficulty, map: &Beatmap) -> CatchStrains {
    let DifficultyValues { movement, .. } = DifficultyValues::calculate(difficulty, map);

    CatchStrains {
        movement: movement.into_current_strain_peaks().into_vec(),
    }
}
