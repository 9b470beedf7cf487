use crate::{any::difficulty::mode::ModeDifficulty, model::beatmap::Beatmap};

use super::difficulty::{skills::TaikoSkills, DifficultyValues};

/// The result of calculating the strains on a osu!taiko map.
///
/// Suitable to plot the difficulty of a map over time.
#[derive(Clone, Debug, PartialEq)]
pub struct TaikoStrains {
    /// Strain peaks of the colour skill.
    pub colour: Vec<f64>,
    /// Strain peaks of the rhythm skill.
    pub rhythm: Vec<f64>,
    /// Strain peaks of the stamina skill.
    pub stamina: Vec<f64>,
}

impl TaikoStrains {
    /// Time between two strains in ms.
    pub const SECTION_LEN: f64 = 400.0;
}

pub fn strains(difficulty: &ModeDifficulty, map: &Beatmap) -> TaikoStrains {
    let DifficultyValues {
        skills:
            TaikoSkills {
                colour,
                rhythm,
                stamina,
            },
        attrs: _,
    } = DifficultyValues::calculate(difficulty, map);

    TaikoStrains {
        colour: colour.into_current_strain_peaks().into_vec(),
        rhythm: rhythm.into_current_strain_peaks().into_vec(),
        stamina: stamina.into_current_strain_peaks().into_vec(),
    }
}
