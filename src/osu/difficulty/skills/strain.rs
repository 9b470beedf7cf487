use crate::util::{difficulty::lerp, strains_vec::StrainsVec};

/// Reduction shared by osu!standard skills.
///
/// The highest peaks are scaled down before the weighted sum so that short
/// difficulty spikes don't dominate the result.
pub trait OsuStrainSkill {
    const REDUCED_SECTION_COUNT: usize = 10;
    const REDUCED_STRAIN_BASELINE: f64 = 0.75;
    const DIFFICULTY_MULTIPLIER: f64 = 1.06;
    const DECAY_WEIGHT: f64 = 0.9;

    fn reduced_difficulty_value(peaks: StrainsVec) -> f64 {
        difficulty_value(
            peaks,
            Self::REDUCED_SECTION_COUNT,
            Self::REDUCED_STRAIN_BASELINE,
            Self::DECAY_WEIGHT,
        ) * Self::DIFFICULTY_MULTIPLIER
    }
}

pub fn difficulty_value(
    mut peaks: StrainsVec,
    reduced_section_count: usize,
    reduced_strain_baseline: f64,
    decay_weight: f64,
) -> f64 {
    let mut difficulty = 0.0;
    let mut weight = 1.0;

    // * We are reducing the highest strains first to account for extreme difficulty spikes
    for (i, strain) in peaks
        .sorted_non_zero_iter_mut()
        .take(reduced_section_count)
        .enumerate()
    {
        let clamped = f64::from((i as f32 / reduced_section_count as f32).clamp(0.0, 1.0));
        let scale = f64::log10(lerp(1.0, 10.0, clamped));
        *strain *= lerp(reduced_strain_baseline, 1.0, scale);
    }

    peaks.sort_desc();

    // * Difficulty is the weighted sum of the highest strains from every section.
    // * We're sorting from highest to lowest strain.
    for strain in peaks.iter() {
        difficulty += strain * weight;
        weight *= decay_weight;
    }

    difficulty
}
