use crate::util::strains_vec::StrainsVec;

use super::object::IDifficultyObject;

/// A skill whose strain is tracked across fixed-length sections of time.
///
/// Implementors only provide the strain of each object. Partitioning into
/// sections and collecting peaks is done by [`Skill`].
pub trait StrainSkill {
    type DifficultyObject: IDifficultyObject;

    /// Length of a section in milliseconds.
    const SECTION_LENGTH: f64 = 400.0;

    /// Weight multiplier between consecutive sorted peaks.
    const DECAY_WEIGHT: f64 = 0.9;

    /// The strain after processing `curr`.
    fn strain_value_at(
        &mut self,
        curr: &Self::DifficultyObject,
        diff_objects: &[Self::DifficultyObject],
    ) -> f64;

    /// The strain at `time`, used as the initial peak of a new section.
    ///
    /// `curr` is the object that caused the new section to be opened.
    fn calculate_initial_strain(
        &self,
        time: f64,
        curr: &Self::DifficultyObject,
        diff_objects: &[Self::DifficultyObject],
    ) -> f64;

    /// Reduce all section peaks into a single value.
    fn difficulty_value(&self, peaks: StrainsVec) -> f64 {
        difficulty_value(peaks, Self::DECAY_WEIGHT)
    }
}

/// A skill with a single strain that decays exponentially over time.
pub trait StrainDecaySkill {
    type DifficultyObject: IDifficultyObject;

    const SKILL_MULTIPLIER: f64;
    const STRAIN_DECAY_BASE: f64;

    const SECTION_LENGTH: f64 = 400.0;
    const DECAY_WEIGHT: f64 = 0.9;

    /// The strain that `curr` adds on top of the decayed strain.
    fn strain_value_of(
        &mut self,
        curr: &Self::DifficultyObject,
        diff_objects: &[Self::DifficultyObject],
    ) -> f64;

    fn difficulty_value(&self, peaks: StrainsVec) -> f64 {
        difficulty_value(peaks, Self::DECAY_WEIGHT)
    }
}

/// Adds the decaying strain to a [`StrainDecaySkill`].
#[derive(Clone, Debug, Default)]
pub struct Decaying<S> {
    pub inner: S,
    pub curr_strain: f64,
}

impl<S> Decaying<S> {
    pub const fn new(inner: S) -> Self {
        Self {
            inner,
            curr_strain: 0.0,
        }
    }
}

impl<S: StrainDecaySkill> StrainSkill for Decaying<S> {
    type DifficultyObject = S::DifficultyObject;

    const SECTION_LENGTH: f64 = S::SECTION_LENGTH;
    const DECAY_WEIGHT: f64 = S::DECAY_WEIGHT;

    fn strain_value_at(
        &mut self,
        curr: &Self::DifficultyObject,
        diff_objects: &[Self::DifficultyObject],
    ) -> f64 {
        self.curr_strain *= strain_decay(curr.delta_time(), S::STRAIN_DECAY_BASE);
        self.curr_strain += self.inner.strain_value_of(curr, diff_objects) * S::SKILL_MULTIPLIER;

        self.curr_strain
    }

    fn calculate_initial_strain(
        &self,
        time: f64,
        curr: &Self::DifficultyObject,
        diff_objects: &[Self::DifficultyObject],
    ) -> f64 {
        let prev_start_time = curr
            .previous(0, diff_objects)
            .map_or(0.0, IDifficultyObject::start_time);

        self.curr_strain * strain_decay(time - prev_start_time, S::STRAIN_DECAY_BASE)
    }

    fn difficulty_value(&self, peaks: StrainsVec) -> f64 {
        self.inner.difficulty_value(peaks)
    }
}

/// Drives a [`StrainSkill`] through all objects and keeps track of the
/// section peaks.
#[derive(Clone, Debug)]
pub struct Skill<S> {
    pub inner: S,
    curr_section_peak: f64,
    curr_section_end: f64,
    strain_peaks: StrainsVec,
}

impl<S: StrainSkill> Skill<S> {
    pub const fn new(inner: S) -> Self {
        Self {
            inner,
            curr_section_peak: 0.0,
            curr_section_end: 0.0,
            strain_peaks: StrainsVec::new(),
        }
    }

    /// Process the next object.
    ///
    /// Objects must be processed in order of their index.
    pub fn process(&mut self, curr: &S::DifficultyObject, diff_objects: &[S::DifficultyObject]) {
        // * The first object doesn't generate a strain, so we begin with an incremented section end
        if curr.idx() == 0 {
            self.curr_section_end =
                (curr.start_time() / S::SECTION_LENGTH).ceil() * S::SECTION_LENGTH;
        }

        while curr.start_time() > self.curr_section_end {
            self.strain_peaks.push(self.curr_section_peak);

            // * The maximum strain of the new section is not zero by default
            // * This means we need to capture the strain level at the beginning of the new section,
            // * and use that as the initial peak level.
            self.curr_section_peak =
                self.inner
                    .calculate_initial_strain(self.curr_section_end, curr, diff_objects);

            self.curr_section_end += S::SECTION_LENGTH;
        }

        let strain = self.inner.strain_value_at(curr, diff_objects);
        self.curr_section_peak = strain.max(self.curr_section_peak);
    }

    /// All closed section peaks followed by the peak of the open section.
    pub fn current_strain_peaks(&self) -> StrainsVec {
        let mut peaks = self.strain_peaks.clone();
        peaks.push(self.curr_section_peak);

        peaks
    }

    /// Same as [`Skill::current_strain_peaks`] without cloning.
    pub fn into_current_strain_peaks(self) -> StrainsVec {
        let mut peaks = self.strain_peaks;
        peaks.push(self.curr_section_peak);

        peaks
    }

    /// The reduced value of all peaks so far.
    ///
    /// Processing can continue afterwards.
    pub fn difficulty_value(&self) -> f64 {
        self.inner.difficulty_value(self.current_strain_peaks())
    }
}

/// Weighted sum of all non-zero peaks, sorted in descending order.
pub fn difficulty_value(peaks: StrainsVec, decay_weight: f64) -> f64 {
    let mut difficulty = 0.0;
    let mut weight = 1.0;

    // * Sections with 0 strain are excluded to avoid worst-case time complexity of the following sort (e.g. /b/2351871).
    // * These sections will not contribute to the difficulty.
    let mut peaks = peaks;

    // * Difficulty is the weighted sum of the highest strains from every section.
    // * We're sorting from highest to lowest strain.
    for strain in peaks.sorted_non_zero_iter() {
        difficulty += strain * weight;
        weight *= decay_weight;
    }

    difficulty
}

pub fn strain_decay(ms: f64, strain_decay_base: f64) -> f64 {
    f64::powf(strain_decay_base, ms / 1000.0)
}
