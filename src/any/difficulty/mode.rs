use crate::model::{beatmap::Beatmap, mode::IGameMode, mods::ModCombination};

/// Difficulty calculator on maps of a given mode.
///
/// The map must already be of the mode's type, conversions are handled by
/// [`Difficulty`](crate::Difficulty).
#[derive(Clone, Debug, Default, PartialEq)]
#[must_use]
pub struct ModeDifficulty {
    mods: ModCombination,
    passed_objects: Option<usize>,
    clock_rate: Option<f64>,
}

impl ModeDifficulty {
    /// Create a new difficulty calculator.
    pub const fn new() -> Self {
        Self {
            mods: ModCombination::new(),
            passed_objects: None,
            clock_rate: None,
        }
    }

    /// Specify the mods, either as [`ModCombination`] or through their bit
    /// values.
    pub fn mods(self, mods: impl Into<ModCombination>) -> Self {
        Self {
            mods: mods.into(),
            ..self
        }
    }

    /// Amount of passed objects for partial plays, e.g. a fail.
    pub fn passed_objects(self, passed_objects: usize) -> Self {
        Self {
            passed_objects: Some(passed_objects),
            ..self
        }
    }

    /// Adjust the clock rate used in the calculation.
    ///
    /// If none is specified, it will take the clock rate based on the mods
    /// i.e. 1.5 for DT, 0.75 for HT and 1.0 otherwise.
    pub fn clock_rate(self, clock_rate: f64) -> Self {
        Self {
            clock_rate: Some(clock_rate),
            ..self
        }
    }

    pub(crate) fn with_clock_rate(self, clock_rate: Option<f64>) -> Self {
        Self { clock_rate, ..self }
    }

    pub(crate) fn with_passed_objects(self, passed_objects: Option<usize>) -> Self {
        Self {
            passed_objects,
            ..self
        }
    }

    /// Perform the difficulty calculation for a beatmap of mode `M` and
    /// process the final skill values.
    pub fn calculate<M: IGameMode>(&self, map: &Beatmap) -> M::DifficultyAttributes {
        M::difficulty(self, map)
    }

    /// Perform a difficulty calculation for a beatmap of mode `M` without
    /// processing the final skill values.
    pub fn strains<M: IGameMode>(&self, map: &Beatmap) -> M::Strains {
        M::strains(self, map)
    }

    pub(crate) const fn get_mods(&self) -> &ModCombination {
        &self.mods
    }

    pub(crate) fn get_clock_rate(&self) -> f64 {
        self.clock_rate.unwrap_or_else(|| self.mods.clock_rate())
    }

    pub(crate) fn get_passed_objects(&self) -> usize {
        self.passed_objects.unwrap_or(usize::MAX)
    }
}
