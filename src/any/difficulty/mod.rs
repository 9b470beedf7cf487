use std::collections::HashMap;

use crate::{
    catch::Catch,
    error::{Error, Result},
    mania::Mania,
    model::{
        beatmap::Beatmap,
        mode::{can_convert, GameMode, IGameMode},
        mods::{ModCombination, ModCombinations},
    },
    osu::Osu,
    taiko::Taiko,
    util::sync::Shared,
};

use self::{mode::ModeDifficulty, timed::TimedDifficulty};

use super::{attributes::DifficultyAttributes, Strains};

pub mod mode;
pub mod object;
pub mod skills;
pub mod timed;

/// Difficulty calculator on maps of any mode.
///
/// The calculator keeps the beatmap as it was given and caches conversions
/// for each combination of mode and mods that was calculated on. Every
/// conversion starts from the given beatmap, never from a converted one.
///
/// # Example
///
/// ```
/// use rosu_sr::{
///     model::{beatmap::Beatmap, mode::GameMode, mods::ModCombination},
///     Difficulty,
/// };
///
/// let mut difficulty = Difficulty::new(Beatmap::default())
///     .mode(GameMode::Taiko)
///     .unwrap()
///     .mods(64_u32); // DT
///
/// let attrs = difficulty.calculate();
/// assert_eq!(attrs.stars(), 0.0);
///
/// // Every relevant mod combination
/// assert!(difficulty.calculate_all().all(|attrs| attrs.stars() == 0.0));
/// ```
#[derive(Clone, Debug)]
#[must_use]
pub struct Difficulty {
    map: Shared<Beatmap>,
    mode: GameMode,
    inner: ModeDifficulty,
    converted: HashMap<(u8, u32), Shared<Beatmap>>,
}

impl Difficulty {
    /// Create a new difficulty calculator for the given beatmap.
    ///
    /// The calculation mode is the map's mode until specified otherwise.
    pub fn new(map: Beatmap) -> Self {
        Self {
            mode: map.mode,
            map: Shared::new(map),
            inner: ModeDifficulty::new(),
            converted: HashMap::new(),
        }
    }

    /// Calculate for the given mode, converting the map if necessary.
    ///
    /// Fails if the map cannot be converted to the mode.
    pub fn mode(self, mode: GameMode) -> Result<Self> {
        let map = self.map.as_ref();

        if map.mode != mode && (map.is_convert || !can_convert(map.mode, mode)) {
            return Err(Error::IncompatibleMode { from: map.mode, to: mode });
        }

        Ok(Self { mode, ..self })
    }

    /// Specify the mods, either as [`ModCombination`] or through their bit
    /// values.
    ///
    /// See [https://github.com/ppy/osu-api/wiki#mods](https://github.com/ppy/osu-api/wiki#mods)
    pub fn mods(self, mods: impl Into<ModCombination>) -> Self {
        Self {
            inner: self.inner.mods(mods),
            ..self
        }
    }

    /// Amount of passed objects for partial plays, e.g. a fail.
    pub fn passed_objects(self, passed_objects: usize) -> Self {
        Self {
            inner: self.inner.passed_objects(passed_objects),
            ..self
        }
    }

    /// Adjust the clock rate used in the calculation.
    ///
    /// If none is specified, it will take the clock rate based on the mods
    /// i.e. 1.5 for DT, 0.75 for HT and 1.0 otherwise.
    pub fn clock_rate(self, clock_rate: f64) -> Self {
        Self {
            inner: self.inner.clock_rate(clock_rate),
            ..self
        }
    }

    /// The mode of the calculation.
    pub const fn get_mode(&self) -> GameMode {
        self.mode
    }

    /// Perform the difficulty calculation with the specified mods, clock rate,
    /// and passed objects.
    pub fn calculate(&mut self) -> DifficultyAttributes {
        let difficulty = self.inner.clone();

        self.calculate_mode_difficulty(&difficulty)
    }

    /// Perform the difficulty calculation on all objects with the given mods.
    ///
    /// If `clock_rate` is `None`, the rate of the mods is used.
    pub fn calculate_with_mods(
        &mut self,
        mods: &ModCombination,
        clock_rate: Option<f64>,
    ) -> DifficultyAttributes {
        let difficulty = ModeDifficulty::new()
            .mods(mods.clone())
            .with_clock_rate(clock_rate);

        self.calculate_mode_difficulty(&difficulty)
    }

    /// Perform the difficulty calculation on the first `object_count`
    /// objects only.
    pub fn calculate_at(
        &mut self,
        mods: &ModCombination,
        clock_rate: Option<f64>,
        object_count: usize,
    ) -> DifficultyAttributes {
        let difficulty = ModeDifficulty::new()
            .mods(mods.clone())
            .with_clock_rate(clock_rate)
            .with_passed_objects(Some(object_count));

        self.calculate_mode_difficulty(&difficulty)
    }

    /// Lazily calculate the attributes after every object.
    ///
    /// Attributes are only calculated when the iterator is advanced.
    pub fn calculate_timed(
        &mut self,
        mods: &ModCombination,
        clock_rate: Option<f64>,
    ) -> TimedDifficulty {
        let difficulty = ModeDifficulty::new()
            .mods(mods.clone())
            .with_clock_rate(clock_rate);

        let map = self.converted(difficulty.get_mods());
        Self::log_pass(self.mode, &difficulty, &map);

        match self.mode {
            GameMode::Osu => Osu::timed(difficulty, &map),
            GameMode::Taiko => Taiko::timed(difficulty, &map),
            GameMode::Catch => Catch::timed(difficulty, &map),
            GameMode::Mania => Mania::timed(difficulty, &map),
        }
    }

    /// Calculate the attributes for every combination of the mode's
    /// difficulty relevant mods.
    ///
    /// The first item is always the calculation without mods.
    pub fn calculate_all(&mut self) -> impl Iterator<Item = DifficultyAttributes> + '_ {
        let groups = match self.mode {
            GameMode::Osu => Osu::difficulty_mods(),
            GameMode::Taiko => Taiko::difficulty_mods(),
            GameMode::Catch => Catch::difficulty_mods(),
            GameMode::Mania => Mania::difficulty_mods(),
        };

        ModCombinations::new(groups).map(move |mods| self.calculate_with_mods(&mods, None))
    }

    /// Perform the difficulty calculation but instead of evaluating the skill
    /// strains, return them as is.
    ///
    /// Suitable to plot the difficulty of a map over time.
    pub fn strains(&mut self, mods: &ModCombination, clock_rate: Option<f64>) -> Strains {
        let difficulty = ModeDifficulty::new()
            .mods(mods.clone())
            .with_clock_rate(clock_rate);

        let map = self.converted(difficulty.get_mods());
        Self::log_pass(self.mode, &difficulty, &map);

        match self.mode {
            GameMode::Osu => Strains::Osu(Osu::strains(&difficulty, &map)),
            GameMode::Taiko => Strains::Taiko(Taiko::strains(&difficulty, &map)),
            GameMode::Catch => Strains::Catch(Catch::strains(&difficulty, &map)),
            GameMode::Mania => Strains::Mania(Mania::strains(&difficulty, &map)),
        }
    }

    fn calculate_mode_difficulty(&mut self, difficulty: &ModeDifficulty) -> DifficultyAttributes {
        let map = self.converted(difficulty.get_mods());
        Self::log_pass(self.mode, difficulty, &map);

        match self.mode {
            GameMode::Osu => DifficultyAttributes::Osu(Osu::difficulty(difficulty, &map)),
            GameMode::Taiko => DifficultyAttributes::Taiko(Taiko::difficulty(difficulty, &map)),
            GameMode::Catch => DifficultyAttributes::Catch(Catch::difficulty(difficulty, &map)),
            GameMode::Mania => DifficultyAttributes::Mania(Mania::difficulty(difficulty, &map)),
        }
    }

    /// The map converted to the current mode, cached per mode and mods.
    fn converted(&mut self, mods: &ModCombination) -> Shared<Beatmap> {
        if self.map.mode == self.mode {
            return Shared::clone(&self.map);
        }

        let key = (self.mode as u8, mods.bits());

        if let Some(map) = self.converted.get(&key) {
            log_trace!(mode = ?self.mode, mods = key.1, "Converted beatmap cache hit");

            return Shared::clone(map);
        }

        log_trace!(mode = ?self.mode, mods = key.1, "Converting beatmap");

        let map = match self.map.convert(self.mode) {
            Ok(converted) => Shared::new(converted),
            // Incompatible modes are rejected in `Difficulty::mode`
            Err(_err) => {
                log_warn!(error = %_err, "Failed to convert beatmap");

                Shared::clone(&self.map)
            }
        };

        self.converted.insert(key, Shared::clone(&map));

        map
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn log_pass(mode: GameMode, difficulty: &ModeDifficulty, map: &Beatmap) {
        log_debug!(
            ?mode,
            mods = difficulty.get_mods().bits(),
            clock_rate = difficulty.get_clock_rate(),
            objects = map.hit_objects.len(),
            "Starting difficulty calculation"
        );
    }

    /// Amount of cached conversions.
    #[cfg(test)]
    pub(crate) fn cached_conversions(&self) -> usize {
        self.converted.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::model::hit_object::{HitObject, Pos};

    use super::*;

    fn circles() -> Beatmap {
        let hit_objects = (0..8)
            .map(|i| HitObject::circle(Pos::new(64.0 * i as f32, 192.0), 500.0 + 250.0 * f64::from(i)))
            .collect();

        Beatmap {
            hit_objects,
            ..Default::default()
        }
    }

    #[test]
    fn rejects_incompatible_mode() {
        assert!(Difficulty::new(circles()).mode(GameMode::Mania).is_err());

        let taiko = Beatmap {
            mode: GameMode::Taiko,
            ..circles()
        };

        assert!(Difficulty::new(taiko).mode(GameMode::Catch).is_err());
    }

    #[test]
    fn cache_keyed_by_mode_and_mods() {
        let mut difficulty = Difficulty::new(circles()).mode(GameMode::Taiko).unwrap();

        let nomod = ModCombination::new();
        let dt = ModCombination::from_bits(64);

        let first = difficulty.calculate_with_mods(&nomod, None);
        assert_eq!(difficulty.cached_conversions(), 1);

        let second = difficulty.calculate_with_mods(&nomod, None);
        assert_eq!(difficulty.cached_conversions(), 1);
        assert_eq!(first, second);

        difficulty.calculate_with_mods(&dt, None);
        assert_eq!(difficulty.cached_conversions(), 2);
    }

    #[test]
    fn same_mode_is_not_cached() {
        let mut difficulty = Difficulty::new(circles());
        difficulty.calculate_with_mods(&ModCombination::from_bits(16), None);

        assert_eq!(difficulty.cached_conversions(), 0);
    }

    #[test]
    fn calculate_all_starts_without_mods() {
        let mut difficulty = Difficulty::new(circles());
        let all: Vec<_> = difficulty.calculate_all().collect();

        assert!(all[0].mods().is_empty());
        assert_eq!(all.len(), ModCombinations::new(Osu::difficulty_mods()).count());
    }
}
