use crate::{
    any::ModeDifficulty,
    model::{mode::GameMode, mods::ModCombination},
};

use super::Beatmap;

/// Beatmap attributes after applying mods and clock rate.
#[derive(Clone, Debug, PartialEq)]
pub struct BeatmapAttributes {
    /// The approach rate.
    pub ar: f64,
    /// The overall difficulty.
    pub od: f64,
    /// The circle size.
    pub cs: f64,
    /// The health drain rate
    pub hp: f64,
    /// The clock rate with respect to mods.
    pub clock_rate: f64,
    /// The hit windows for approach rate and overall difficulty.
    pub hit_windows: HitWindows,
}

/// AR and OD hit windows in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitWindows {
    /// Time between an object's appearance and its hit time.
    pub ar: f64,
    /// Window to hit a 300 ("Great").
    pub od: f64,
}

/// Maps a difficulty value in `0..=10` linearly onto milliseconds with `5`
/// landing on `mid`.
#[derive(Copy, Clone)]
struct DifficultyRange {
    min: f64,
    mid: f64,
    max: f64,
}

impl DifficultyRange {
    const PREEMPT: Self = Self::new(1800.0, 1200.0, 450.0);
    const OSU_GREAT: Self = Self::new(80.0, 50.0, 20.0);
    const TAIKO_GREAT: Self = Self::new(50.0, 35.0, 20.0);

    const fn new(min: f64, mid: f64, max: f64) -> Self {
        Self { min, mid, max }
    }

    fn ms(self, difficulty: f64) -> f64 {
        if difficulty > 5.0 {
            self.mid + (self.max - self.mid) * (difficulty - 5.0) / 5.0
        } else if difficulty < 5.0 {
            self.mid - (self.mid - self.min) * (5.0 - difficulty) / 5.0
        } else {
            self.mid
        }
    }

    fn difficulty(self, ms: f64) -> f64 {
        if ms > self.mid {
            (self.min - ms) / ((self.min - self.mid) / 5.0)
        } else {
            5.0 + (self.mid - ms) / ((self.mid - self.max) / 5.0)
        }
    }
}

/// A builder for [`BeatmapAttributes`] and [`HitWindows`].
///
/// Values given to the builder are always adjusted by its mods.
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct BeatmapAttributesBuilder {
    mode: GameMode,
    is_convert: bool,
    ar: f32,
    od: f32,
    cs: f32,
    hp: f32,
    mods: ModCombination,
    clock_rate: Option<f64>,
}

impl BeatmapAttributesBuilder {
    /// osu!standard with all attributes at `5.0` and no mods.
    pub fn new() -> Self {
        Self {
            mode: GameMode::Osu,
            is_convert: false,
            ar: 5.0,
            od: 5.0,
            cs: 5.0,
            hp: 5.0,
            mods: ModCombination::new(),
            clock_rate: None,
        }
    }

    /// Take attributes, mode and convert status from a [`Beatmap`].
    pub fn map(self, map: &Beatmap) -> Self {
        Self {
            mode: map.mode,
            is_convert: map.is_convert,
            ar: map.ar,
            od: map.od,
            cs: map.cs,
            hp: map.hp,
            ..self
        }
    }

    pub fn ar(self, ar: f32) -> Self {
        Self { ar, ..self }
    }

    pub fn od(self, od: f32) -> Self {
        Self { od, ..self }
    }

    pub fn cs(self, cs: f32) -> Self {
        Self { cs, ..self }
    }

    pub fn hp(self, hp: f32) -> Self {
        Self { hp, ..self }
    }

    pub fn mods(self, mods: impl Into<ModCombination>) -> Self {
        Self {
            mods: mods.into(),
            ..self
        }
    }

    /// Overrides the clock rate of the mods.
    pub fn clock_rate(self, clock_rate: f64) -> Self {
        Self {
            clock_rate: Some(clock_rate),
            ..self
        }
    }

    pub fn mode(self, mode: GameMode, is_convert: bool) -> Self {
        Self {
            mode,
            is_convert,
            ..self
        }
    }

    /// Use the mods and clock rate of a calculation.
    pub fn difficulty(self, difficulty: &ModeDifficulty) -> Self {
        Self {
            mods: difficulty.get_mods().clone(),
            clock_rate: Some(difficulty.get_clock_rate()),
            ..self
        }
    }

    fn get_clock_rate(&self) -> f64 {
        self.clock_rate.unwrap_or_else(|| self.mods.clock_rate())
    }

    /// HR scales by `hr_factor` up to `10`, EZ halves.
    fn with_mods(&self, value: f32, hr_factor: f32) -> f32 {
        if self.mods.hr() {
            (value * hr_factor).min(10.0)
        } else if self.mods.ez() {
            value * 0.5
        } else {
            value
        }
    }

    /// Calculate the AR and OD hit windows.
    pub fn hit_windows(&self) -> HitWindows {
        let clock_rate = self.get_clock_rate();

        let ar = f64::from(self.with_mods(self.ar, 1.4));
        let preempt = DifficultyRange::PREEMPT.ms(ar) / clock_rate;

        let od = f64::from(self.with_mods(self.od, 1.4));

        let great = match self.mode {
            GameMode::Osu | GameMode::Catch => DifficultyRange::OSU_GREAT.ms(od) / clock_rate,
            GameMode::Taiko => DifficultyRange::TAIKO_GREAT.ms(od) / clock_rate,
            GameMode::Mania => self.mania_great(clock_rate),
        };

        HitWindows {
            ar: preempt,
            od: great,
        }
    }

    fn mania_great(&self, clock_rate: f64) -> f64 {
        let mut window = if !self.is_convert {
            34.0 + 3.0 * (10.0 - self.od).clamp(0.0, 10.0)
        } else if self.od.round_ties_even() > 4.0 {
            34.0
        } else {
            47.0
        };

        if self.mods.hr() {
            window /= 1.4;
        } else if self.mods.ez() {
            window *= 1.4;
        }

        ((f64::from(window) * clock_rate).floor() / clock_rate).ceil()
    }

    /// Calculate the [`BeatmapAttributes`].
    pub fn build(&self) -> BeatmapAttributes {
        let hit_windows = self.hit_windows();

        // Clock rate only affects AR and OD through their hit windows
        let ar = DifficultyRange::PREEMPT.difficulty(hit_windows.ar);

        let od = match self.mode {
            GameMode::Osu => DifficultyRange::OSU_GREAT.difficulty(hit_windows.od),
            GameMode::Taiko => DifficultyRange::TAIKO_GREAT.difficulty(hit_windows.od),
            GameMode::Catch | GameMode::Mania => f64::from(self.od),
        };

        BeatmapAttributes {
            ar,
            od,
            cs: f64::from(self.with_mods(self.cs, 1.3)),
            hp: f64::from(self.with_mods(self.hp, 1.4)),
            clock_rate: self.get_clock_rate(),
            hit_windows,
        }
    }
}

impl Default for BeatmapAttributesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::util::float_ext::FloatExt;

    use super::*;

    #[test]
    fn double_time_raises_ar() {
        let attrs = BeatmapAttributesBuilder::new().ar(8.5).mods(64).build();

        assert!(attrs.ar.almost_eq(10.0, 1e-9), "{}", attrs.ar);
        assert!(attrs.clock_rate.almost_eq(1.5, 1e-9));
    }

    #[test]
    fn custom_clock_rate_overrides_mods() {
        let attrs = BeatmapAttributesBuilder::new()
            .ar(8.5)
            .mods(64)
            .clock_rate(1.0)
            .build();

        assert!(attrs.ar.almost_eq(8.5, 1e-9), "{}", attrs.ar);
    }

    #[test]
    fn hard_rock_caps_at_ten() {
        let attrs = BeatmapAttributesBuilder::new()
            .ar(9.0)
            .od(8.0)
            .cs(4.0)
            .mods(16)
            .build();

        assert!(attrs.ar.almost_eq(10.0, 1e-9), "{}", attrs.ar);
        assert!(attrs.od.almost_eq(10.0, 1e-9), "{}", attrs.od);
        assert!(attrs.cs.almost_eq(5.2, 1e-6), "{}", attrs.cs);
    }

    #[test]
    fn easy_halves() {
        let attrs = BeatmapAttributesBuilder::new()
            .ar(8.0)
            .hp(6.0)
            .mods(2)
            .build();

        assert!(attrs.ar.almost_eq(4.0, 1e-9), "{}", attrs.ar);
        assert!(attrs.hp.almost_eq(3.0, 1e-9), "{}", attrs.hp);
    }

    #[test]
    fn osu_hit_windows() {
        let windows = BeatmapAttributesBuilder::new().ar(5.0).od(2.5).hit_windows();

        assert!(windows.ar.almost_eq(1200.0, 1e-9));
        assert!(windows.od.almost_eq(65.0, 1e-9));
    }

    #[test]
    fn taiko_hit_window() {
        let windows = BeatmapAttributesBuilder::new()
            .mode(GameMode::Taiko, false)
            .od(5.0)
            .hit_windows();

        assert!(windows.od.almost_eq(35.0, 1e-9));
    }

    #[test]
    fn mania_hit_window() {
        let windows = BeatmapAttributesBuilder::new()
            .mode(GameMode::Mania, false)
            .od(4.5)
            .hit_windows();

        assert!(windows.od.almost_eq(50.0, 1e-9), "{}", windows.od);
    }

    #[test]
    fn mania_convert_hit_window_rounds_half_to_even() {
        let window = |od: f32| {
            BeatmapAttributesBuilder::new()
                .mode(GameMode::Mania, true)
                .od(od)
                .hit_windows()
                .od
        };

        assert!(window(4.5).almost_eq(47.0, 1e-9), "{}", window(4.5));
        assert!(window(3.5).almost_eq(47.0, 1e-9), "{}", window(3.5));
        assert!(window(5.5).almost_eq(34.0, 1e-9), "{}", window(5.5));
        assert!(window(4.6).almost_eq(34.0, 1e-9), "{}", window(4.6));
    }
}
