pub use rosu_map::section::general::GameMode;

use crate::{
    any::{ModeDifficulty, TimedDifficulty},
    error::Result,
};

use super::{beatmap::Beatmap, mods::GameMod};

/// Whether a beatmap of mode `from` can be played in mode `to`.
///
/// Only osu!standard maps are converted, and only to osu!taiko or osu!catch.
pub const fn can_convert(from: GameMode, to: GameMode) -> bool {
    match (from, to) {
        (GameMode::Osu, GameMode::Mania) => false,
        (GameMode::Osu, _) => true,
        (from, to) => from as u8 == to as u8,
    }
}

/// A way to specify a gamemode at compile-time.
///
/// Notably, this is implemented for the marker types [`Osu`], [`Taiko`],
/// [`Catch`], and [`Mania`].
///
/// [`Osu`]: crate::osu::Osu
/// [`Taiko`]: crate::taiko::Taiko
/// [`Catch`]: crate::catch::Catch
/// [`Mania`]: crate::mania::Mania
pub trait IGameMode: Sized {
    /// The mode's runtime counterpart.
    const MODE: GameMode;

    /// The resulting type of a difficulty calculation.
    type DifficultyAttributes;

    /// The resulting type of a strain calculation.
    type Strains;

    /// Groups of mods that affect the difficulty in this mode.
    ///
    /// Mods within the same group are only ever enabled together.
    fn difficulty_mods() -> &'static [&'static [GameMod]];

    /// Create a converted copy of a beatmap from another mode.
    ///
    /// Only called if the map's mode differs from [`IGameMode::MODE`].
    fn convert(map: &Beatmap) -> Result<Beatmap>;

    /// Perform a difficulty calculation for a beatmap of this mode and
    /// process the final skill values.
    fn difficulty(difficulty: &ModeDifficulty, map: &Beatmap) -> Self::DifficultyAttributes;

    /// Perform a difficulty calculation without processing the final skill
    /// values.
    fn strains(difficulty: &ModeDifficulty, map: &Beatmap) -> Self::Strains;

    /// Prepare a lazy calculation that yields attributes after every object.
    fn timed(difficulty: ModeDifficulty, map: &Beatmap) -> TimedDifficulty;
}
