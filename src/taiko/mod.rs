use crate::{
    any::{ModeDifficulty, TimedDifficulty},
    error::Result,
    model::{
        beatmap::Beatmap,
        mode::{GameMode, IGameMode},
        mods::GameMod,
    },
};

pub use self::{
    attributes::TaikoDifficultyAttributes, difficulty::timed::TaikoTimedDifficulty,
    strains::TaikoStrains,
};

mod attributes;
mod convert;
mod difficulty;
mod object;
mod strains;

/// Marker type for [`GameMode::Taiko`].
pub struct Taiko;

impl IGameMode for Taiko {
    const MODE: GameMode = GameMode::Taiko;

    type DifficultyAttributes = TaikoDifficultyAttributes;
    type Strains = TaikoStrains;

    fn difficulty_mods() -> &'static [&'static [GameMod]] {
        &[
            &[GameMod::DOUBLE_TIME],
            &[GameMod::HALF_TIME],
            &[GameMod::EASY],
            &[GameMod::HARD_ROCK],
        ]
    }

    fn convert(map: &Beatmap) -> Result<Beatmap> {
        convert::convert(map)
    }

    fn difficulty(difficulty: &ModeDifficulty, map: &Beatmap) -> Self::DifficultyAttributes {
        difficulty::difficulty(difficulty, map)
    }

    fn strains(difficulty: &ModeDifficulty, map: &Beatmap) -> Self::Strains {
        strains::strains(difficulty, map)
    }

    fn timed(difficulty: ModeDifficulty, map: &Beatmap) -> TimedDifficulty {
        TimedDifficulty::Taiko(TaikoTimedDifficulty::new(&difficulty, map))
    }
}
