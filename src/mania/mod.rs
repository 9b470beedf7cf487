use crate::{
    any::{ModeDifficulty, TimedDifficulty},
    error::{Error, Result},
    model::{
        beatmap::Beatmap,
        mode::{GameMode, IGameMode},
        mods::GameMod,
    },
};

pub use self::{
    attributes::ManiaDifficultyAttributes, difficulty::timed::ManiaTimedDifficulty,
    strains::ManiaStrains,
};

mod attributes;
mod difficulty;
mod object;
mod strains;

/// Marker type for [`GameMode::Mania`].
pub struct Mania;

impl IGameMode for Mania {
    const MODE: GameMode = GameMode::Mania;

    type DifficultyAttributes = ManiaDifficultyAttributes;
    type Strains = ManiaStrains;

    fn difficulty_mods() -> &'static [&'static [GameMod]] {
        &[
            &[GameMod::DOUBLE_TIME],
            &[GameMod::HALF_TIME],
            &[GameMod::EASY],
            &[GameMod::HARD_ROCK],
        ]
    }

    fn convert(map: &Beatmap) -> Result<Beatmap> {
        Err(Error::IncompatibleMode {
            from: map.mode,
            to: GameMode::Mania,
        })
    }

    fn difficulty(difficulty: &ModeDifficulty, map: &Beatmap) -> Self::DifficultyAttributes {
        difficulty::difficulty(difficulty, map)
    }

    fn strains(difficulty: &ModeDifficulty, map: &Beatmap) -> Self::Strains {
        strains::strains(difficulty, map)
    }

    fn timed(difficulty: ModeDifficulty, map: &Beatmap) -> TimedDifficulty {
        TimedDifficulty::Mania(ManiaTimedDifficulty::new(&difficulty, map))
    }
}
