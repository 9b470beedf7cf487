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
    attributes::CatchDifficultyAttributes, difficulty::timed::CatchTimedDifficulty,
    strains::CatchStrains,
};

mod attributes;
mod catcher;
mod convert;
mod difficulty;
mod object;
mod strains;

const PLAYFIELD_WIDTH: f32 = 512.0;

/// Marker type for [`GameMode::Catch`].
pub struct Catch;

impl IGameMode for Catch {
    const MODE: GameMode = GameMode::Catch;

    type DifficultyAttributes = CatchDifficultyAttributes;
    type Strains = CatchStrains;

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
        TimedDifficulty::Catch(CatchTimedDifficulty::new(&difficulty, map))
    }
}
