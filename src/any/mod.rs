pub use self::{
    attributes::DifficultyAttributes,
    difficulty::{
        mode::ModeDifficulty,
        timed::{TimedDifficulty, TimedDifficultyAttributes},
        Difficulty,
    },
    strains::Strains,
};

mod attributes;
pub(crate) mod difficulty;
mod strains;
