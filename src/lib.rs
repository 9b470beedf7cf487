//! Library to calculate difficulty attributes, i.e. star ratings, for all [osu!] gamemodes.
//!
//! ## Description
//!
//! `rosu-sr` walks the hitobjects of a beatmap in chronological order, lets
//! each skill of the gamemode accumulate decaying strain, and reduces the
//! strain peaks into the difficulty attributes. Slider paths are approximated
//! the way [osu!lazer] does it so that distances match precisely.
//!
//! Posts of the implemented gamemode versions:
//!   - osu: <https://osu.ppy.sh/home/news/2022-09-30-changes-to-osu-sr-and-pp>
//!   - taiko: <https://osu.ppy.sh/home/news/2022-09-28-changes-to-osu-taiko-sr-and-pp>
//!   - mania: <https://osu.ppy.sh/home/news/2022-10-09-changes-to-osu-mania-sr-and-pp>
//!
//! ## Usage
//!
//! ```
//! use rosu_sr::{
//!     model::{
//!         beatmap::Beatmap,
//!         control_point::TimingPoint,
//!         hit_object::{HitObject, Pos},
//!         mode::GameMode,
//!         mods::ModCombination,
//!     },
//!     Difficulty,
//! };
//!
//! // Beatmaps are constructed directly, decoding is up to the caller
//! let map = Beatmap {
//!     timing_points: vec![TimingPoint::new(0.0, 500.0)],
//!     hit_objects: (0..64_i32)
//!         .map(|i| HitObject::circle(Pos::new(64.0 * (i % 8) as f32, 192.0), 250.0 * f64::from(i)))
//!         .collect(),
//!     ..Default::default()
//! };
//!
//! let mut difficulty = Difficulty::new(map).mods(8_u32 + 16); // HDHR
//!
//! let stars = difficulty.calculate().stars();
//! assert!(stars > 0.0);
//!
//! // The same map as osu!catch convert, the conversion is cached
//! let mut difficulty = difficulty.mode(GameMode::Catch).unwrap();
//! let catch_stars = difficulty.calculate().stars();
//!
//! // Attributes for each object as if the map ended after it
//! let mut timed = difficulty.calculate_timed(&ModCombination::from_bits(8), None);
//! assert!(timed.next().is_some());
//!
//! println!("Stars: {stars} | Catch stars: {catch_stars}");
//! ```
//!
//! ## Features
//!
//! | Flag | Description | Dependencies
//! | - | - | -
//! | `default` | No features |
//! | `sync` | Beatmaps shared between calculations are stored in an `Arc` instead of an `Rc` so that calculators are `Send`. |
//! | `tracing` | Calculation passes, conversions, and degenerate slider paths will be logged through `tracing`. If this feature is not enabled, nothing will be logged. | [`tracing`]
//!
//! [osu!]: https://osu.ppy.sh/home
//! [osu!lazer]: https://github.com/ppy/osu
//! [`tracing`]: https://docs.rs/tracing

#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::missing_const_for_fn, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::struct_excessive_bools,
    clippy::match_same_arms,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::explicit_iter_loop,
    clippy::similar_names,
    clippy::cast_possible_wrap
)]

#[doc(inline)]
pub use self::{
    any::{
        Difficulty, DifficultyAttributes, ModeDifficulty, Strains, TimedDifficulty,
        TimedDifficultyAttributes,
    },
    error::{Error, Result},
    model::{beatmap::Beatmap, mode::GameMode},
    util::{limited_queue::LimitedQueue, reverse_queue::ReverseQueue},
};

#[macro_use]
mod util;

/// Types for calculations of any mode.
pub mod any;

/// Types for osu!standard calculations.
pub mod osu;

/// Types for osu!taiko calculations.
pub mod taiko;

/// Types for osu!catch calculations.
pub mod catch;

/// Types for osu!mania calculations.
pub mod mania;

/// Types used in and around this crate.
pub mod model;

mod error;
