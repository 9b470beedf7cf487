//! Reference counting for beatmaps shared between calculations.
//!
//! Without the `sync` feature this is `Rc`, otherwise `Arc`.

#[cfg(not(feature = "sync"))]
pub type Shared<T> = std::rc::Rc<T>;

#[cfg(feature = "sync")]
pub type Shared<T> = std::sync::Arc<T>;

/// ```compile_fail
/// use rosu_sr::{model::beatmap::Beatmap, Difficulty};
///
/// let difficulty = Difficulty::new(Beatmap::default());
///
/// // Rc cannot be shared across threads so compilation should fail
/// std::thread::spawn(move || { let _ = difficulty.get_mode(); });
/// ```
#[cfg(not(feature = "sync"))]
const fn _share_difficulty() {}
