/// Beatmap related types.
pub mod beatmap;

/// Control point related types.
pub mod control_point;

/// Slider path approximation.
pub mod curve;

/// Hitobject related types.
pub mod hit_object;

/// Gamemode related types.
pub mod mode;

/// Gamemods related types.
pub mod mods;
