#[macro_use]
mod macros;

pub mod difficulty;
pub mod float_ext;
pub mod limited_queue;
pub mod random;
pub mod reverse_queue;
pub mod sort;
pub mod strains_vec;
pub mod sync;
