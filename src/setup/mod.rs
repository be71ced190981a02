//! PATH setup advice for the plugin bin directory.
//!
//! `is_bin_dir_usable` decides whether the user needs a reminder and
//! `compose_instructions` renders it. Both take an explicit `Env`.

pub mod check;
pub mod instructions;

pub use check::is_bin_dir_usable;
pub use instructions::compose_instructions;
