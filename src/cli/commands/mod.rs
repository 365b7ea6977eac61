//! Subcommands of the numguess binary

pub mod play;
pub mod records;
pub mod train;
