//! Subcommand modules for the `synteny` binary.

pub mod breakpoint;
pub mod depth;
pub mod group;
pub mod liftover;
pub mod mcscan;
pub mod scan;
pub mod utils;
