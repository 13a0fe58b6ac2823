//! Core time-range types and preset resolution

pub mod preset;
pub mod resolver;
pub mod temporal;

pub use preset::*;
pub use resolver::*;
pub use temporal::*;
