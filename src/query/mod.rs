//! Date-filtered SQL generation

pub mod builder;
pub mod granularity;
pub mod table;

pub use builder::*;
pub use granularity::*;
pub use table::*;
