//! Data types for the grid template engine.

mod header;
mod merge;
mod row;
mod template;

pub use header::*;
pub use merge::*;
pub use row::*;
pub use template::*;
