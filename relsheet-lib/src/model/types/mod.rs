//! Value types shared by cells and column metadata

mod money;
mod option_set;

pub use money::*;
pub use option_set::*;
