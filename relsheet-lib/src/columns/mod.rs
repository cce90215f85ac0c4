//! Column-level edit surfaces: the settings panel and inline rename

mod rename;
mod settings;

pub use rename::*;
pub use settings::*;
