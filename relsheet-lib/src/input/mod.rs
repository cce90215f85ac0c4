//! Input events and keyboard navigation

mod event;
mod navigator;

pub use event::*;
pub use navigator::*;
