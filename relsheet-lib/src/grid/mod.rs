//! Focus, selection and inline editing

mod focus;
mod machine;
mod session;

pub use focus::*;
pub use machine::*;
pub use session::*;
