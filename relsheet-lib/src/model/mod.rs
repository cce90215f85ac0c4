//! Table data model

mod column;
pub mod parse;
mod row;
mod row_serde;
mod schema;
mod store;
mod table;
pub mod types;
mod value;

pub use column::*;
pub use row::*;
pub use row_serde::RawRow;
pub use schema::*;
pub use store::*;
pub use table::*;
pub use value::*;
