//! Relational spreadsheet interaction core
//!
//! Focus, editing, keyboard navigation and structural commands for a
//! spreadsheet-style table editor. Rendering is left to the host: the core
//! consumes pointer and key events and hands back immutable snapshots plus a
//! [`view::GridView`] describing what to draw.

pub mod columns;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod grid;
pub mod input;
pub mod model;
pub mod source;
pub mod view;

mod sheet;

pub use config::GridConfig;
pub use sheet::*;
