//! Operator session over the depreciation ledger: command parsing, the
//! session that ties store, view and exporter together, and screen rendering.

pub mod command;
pub mod render;
pub mod session;

pub use command::{Command, CommandError, HELP};
pub use render::{Screen, footer_label, month_label, page_label};
pub use session::{Navigation, Session};
