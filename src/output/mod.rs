//! Listing output
//!
//! Visitors that print each walked item:
//! - `PathPrinter` - id and path per line, with optional color
//! - `JsonLinesPrinter` - one JSON object per line

mod config;
mod json;
mod path;

pub use config::{DEFAULT_ID_WIDTH, OutputConfig};
pub use json::{JsonItem, JsonLinesPrinter};
pub use path::{PathPrinter, format_line};
