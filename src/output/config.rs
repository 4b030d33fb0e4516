//! Output configuration types

/// Width of the right-justified id column.
pub const DEFAULT_ID_WIDTH: usize = 12;

/// Configuration for output formatting.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
    pub id_width: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_color: true,
            id_width: DEFAULT_ID_WIDTH,
        }
    }
}
