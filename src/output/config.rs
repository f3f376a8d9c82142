//! Output configuration types

/// Configuration for report rendering.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
    /// Longest rendered JSON value before it is cut with an ellipsis (`None` = never cut)
    pub max_value_width: Option<usize>,
}

const DEFAULT_MAX_VALUE_WIDTH: usize = 80;

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_color: true,
            max_value_width: Some(DEFAULT_MAX_VALUE_WIDTH),
        }
    }
}
