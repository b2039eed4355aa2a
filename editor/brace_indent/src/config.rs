//! Indentation configuration.

/// Default number of spaces per indentation level.
pub const INDENT_WIDTH: usize = 2;

/// Indentation configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IndentConfig {
    /// Spaces added per nesting level.
    /// Defaults to 2.
    pub indent_size: usize,
}

impl Default for IndentConfig {
    fn default() -> Self {
        Self {
            indent_size: INDENT_WIDTH,
        }
    }
}

impl IndentConfig {
    /// Create a new config with the specified indent size.
    pub fn with_indent_size(indent_size: usize) -> Self {
        Self { indent_size }
    }

    /// One indentation level as a string of spaces.
    #[inline]
    pub fn level(&self) -> String {
        " ".repeat(self.indent_size)
    }
}
