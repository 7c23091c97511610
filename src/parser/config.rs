use std::fmt;

use tracing::warn;

use crate::error::{ParseError, Result, SecurityError};

/// Maximum number of nested rule invocations. Each element nesting level
/// costs two.
pub const DEFAULT_MAX_DEPTH: usize = 4_096;
/// Maximum input size (10MB)
pub const DEFAULT_MAX_SIZE: usize = 10 * 1024 * 1024;
/// Stack reserved for the parser thread (256MB), enough for
/// [`DEFAULT_MAX_DEPTH`] nested rules in unoptimized builds.
pub const DEFAULT_STACK_SIZE: usize = 256 * 1024 * 1024;

/// Configuration for parser limits
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Maximum number of nested rule invocations
    pub max_depth: usize,
    /// Maximum input size in bytes
    pub max_size: usize,
    /// Cache rule results per token position
    pub memoize: bool,
    /// Stack size of the thread the matcher runs on
    pub stack_size: usize,
}

/// Tracks rule nesting depth during matching
#[derive(Debug)]
pub struct ParsingContext {
    current_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_size: DEFAULT_MAX_SIZE,
            memoize: true,
            stack_size: DEFAULT_STACK_SIZE,
        }
    }
}

impl fmt::Display for ParserConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ParserConfig {{ max_depth: {}, max_size: {}, memoize: {}, stack_size: {} }}",
            self.max_depth, self.max_size, self.memoize, self.stack_size
        )
    }
}

impl ParserConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    pub fn with_stack_size(mut self, stack_size: usize) -> Self {
        self.stack_size = stack_size;
        self
    }

    pub fn validate_input_size(&self, size: usize) -> Result<()> {
        if size > self.max_size {
            warn!(size, max = self.max_size, "input rejected");
            return Err(ParseError::new(SecurityError::MaxSizeExceeded {
                max: self.max_size,
            })
            .with_context(format!(
                "Input size ({} bytes) exceeds maximum allowed ({})",
                size, self.max_size
            )));
        }
        Ok(())
    }
}

impl Default for ParsingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ParsingContext {
    pub fn new() -> Self {
        Self { current_depth: 0 }
    }

    pub fn depth(&self) -> usize {
        self.current_depth
    }

    pub fn enter_nested(&mut self, config: &ParserConfig) -> Result<()> {
        self.current_depth += 1;
        if self.current_depth > config.max_depth {
            warn!(max = config.max_depth, "rule nesting limit hit");
            return Err(ParseError::new(SecurityError::MaxDepthExceeded {
                max: config.max_depth,
            }));
        }
        Ok(())
    }

    pub fn exit_nested(&mut self) {
        if self.current_depth > 0 {
            self.current_depth -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;

    #[test]
    fn test_depth_limit() {
        let config = ParserConfig::default().with_max_depth(2);
        let mut context = ParsingContext::new();
        assert!(context.enter_nested(&config).is_ok());
        assert!(context.enter_nested(&config).is_ok());
        let err = context.enter_nested(&config).unwrap_err();
        assert!(matches!(
            err.kind(),
            ParseErrorKind::Security(SecurityError::MaxDepthExceeded { max: 2 })
        ));
    }

    #[test]
    fn test_exit_nested_saturates() {
        let mut context = ParsingContext::new();
        context.exit_nested();
        assert_eq!(context.depth(), 0);
    }

    #[test]
    fn test_input_size() {
        let config = ParserConfig::default().with_max_size(4);
        assert!(config.validate_input_size(4).is_ok());
        assert!(config.validate_input_size(5).is_err());
    }
}
