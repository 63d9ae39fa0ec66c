//! Generator configuration and errors.

use sortcheck_schema::SchemaError;
use thiserror::Error;

/// Default length of random name tokens.
pub const DEFAULT_NAME_LENGTH: usize = 10;

/// Errors from malformed generator configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("name length must be at least 1, got {0}")]
    InvalidNameLength(usize),

    #[error("max keys must be at least 1, got {0}")]
    InvalidMaxKeys(usize),

    #[error("invalid test case: {0}")]
    Schema(#[from] SchemaError),
}

/// Where given names and surnames come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameSource {
    /// Random capitalized ASCII tokens.
    #[default]
    Random,
    /// Names drawn from a built-in list of common names.
    Curated,
}

/// Record generator configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub name_length: usize,
    pub name_source: NameSource,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            name_length: DEFAULT_NAME_LENGTH,
            name_source: NameSource::Random,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name_length(mut self, name_length: usize) -> Self {
        self.name_length = name_length;
        self
    }

    pub fn with_name_source(mut self, name_source: NameSource) -> Self {
        self.name_source = name_source;
        self
    }

    /// Reject configurations that cannot produce records.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.name_length == 0 {
            return Err(GenerationError::InvalidNameLength(self.name_length));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.name_length, 10);
        assert_eq!(config.name_source, NameSource::Random);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = GeneratorConfig::new()
            .with_name_length(4)
            .with_name_source(NameSource::Curated);
        assert_eq!(config.name_length, 4);
        assert_eq!(config.name_source, NameSource::Curated);
    }

    #[test]
    fn test_zero_name_length_rejected() {
        let config = GeneratorConfig::new().with_name_length(0);
        assert_eq!(config.validate(), Err(GenerationError::InvalidNameLength(0)));
    }
}
