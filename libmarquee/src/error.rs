//! Error types for Marquee

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MarqueeError>;

#[derive(Error, Debug)]
pub enum MarqueeError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Reveal sequencer is already registered")]
    AlreadyRegistered,

    #[error("Section already registered: {0}")]
    DuplicateSection(String),

    #[error("Unknown section: {0}")]
    UnknownSection(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl MarqueeError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            MarqueeError::InvalidConfig(_) => 3,
            MarqueeError::AlreadyRegistered => 3,
            MarqueeError::DuplicateSection(_) => 3,
            MarqueeError::UnknownSection(_) => 3,
            MarqueeError::Config(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Unknown preset: '{0}'")]
    UnknownPreset(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_misuse_errors() {
        assert_eq!(MarqueeError::InvalidConfig("empty".to_string()).exit_code(), 3);
        assert_eq!(MarqueeError::AlreadyRegistered.exit_code(), 3);
        assert_eq!(MarqueeError::DuplicateSection("faq".to_string()).exit_code(), 3);
        assert_eq!(MarqueeError::UnknownSection("faq".to_string()).exit_code(), 3);
    }

    #[test]
    fn test_exit_code_config_error() {
        let error = MarqueeError::Config(ConfigError::MissingField("engine.phrases".to_string()));
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_error_message_formatting_invalid_config() {
        let error = MarqueeError::InvalidConfig("phrase list cannot be empty".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid configuration: phrase list cannot be empty"
        );
    }

    #[test]
    fn test_error_message_formatting_sections() {
        let duplicate = MarqueeError::DuplicateSection("features".to_string());
        assert_eq!(duplicate.to_string(), "Section already registered: features");

        let unknown = MarqueeError::UnknownSection("pricing".to_string());
        assert_eq!(unknown.to_string(), "Unknown section: pricing");
    }

    #[test]
    fn test_error_message_formatting_config() {
        let error = MarqueeError::Config(ConfigError::UnknownPreset("neon".to_string()));
        assert_eq!(error.to_string(), "Configuration error: Unknown preset: 'neon'");
    }

    #[test]
    fn test_error_conversion_from_config_error() {
        let config_error = ConfigError::MissingField("page.title".to_string());
        let error: MarqueeError = config_error.into();

        match error {
            MarqueeError::Config(ConfigError::MissingField(field)) => {
                assert_eq!(field, "page.title");
            }
            _ => panic!("Expected MarqueeError::Config"),
        }
    }

    #[test]
    fn test_config_error_read_error_formatting() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let config_error = ConfigError::ReadError(io_error);
        assert!(config_error.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<u32> {
            Ok(3)
        }

        fn returns_err() -> Result<u32> {
            Err(MarqueeError::AlreadyRegistered)
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }
}
