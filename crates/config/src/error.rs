use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config in {}: {message}", path.display())]
    Invalid { path: PathBuf, message: String },

    #[error("Unsupported config format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Invalid indent `{value}`: expected \"auto\", a non-negative integer, \"+n\" or \"-n\"")]
    InvalidIndent { value: String },

    #[error(
        "Unknown setting `{key}`{}",
        .suggestion.as_ref().map_or_else(String::new, |s| format!(", did you mean `{s}`?"))
    )]
    UnknownSetting {
        key: String,
        suggestion: Option<String>,
    },
}
