use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Version error: {0}")]
    Version(#[from] VersionError),

    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration file {path}: {reason}")]
    InvalidFile { path: String, reason: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum VersionError {
    #[error("Could not find {0} variable in build file")]
    MissingComponent(String),

    #[error("Invalid version '{0}': expected MAJOR.MINOR.PATCH")]
    Malformed(String),

    #[error("Invalid number '{value}' for {component}")]
    InvalidNumber { component: String, value: String },

    #[error("Version component {0} overflowed")]
    Overflow(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
