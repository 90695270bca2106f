use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required environment variable is unset.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// A configuration value failed validation during startup.
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}
