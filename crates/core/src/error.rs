#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid environment variable {name}: {message}")]
    InvalidEnv { name: &'static str, message: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}
