#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("--times must not be negative (got {0})")]
    NegativeTimes(i64),

    #[error("nobody to greet")]
    EmptyName,

    #[error("{path} contains no lines longer than {min}")]
    NothingCounted { path: String, min: i64 },
}
