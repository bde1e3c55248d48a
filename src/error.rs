#[derive(thiserror::Error, Debug)]
pub enum TimelineError {
    #[error("invalid page json: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("page `results` must be an array")]
    ResultsNotArray,
    #[error("failed to read page file: {0}")]
    Io(#[from] std::io::Error),
}
