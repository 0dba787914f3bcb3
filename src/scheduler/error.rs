use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("object not found: {0}")]
    NotFound(String),
}
