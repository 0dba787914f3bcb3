use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("object already tracked: {0}")]
    Duplicate(String),
    #[error("object not found: {0}")]
    NotFound(String),
}
