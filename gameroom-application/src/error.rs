use gameroom_domain::ReportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::InvalidParameter(reason) => AppError::BadRequest(reason),
            ReportError::MissingDocument(document) => {
                AppError::NotFound(format!("{document} was not loaded"))
            }
            other => AppError::Internal(other.into()),
        }
    }
}
