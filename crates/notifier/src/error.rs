use thiserror::Error;

use valentine_common::error::AppError;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} rejected the email ({status}): {body}")]
    Rejected {
        provider: &'static str,
        status: u16,
        body: String,
    },
}

impl From<NotifyError> for AppError {
    fn from(err: NotifyError) -> Self {
        AppError::Delivery(err.to_string())
    }
}
