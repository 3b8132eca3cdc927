use process_event_domain::error::DomainError;

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("domain: {0}")]
    Domain(#[from] DomainError),

    #[error("publish failed: publishers={publishers:?}, reason={reason}")]
    Publish {
        publishers: Vec<String>,
        reason: String,
    },
}

pub type AppResult<T> = Result<T, AppError>;
