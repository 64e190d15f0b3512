use thiserror::Error;

#[derive(Error, Debug)]
pub enum BirthdayError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Permission denied: {0}")]
    Permission(String),

    #[error("Birthday not found: {0}")]
    NotFound(String),

    #[error("Birthday already registered for {0}")]
    AlreadyRegistered(String),

    #[error("Channel unavailable: {0}")]
    ChannelUnavailable(String),

    #[error("Collaborator error: {0}")]
    Collaborator(#[from] eyre::Report),
}

impl BirthdayError {
    /// Whether the error is caused by the invoker and should be reported back
    /// to them, rather than only logged.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, Self::ChannelUnavailable(_) | Self::Collaborator(_))
    }
}

pub type BirthdayResult<T> = Result<T, BirthdayError>;
