pub type LoopreelResult<T> = Result<T, LoopreelError>;

#[derive(thiserror::Error, Debug)]
pub enum LoopreelError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LoopreelError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
