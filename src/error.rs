pub type SlidereelResult<T> = Result<T, SlidereelError>;

#[derive(thiserror::Error, Debug)]
pub enum SlidereelError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("interpolation error: {0}")]
    Interpolation(String),

    #[error("evaluation error: {0}")]
    Evaluation(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlidereelError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn interpolation(msg: impl Into<String>) -> Self {
        Self::Interpolation(msg.into())
    }

    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            SlidereelError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            SlidereelError::interpolation("x")
                .to_string()
                .contains("interpolation error:")
        );
        assert!(
            SlidereelError::evaluation("x")
                .to_string()
                .contains("evaluation error:")
        );
        assert!(
            SlidereelError::serde("x")
                .to_string()
                .contains("serialization error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = SlidereelError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
