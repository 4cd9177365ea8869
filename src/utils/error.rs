use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Request or record failed a presence check
    Validation(String),
    /// Identifier does not resolve to a stored record
    NotFound(String),
    /// Any failure reported by the document store
    Store(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "{}", msg),
            AppError::NotFound(msg) => write!(f, "{}", msg),
            AppError::Store(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::Store(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_bare_message() {
        let err = AppError::Store("connection refused".to_string());
        assert_eq!(format!("Error adding user: {}", err), "Error adding user: connection refused");
    }

    #[test]
    fn test_variants_are_distinct() {
        assert_ne!(
            AppError::NotFound("x".into()),
            AppError::Store("x".into())
        );
    }
}
