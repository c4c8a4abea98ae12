//! Error types for inference

/// Errors during type inference
#[derive(Debug, thiserror::Error)]
pub enum InferError {
    /// A matcher was requested by name but is not registered
    #[error("no matcher registered for type: '{0}'")]
    NoSuchMatcher(String),

    /// Column lookup failed
    #[error(transparent)]
    Table(#[from] scour_table::TableError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let err = InferError::NoSuchMatcher("zip_code".to_string());
        assert_eq!(err.to_string(), "no matcher registered for type: 'zip_code'");
    }
}
