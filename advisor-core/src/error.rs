use thiserror::Error;

/// Errors produced while turning raw input into recommendations.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// A required field is missing or outside its physical range.
    #[error("Invalid observation field '{field}': {message}")]
    Validation { field: &'static str, message: String },

    /// Input was not well-formed JSON, or a field had the wrong type.
    #[error("Failed to parse observation: {0}")]
    Parse(#[from] serde_json::Error),

    /// A configuration value would break an advisor invariant.
    #[error("Invalid configuration: {message}")]
    Config { message: String },
}

impl AdvisorError {
    pub fn validation<S: Into<String>>(field: &'static str, message: S) -> Self {
        Self::Validation { field, message: message.into() }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    /// Name of the offending field for validation errors.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

pub type Result<T, E = AdvisorError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_field() {
        let err = AdvisorError::validation("humidity", "must be within 0..=100, got 140");

        assert_eq!(err.field(), Some("humidity"));
        assert!(err.to_string().contains("'humidity'"));
        assert!(err.to_string().contains("140"));
    }

    #[test]
    fn json_error_converts_to_parse() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: AdvisorError = json_err.into();

        assert!(matches!(err, AdvisorError::Parse(_)));
        assert_eq!(err.field(), None);
    }
}
