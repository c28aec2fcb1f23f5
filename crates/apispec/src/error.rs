/// Failure of a [`Specifier`](crate::Specifier) query.
///
/// Only two situations are errors. Every other piece of missing metadata (a
/// description, a parameter, a validation tag, a unit return) is reported as
/// `None` in the result instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpecifierError {
    /// The bound type has no public method with this name.
    #[error("method `{method}` not found on `{type_name}`")]
    NotFound { type_name: String, method: String },

    /// The method exists but carries no description, which is what
    /// `api_method_param_names` requires of an API method.
    #[error("{method} is not an ApiMethod")]
    InvalidOperation { method: String },
}

impl SpecifierError {
    pub fn method(&self) -> &str {
        match self {
            SpecifierError::NotFound { method, .. } => method,
            SpecifierError::InvalidOperation { method } => method,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SpecifierError::NotFound { .. })
    }
}

pub type Result<T, E = SpecifierError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_method() {
        let not_found = SpecifierError::NotFound {
            type_name: "Calculator".to_string(),
            method: "divide".to_string(),
        };
        assert_eq!(not_found.to_string(), "method `divide` not found on `Calculator`");
        assert!(not_found.is_not_found());
        assert_eq!(not_found.method(), "divide");

        let invalid = SpecifierError::InvalidOperation {
            method: "reset".to_string(),
        };
        assert_eq!(invalid.to_string(), "reset is not an ApiMethod");
        assert!(!invalid.is_not_found());
    }
}
