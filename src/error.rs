//! Error types for multi-method calls.

use thiserror::Error;

/// A call failed because the dispatch table holds no unique best override
/// for the dynamic argument tuple.
///
/// Both kinds carry the method name; they are raised by the sentinel entries
/// installed wherever table construction found no single winner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MethodError {
    /// No registered override applies to the argument tuple.
    #[error("this call to '{method}' is not implemented")]
    NotImplemented { method: String },

    /// Several overrides apply and none is most specific.
    #[error("this call to '{method}' is ambiguous")]
    Ambiguous { method: String },
}

impl MethodError {
    /// Create a not-implemented error for the named method.
    pub fn not_implemented<S: Into<String>>(method: S) -> Self {
        MethodError::NotImplemented {
            method: method.into(),
        }
    }

    /// Create an ambiguity error for the named method.
    pub fn ambiguous<S: Into<String>>(method: S) -> Self {
        MethodError::Ambiguous {
            method: method.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MethodError::not_implemented("plus");
        assert_eq!(format!("{}", err), "this call to 'plus' is not implemented");

        let err = MethodError::ambiguous("plus");
        assert_eq!(format!("{}", err), "this call to 'plus' is ambiguous");
    }
}
