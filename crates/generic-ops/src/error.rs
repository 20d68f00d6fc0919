//! Resolution failure types.

use thiserror::Error;

use crate::kind::OpKind;
use crate::signature::TypeSignature;

/// A recoverable resolution failure: the operand type(s) simply do not
/// define the requested operator.
///
/// These are application-level conditions, cached permanently and returned
/// unchanged on every later use of the same key. Contract violations
/// (mismatched operand shapes, nested optionals, wrong-category
/// registrations) are programmer errors and panic instead of surfacing
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpError {
    /// No capability entry exists for the operator and signature.
    #[error("operator `{kind}` is not defined for {signature}")]
    Unsupported {
        /// The operator that failed to resolve.
        kind: OpKind,
        /// Display form of the offending signature.
        signature: String,
    },

    /// An optional-lifted resolution failed because the inner type lacks
    /// the operator.
    #[error("cannot lift operator `{kind}` over `{wrapper}`")]
    InnerUnsupported {
        /// The operator that failed to lift.
        kind: OpKind,
        /// The optional wrapper type the lift was attempted for.
        wrapper: &'static str,
        /// The inner type's failure.
        #[source]
        source: Box<OpError>,
    },
}

impl OpError {
    pub(crate) fn unsupported(kind: OpKind, signature: &TypeSignature) -> Self {
        OpError::Unsupported {
            kind,
            signature: signature.to_string(),
        }
    }

    pub(crate) fn inner(kind: OpKind, wrapper: &'static str, source: OpError) -> Self {
        OpError::InnerUnsupported {
            kind,
            wrapper,
            source: Box::new(source),
        }
    }

    /// True when the failure originated from an inner type under optional
    /// lifting, as opposed to the named type itself lacking the operator.
    pub fn is_lifted(&self) -> bool {
        matches!(self, OpError::InnerUnsupported { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_operator_and_type() {
        let err = OpError::unsupported(OpKind::Multiply, &TypeSignature::homogeneous::<String>());
        let message = err.to_string();
        assert!(message.contains('*'), "got: {message}");
        assert!(message.contains("String"), "got: {message}");
    }

    #[test]
    fn test_lifted_failure_chains_inner_reason() {
        let inner = OpError::unsupported(OpKind::Add, &TypeSignature::homogeneous::<String>());
        let err = OpError::inner(OpKind::Add, "Option<String>", inner.clone());
        assert!(err.is_lifted());
        assert!(!inner.is_lifted());

        let source = std::error::Error::source(&err).expect("inner reason");
        assert_eq!(source.to_string(), inner.to_string());
    }
}
