//! Capability probing: deciding whether a (kind, signature) pair has an
//! implementation, and building the callable when it does.
//!
//! Probing is pure. It reads the capability table, and for lifted or
//! composed signatures resolves its constituent keys through the cache, so
//! the expensive part of any probe runs at most once per key process-wide.

use std::sync::Arc;

use crate::cache::{self, Resolution};
use crate::error::OpError;
use crate::kind::{OpKind, OpShape};
use crate::lift;
use crate::signature::TypeSignature;
use crate::table::{CapabilityTable, OpImpl};

/// Probe one key: lifting first (an optional operand never resolves against
/// the table directly), then the direct table entry, then the mixed-type
/// coercion fallback. A miss after all three is a remembered absence.
pub(crate) fn probe(kind: OpKind, signature: TypeSignature) -> Resolution {
    check_shape(kind, &signature);

    if let Some(outcome) = lift::lift(kind, &signature) {
        return outcome;
    }
    if let Some(op) = CapabilityTable::global().lookup(kind, &signature) {
        return Resolution::Resolved(op);
    }
    if let Some(outcome) = coerced_binary(kind, &signature) {
        return outcome;
    }
    Resolution::Unsupported(OpError::unsupported(kind, &signature))
}

/// A kind probed against the wrong signature shape is a bug in the caller,
/// never a cacheable absence.
fn check_shape(kind: OpKind, signature: &TypeSignature) {
    let ok = matches!(
        (kind.shape(), signature),
        (OpShape::Unary | OpShape::Producer, TypeSignature::Unary(_))
            | (OpShape::Binary | OpShape::Predicate, TypeSignature::Binary { .. })
            | (OpShape::Conversion, TypeSignature::Conversion { .. })
    );
    assert!(
        ok,
        "operator `{kind}` probed against mismatched signature {signature}"
    );
}

/// Mixed-type fallback: `(A, B) -> A` with no direct entry resolves as
/// `op(lhs, convert(rhs))` when both the conversion and the homogeneous
/// operator exist. This is what makes `divide_int(14514.7, 45)` work
/// without anyone registering a `(f64, i32)` divide.
fn coerced_binary(kind: OpKind, signature: &TypeSignature) -> Option<Resolution> {
    let TypeSignature::Binary { lhs, rhs, result } = *signature else {
        return None;
    };
    if kind.shape() != OpShape::Binary || lhs != result || rhs == result {
        return None;
    }

    let conversion = TypeSignature::Conversion {
        from: rhs,
        to: result,
    };
    let Resolution::Resolved(OpImpl::Unary(convert)) = cache::resolve(OpKind::Convert, conversion)
    else {
        return None;
    };
    let homogeneous = TypeSignature::Binary {
        lhs: result,
        rhs: result,
        result,
    };
    let Resolution::Resolved(OpImpl::Binary(base)) = cache::resolve(kind, homogeneous) else {
        return None;
    };

    Some(Resolution::Resolved(OpImpl::Binary(Arc::new(
        move |lhs, rhs| base(lhs, convert(rhs)),
    ))))
}
