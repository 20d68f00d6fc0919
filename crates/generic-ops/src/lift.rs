//! Null-propagating lifting of operators over `Option` operands.
//!
//! An optional operand never resolves on its own: the inner type's
//! resolution, obtained through the cache, is wrapped by one of the
//! combinators below. For value-producing operators any absent operand
//! short-circuits to an absent result without invoking the inner callable.
//! Comparisons follow the lifted-comparison policy documented in DESIGN.md:
//! equality is structural, ordered comparisons with an absent operand are
//! never true.

use std::any::Any;
use std::sync::Arc;

use crate::cache::{self, Resolution};
use crate::error::OpError;
use crate::kind::{OpKind, OpShape};
use crate::signature::{LiftVtable, TypeDesc, TypeSignature};
use crate::table::{unexpected_shape, OpImpl, PredicateImpl};

/// Attempt to lift `kind` over a signature containing optional operands.
/// Returns `None` when no constituent type is optional, letting the prober
/// fall through to a direct table lookup.
pub(crate) fn lift(kind: OpKind, signature: &TypeSignature) -> Option<Resolution> {
    match *signature {
        TypeSignature::Unary(operand) => {
            let vtable = *operand.lift()?;
            if kind == OpKind::ZeroValue {
                // The zero of an optional is the absent value, whatever the
                // inner type supports.
                return Some(Resolution::Resolved(OpImpl::Producer(Arc::new(
                    vtable.absent,
                ))));
            }
            Some(lift_unary(kind, operand, vtable))
        }
        TypeSignature::Binary { lhs, rhs, result } => {
            if !lhs.is_optional() && !rhs.is_optional() {
                return None;
            }
            if kind.shape() == OpShape::Predicate {
                Some(lift_predicate(kind, signature, lhs, rhs))
            } else {
                Some(lift_binary(kind, signature, lhs, rhs, result))
            }
        }
        TypeSignature::Conversion { from, to } => {
            if !from.is_optional() && !to.is_optional() {
                return None;
            }
            Some(lift_conversion(signature, from, to))
        }
    }
}

fn lift_unary(kind: OpKind, operand: TypeDesc, vtable: LiftVtable) -> Resolution {
    let inner_sig = TypeSignature::Unary((vtable.inner)());
    match cache::resolve(kind, inner_sig) {
        Resolution::Resolved(OpImpl::Unary(inner)) => {
            Resolution::Resolved(OpImpl::Unary(Arc::new(move |value| {
                if (vtable.is_absent)(value.as_ref()) {
                    (vtable.absent)()
                } else {
                    (vtable.rewrap)(inner((vtable.unwrap)(value)))
                }
            })))
        }
        Resolution::Resolved(other) => unexpected_shape(kind, &other),
        Resolution::Unsupported(inner) => {
            Resolution::Unsupported(OpError::inner(kind, operand.name(), inner))
        }
    }
}

fn lift_binary(
    kind: OpKind,
    signature: &TypeSignature,
    lhs: TypeDesc,
    rhs: TypeDesc,
    result: TypeDesc,
) -> Resolution {
    // Absence can only propagate into an optional result; `plain + optional`
    // with a plain result has nowhere to put it.
    let Some(result_vt) = result.lift().copied() else {
        return Resolution::Unsupported(OpError::unsupported(kind, signature));
    };

    let inner_sig = TypeSignature::Binary {
        lhs: lhs.inner().unwrap_or(lhs),
        rhs: rhs.inner().unwrap_or(rhs),
        result: (result_vt.inner)(),
    };
    match cache::resolve(kind, inner_sig) {
        Resolution::Resolved(OpImpl::Binary(inner)) => {
            let lhs_vt = lhs.lift().copied();
            let rhs_vt = rhs.lift().copied();
            Resolution::Resolved(OpImpl::Binary(Arc::new(move |lhs, rhs| {
                if absent_operand(&lhs_vt, lhs.as_ref()) || absent_operand(&rhs_vt, rhs.as_ref()) {
                    return (result_vt.absent)();
                }
                let lhs = unwrap_operand(&lhs_vt, lhs);
                let rhs = unwrap_operand(&rhs_vt, rhs);
                (result_vt.rewrap)(inner(lhs, rhs))
            })))
        }
        Resolution::Resolved(other) => unexpected_shape(kind, &other),
        Resolution::Unsupported(inner) => {
            Resolution::Unsupported(OpError::inner(kind, wrapper_name(lhs, rhs), inner))
        }
    }
}

fn lift_predicate(
    kind: OpKind,
    signature: &TypeSignature,
    lhs: TypeDesc,
    rhs: TypeDesc,
) -> Resolution {
    // Comparisons only lift when both operands share the optional wrapper.
    let (Some(lhs_vt), Some(rhs_vt)) = (lhs.lift().copied(), rhs.lift().copied()) else {
        return Resolution::Unsupported(OpError::unsupported(kind, signature));
    };

    let inner_lhs = (lhs_vt.inner)();
    let inner_sig = TypeSignature::Binary {
        lhs: inner_lhs,
        rhs: (rhs_vt.inner)(),
        result: inner_lhs,
    };
    match cache::resolve(kind, inner_sig) {
        Resolution::Resolved(OpImpl::Predicate(inner)) => {
            let lifted: PredicateImpl = match kind {
                OpKind::Equal => Arc::new(move |lhs, rhs| {
                    match ((lhs_vt.is_absent)(lhs.as_ref()), (rhs_vt.is_absent)(rhs.as_ref())) {
                        (true, true) => true,
                        (true, false) | (false, true) => false,
                        (false, false) => inner((lhs_vt.unwrap)(lhs), (rhs_vt.unwrap)(rhs)),
                    }
                }),
                OpKind::NotEqual => Arc::new(move |lhs, rhs| {
                    match ((lhs_vt.is_absent)(lhs.as_ref()), (rhs_vt.is_absent)(rhs.as_ref())) {
                        (true, true) => false,
                        (true, false) | (false, true) => true,
                        (false, false) => inner((lhs_vt.unwrap)(lhs), (rhs_vt.unwrap)(rhs)),
                    }
                }),
                // Ordered comparisons with an absent operand are never true.
                _ => Arc::new(move |lhs, rhs| {
                    if (lhs_vt.is_absent)(lhs.as_ref()) || (rhs_vt.is_absent)(rhs.as_ref()) {
                        false
                    } else {
                        inner((lhs_vt.unwrap)(lhs), (rhs_vt.unwrap)(rhs))
                    }
                }),
            };
            Resolution::Resolved(OpImpl::Predicate(lifted))
        }
        Resolution::Resolved(other) => unexpected_shape(kind, &other),
        Resolution::Unsupported(inner) => {
            Resolution::Unsupported(OpError::inner(kind, lhs.name(), inner))
        }
    }
}

fn lift_conversion(signature: &TypeSignature, from: TypeDesc, to: TypeDesc) -> Resolution {
    // `Option<A> -> B` cannot represent absence in the target.
    let Some(to_vt) = to.lift().copied() else {
        return Resolution::Unsupported(OpError::unsupported(OpKind::Convert, signature));
    };

    let inner_sig = TypeSignature::Conversion {
        from: from.inner().unwrap_or(from),
        to: (to_vt.inner)(),
    };
    match cache::resolve(OpKind::Convert, inner_sig) {
        Resolution::Resolved(OpImpl::Unary(inner)) => {
            let from_vt = from.lift().copied();
            Resolution::Resolved(OpImpl::Unary(Arc::new(move |value| {
                if absent_operand(&from_vt, value.as_ref()) {
                    return (to_vt.absent)();
                }
                (to_vt.rewrap)(inner(unwrap_operand(&from_vt, value)))
            })))
        }
        Resolution::Resolved(other) => unexpected_shape(OpKind::Convert, &other),
        Resolution::Unsupported(inner) => {
            let wrapper = if from.is_optional() {
                from.name()
            } else {
                to.name()
            };
            Resolution::Unsupported(OpError::inner(OpKind::Convert, wrapper, inner))
        }
    }
}

fn absent_operand(vtable: &Option<LiftVtable>, value: &dyn Any) -> bool {
    vtable.as_ref().is_some_and(|vt| (vt.is_absent)(value))
}

fn unwrap_operand(vtable: &Option<LiftVtable>, value: Box<dyn Any>) -> Box<dyn Any> {
    match vtable {
        Some(vt) => (vt.unwrap)(value),
        None => value,
    }
}

fn wrapper_name(lhs: TypeDesc, rhs: TypeDesc) -> &'static str {
    if lhs.is_optional() {
        lhs.name()
    } else {
        rhs.name()
    }
}
