//! The public operator facade.
//!
//! Stateless wrappers: each function derives a type signature from its type
//! parameters, asks the cache for the resolution, and either invokes the
//! shared callable or surfaces the remembered failure. No caching logic
//! lives here.
//!
//! Every function errors with [`OpError::Unsupported`] when the operand
//! type lacks the operator, or [`OpError::InnerUnsupported`] when an
//! `Option<T>` operand's inner `T` lacks it. The first call for a given
//! combination of types pays for resolution; later calls only pay a map
//! lookup and a dispatch.

use std::marker::PhantomData;

use crate::cache::{self, Resolution};
use crate::error::OpError;
use crate::kind::{OpKind, OpShape};
use crate::signature::{Operand, TypeSignature};
use crate::table::{take, unexpected_shape, BinaryImpl, OpImpl, PredicateImpl, UnaryImpl};

// ==================== Unary Operators ====================

/// Evaluates unary negation (`-`) for `T`.
pub fn negate<T: Operand>(value: T) -> Result<T, OpError> {
    unary(OpKind::Negate, value)
}

/// Evaluates bitwise complement (`~`) for `T`.
pub fn bitwise_not<T: Operand>(value: T) -> Result<T, OpError> {
    unary(OpKind::BitwiseNot, value)
}

// ==================== Binary Operators ====================

/// Evaluates binary addition (`+`) for `T`.
pub fn add<T: Operand>(lhs: T, rhs: T) -> Result<T, OpError> {
    homogeneous(OpKind::Add, lhs, rhs)
}

/// Evaluates binary subtraction (`-`) for `T`.
pub fn subtract<T: Operand>(lhs: T, rhs: T) -> Result<T, OpError> {
    homogeneous(OpKind::Subtract, lhs, rhs)
}

/// Evaluates binary multiplication (`*`) for `T`.
pub fn multiply<T: Operand>(lhs: T, rhs: T) -> Result<T, OpError> {
    homogeneous(OpKind::Multiply, lhs, rhs)
}

/// Evaluates binary division (`/`) for `T`.
pub fn divide<T: Operand>(lhs: T, rhs: T) -> Result<T, OpError> {
    homogeneous(OpKind::Divide, lhs, rhs)
}

/// Evaluates bitwise or (`|`) for `T`.
pub fn bitwise_or<T: Operand>(lhs: T, rhs: T) -> Result<T, OpError> {
    homogeneous(OpKind::BitwiseOr, lhs, rhs)
}

/// Evaluates bitwise and (`&`) for `T`.
pub fn bitwise_and<T: Operand>(lhs: T, rhs: T) -> Result<T, OpError> {
    homogeneous(OpKind::BitwiseAnd, lhs, rhs)
}

/// Evaluates bitwise xor (`^`) for `T`.
pub fn bitwise_xor<T: Operand>(lhs: T, rhs: T) -> Result<T, OpError> {
    homogeneous(OpKind::BitwiseXor, lhs, rhs)
}

// ==================== Comparisons ====================

/// Evaluates equality (`==`) for `T`.
pub fn equal<T: Operand>(lhs: T, rhs: T) -> Result<bool, OpError> {
    comparison(OpKind::Equal, lhs, rhs)
}

/// Evaluates inequality (`!=`) for `T`.
pub fn not_equal<T: Operand>(lhs: T, rhs: T) -> Result<bool, OpError> {
    comparison(OpKind::NotEqual, lhs, rhs)
}

/// Evaluates greater-than (`>`) for `T`.
pub fn greater_than<T: Operand>(lhs: T, rhs: T) -> Result<bool, OpError> {
    comparison(OpKind::GreaterThan, lhs, rhs)
}

/// Evaluates less-than (`<`) for `T`.
pub fn less_than<T: Operand>(lhs: T, rhs: T) -> Result<bool, OpError> {
    comparison(OpKind::LessThan, lhs, rhs)
}

/// Evaluates greater-than-or-equal (`>=`) for `T`.
pub fn greater_than_or_equal<T: Operand>(lhs: T, rhs: T) -> Result<bool, OpError> {
    comparison(OpKind::GreaterThanOrEqual, lhs, rhs)
}

/// Evaluates less-than-or-equal (`<=`) for `T`.
pub fn less_than_or_equal<T: Operand>(lhs: T, rhs: T) -> Result<bool, OpError> {
    comparison(OpKind::LessThanOrEqual, lhs, rhs)
}

// ==================== Mixed-Type Operators ====================
//
// The "alternative" forms take operands of two different types; the result
// type is the left operand's. When no direct capability exists for the
// pair, resolution falls back to converting the right operand to the
// result type (see the prober).

/// Evaluates addition for mixed operand types, e.g. a timestamp plus a
/// duration.
pub fn add_alternative<L: Operand, R: Operand>(lhs: L, rhs: R) -> Result<L, OpError> {
    alternative(OpKind::Add, lhs, rhs)
}

/// Evaluates subtraction for mixed operand types.
pub fn subtract_alternative<L: Operand, R: Operand>(lhs: L, rhs: R) -> Result<L, OpError> {
    alternative(OpKind::Subtract, lhs, rhs)
}

/// Evaluates multiplication for mixed operand types.
pub fn multiply_alternative<L: Operand, R: Operand>(lhs: L, rhs: R) -> Result<L, OpError> {
    alternative(OpKind::Multiply, lhs, rhs)
}

/// Evaluates division for mixed operand types.
pub fn divide_alternative<L: Operand, R: Operand>(lhs: L, rhs: R) -> Result<L, OpError> {
    alternative(OpKind::Divide, lhs, rhs)
}

/// Divides `value` by an `i32` divisor, yielding `T`. Useful for averages
/// and similar aggregates where the divisor is a count.
pub fn divide_int<T: Operand>(value: T, divisor: i32) -> Result<T, OpError> {
    alternative(OpKind::Divide, value, divisor)
}

// ==================== Conversion and Zero ====================

/// Converts a value from `From` to `To`.
pub fn convert<From: Operand, To: Operand>(value: From) -> Result<To, OpError> {
    match cache::resolve(OpKind::Convert, TypeSignature::conversion::<From, To>()) {
        Resolution::Resolved(OpImpl::Unary(f)) => Ok(take::<To>(f(Box::new(value)))),
        Resolution::Resolved(other) => unexpected_shape(OpKind::Convert, &other),
        Resolution::Unsupported(err) => Err(err),
    }
}

/// Returns the zero value for `T`: the additive identity for numeric
/// types, empty for `String`, absent for `Option<_>`.
pub fn zero<T: Operand>() -> Result<T, OpError> {
    match cache::resolve(OpKind::ZeroValue, TypeSignature::unary::<T>()) {
        Resolution::Resolved(OpImpl::Producer(f)) => Ok(take::<T>(f())),
        Resolution::Resolved(other) => unexpected_shape(OpKind::ZeroValue, &other),
        Resolution::Unsupported(err) => Err(err),
    }
}

// ==================== Resolved Handles ====================
//
// Accessors for the resolved callable itself, for callers that invoke an
// operator in a tight loop and want resolution hoisted out of it. A handle
// is cheap to clone; the underlying callable is shared with the cache.
// `call` never fails: resolution already happened at acquisition.

/// A resolved unary operator for `T`.
pub struct UnaryFn<T> {
    op: UnaryImpl,
    _types: PhantomData<fn(T) -> T>,
}

impl<T: Operand> UnaryFn<T> {
    /// Apply the operator.
    pub fn call(&self, value: T) -> T {
        take::<T>((self.op)(Box::new(value)))
    }
}

impl<T> Clone for UnaryFn<T> {
    fn clone(&self) -> Self {
        UnaryFn {
            op: self.op.clone(),
            _types: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for UnaryFn<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnaryFn").finish_non_exhaustive()
    }
}

/// A resolved binary operator with operand types `L` and `R` and result
/// type `L`.
pub struct BinaryFn<L, R = L> {
    op: BinaryImpl,
    _types: PhantomData<fn(L, R) -> L>,
}

impl<L: Operand, R: Operand> BinaryFn<L, R> {
    /// Apply the operator.
    pub fn call(&self, lhs: L, rhs: R) -> L {
        take::<L>((self.op)(Box::new(lhs), Box::new(rhs)))
    }
}

impl<L, R> Clone for BinaryFn<L, R> {
    fn clone(&self) -> Self {
        BinaryFn {
            op: self.op.clone(),
            _types: PhantomData,
        }
    }
}

/// A resolved comparison over `T`.
pub struct PredicateFn<T> {
    op: PredicateImpl,
    _types: PhantomData<fn(T, T) -> bool>,
}

impl<T: Operand> PredicateFn<T> {
    /// Apply the comparison.
    pub fn call(&self, lhs: T, rhs: T) -> bool {
        (self.op)(Box::new(lhs), Box::new(rhs))
    }
}

impl<T> Clone for PredicateFn<T> {
    fn clone(&self) -> Self {
        PredicateFn {
            op: self.op.clone(),
            _types: PhantomData,
        }
    }
}

/// A resolved conversion from `From` to `To`.
pub struct ConvertFn<From, To> {
    op: UnaryImpl,
    _types: PhantomData<fn(From) -> To>,
}

impl<From: Operand, To: Operand> ConvertFn<From, To> {
    /// Apply the conversion.
    pub fn call(&self, value: From) -> To {
        take::<To>((self.op)(Box::new(value)))
    }
}

impl<From, To> Clone for ConvertFn<From, To> {
    fn clone(&self) -> Self {
        ConvertFn {
            op: self.op.clone(),
            _types: PhantomData,
        }
    }
}

/// Acquire the resolved callable for a unary operator over `T`.
///
/// # Panics
///
/// If `kind` is not a unary operator.
pub fn unary_fn<T: Operand>(kind: OpKind) -> Result<UnaryFn<T>, OpError> {
    assert!(
        kind.shape() == OpShape::Unary,
        "`{kind}` is not a unary operator"
    );
    match cache::resolve(kind, TypeSignature::unary::<T>()) {
        Resolution::Resolved(OpImpl::Unary(op)) => Ok(UnaryFn {
            op,
            _types: PhantomData,
        }),
        Resolution::Resolved(other) => unexpected_shape(kind, &other),
        Resolution::Unsupported(err) => Err(err),
    }
}

/// Acquire the resolved callable for a binary operator with operand types
/// `L` and `R`. Same-type operators use `R = L`.
///
/// # Panics
///
/// If `kind` is not an arithmetic or bitwise binary operator.
pub fn binary_fn<L: Operand, R: Operand>(kind: OpKind) -> Result<BinaryFn<L, R>, OpError> {
    assert!(
        kind.shape() == OpShape::Binary,
        "`{kind}` is not a binary operator"
    );
    match cache::resolve(kind, TypeSignature::mixed::<L, R>()) {
        Resolution::Resolved(OpImpl::Binary(op)) => Ok(BinaryFn {
            op,
            _types: PhantomData,
        }),
        Resolution::Resolved(other) => unexpected_shape(kind, &other),
        Resolution::Unsupported(err) => Err(err),
    }
}

/// Acquire the resolved callable for a comparison over `T`.
///
/// # Panics
///
/// If `kind` is not a comparison operator.
pub fn predicate_fn<T: Operand>(kind: OpKind) -> Result<PredicateFn<T>, OpError> {
    assert!(
        kind.shape() == OpShape::Predicate,
        "`{kind}` is not a comparison operator"
    );
    match cache::resolve(kind, TypeSignature::homogeneous::<T>()) {
        Resolution::Resolved(OpImpl::Predicate(op)) => Ok(PredicateFn {
            op,
            _types: PhantomData,
        }),
        Resolution::Resolved(other) => unexpected_shape(kind, &other),
        Resolution::Unsupported(err) => Err(err),
    }
}

/// Acquire the resolved conversion from `From` to `To`.
pub fn convert_fn<From: Operand, To: Operand>() -> Result<ConvertFn<From, To>, OpError> {
    match cache::resolve(OpKind::Convert, TypeSignature::conversion::<From, To>()) {
        Resolution::Resolved(OpImpl::Unary(op)) => Ok(ConvertFn {
            op,
            _types: PhantomData,
        }),
        Resolution::Resolved(other) => unexpected_shape(OpKind::Convert, &other),
        Resolution::Unsupported(err) => Err(err),
    }
}

// ==================== Dispatch Helpers ====================

fn unary<T: Operand>(kind: OpKind, value: T) -> Result<T, OpError> {
    match cache::resolve(kind, TypeSignature::unary::<T>()) {
        Resolution::Resolved(OpImpl::Unary(f)) => Ok(take::<T>(f(Box::new(value)))),
        Resolution::Resolved(other) => unexpected_shape(kind, &other),
        Resolution::Unsupported(err) => Err(err),
    }
}

fn homogeneous<T: Operand>(kind: OpKind, lhs: T, rhs: T) -> Result<T, OpError> {
    match cache::resolve(kind, TypeSignature::homogeneous::<T>()) {
        Resolution::Resolved(OpImpl::Binary(f)) => {
            Ok(take::<T>(f(Box::new(lhs), Box::new(rhs))))
        }
        Resolution::Resolved(other) => unexpected_shape(kind, &other),
        Resolution::Unsupported(err) => Err(err),
    }
}

fn alternative<L: Operand, R: Operand>(kind: OpKind, lhs: L, rhs: R) -> Result<L, OpError> {
    match cache::resolve(kind, TypeSignature::mixed::<L, R>()) {
        Resolution::Resolved(OpImpl::Binary(f)) => {
            Ok(take::<L>(f(Box::new(lhs), Box::new(rhs))))
        }
        Resolution::Resolved(other) => unexpected_shape(kind, &other),
        Resolution::Unsupported(err) => Err(err),
    }
}

fn comparison<T: Operand>(kind: OpKind, lhs: T, rhs: T) -> Result<bool, OpError> {
    match cache::resolve(kind, TypeSignature::homogeneous::<T>()) {
        Resolution::Resolved(OpImpl::Predicate(f)) => Ok(f(Box::new(lhs), Box::new(rhs))),
        Resolution::Resolved(other) => unexpected_shape(kind, &other),
        Resolution::Unsupported(err) => Err(err),
    }
}
