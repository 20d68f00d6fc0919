//! The capability table: which (operator, signature) pairs have an
//! implementation, and the type-erased callables that implement them.
//!
//! This table is the stand-in for reflective operator discovery: a type
//! supports an operator exactly when an entry (or a composition the prober
//! can derive from entries) exists here. Built-ins are installed once at
//! first access; applications extend the table through the `register_*`
//! functions.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;

use crate::builtins;
use crate::kind::{OpKind, OpShape};
use crate::signature::{Operand, TypeSignature};

pub(crate) type UnaryImpl = Arc<dyn Fn(Box<dyn Any>) -> Box<dyn Any> + Send + Sync>;
pub(crate) type BinaryImpl = Arc<dyn Fn(Box<dyn Any>, Box<dyn Any>) -> Box<dyn Any> + Send + Sync>;
pub(crate) type PredicateImpl = Arc<dyn Fn(Box<dyn Any>, Box<dyn Any>) -> bool + Send + Sync>;
pub(crate) type ProducerImpl = Arc<dyn Fn() -> Box<dyn Any> + Send + Sync>;

/// Type-erased implementation of one resolved operator.
///
/// Operands and results travel as `Box<dyn Any>`; the facade boxes and
/// unboxes against the signature the entry was resolved for. A resolved
/// implementation is a pure function of its operands and may be invoked
/// concurrently without synchronization.
#[derive(Clone)]
pub(crate) enum OpImpl {
    Unary(UnaryImpl),
    Binary(BinaryImpl),
    Predicate(PredicateImpl),
    Producer(ProducerImpl),
}

impl fmt::Debug for OpImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shape = match self {
            OpImpl::Unary(_) => "Unary",
            OpImpl::Binary(_) => "Binary",
            OpImpl::Predicate(_) => "Predicate",
            OpImpl::Producer(_) => "Producer",
        };
        f.debug_tuple(shape).finish()
    }
}

/// Downcast an erased operand to the concrete type its signature declared.
///
/// A failure here means a callable was invoked with operands that do not
/// match the signature it was resolved for, which is a bug in the engine or
/// in a caller bypassing the facade.
pub(crate) fn take<T: 'static>(value: Box<dyn Any>) -> T {
    match value.downcast::<T>() {
        Ok(v) => *v,
        Err(_) => panic!(
            "operand does not match its resolved signature: expected `{}`",
            type_name::<T>()
        ),
    }
}

/// A resolution produced a callable of the wrong shape for its kind.
pub(crate) fn unexpected_shape(kind: OpKind, op: &OpImpl) -> ! {
    panic!("operator `{kind}` resolved with unexpected shape {op:?}")
}

pub(crate) struct CapabilityTable {
    entries: DashMap<(OpKind, TypeSignature), OpImpl>,
}

static TABLE: LazyLock<CapabilityTable> = LazyLock::new(|| {
    let table = CapabilityTable {
        entries: DashMap::new(),
    };
    builtins::install(&table);
    table
});

impl CapabilityTable {
    pub(crate) fn global() -> &'static CapabilityTable {
        &TABLE
    }

    pub(crate) fn lookup(&self, kind: OpKind, signature: &TypeSignature) -> Option<OpImpl> {
        self.entries
            .get(&(kind, *signature))
            .map(|entry| entry.value().clone())
    }

    fn insert(&self, kind: OpKind, signature: TypeSignature, op: OpImpl) {
        self.entries.insert((kind, signature), op);
    }

    pub(crate) fn insert_unary<T: Operand>(
        &self,
        kind: OpKind,
        f: impl Fn(T) -> T + Send + Sync + 'static,
    ) {
        check_category(kind, OpShape::Unary);
        check_plain::<T>(kind);
        self.insert(
            kind,
            TypeSignature::unary::<T>(),
            OpImpl::Unary(Arc::new(move |value| Box::new(f(take::<T>(value))))),
        );
    }

    pub(crate) fn insert_binary<L: Operand, R: Operand, O: Operand>(
        &self,
        kind: OpKind,
        f: impl Fn(L, R) -> O + Send + Sync + 'static,
    ) {
        check_category(kind, OpShape::Binary);
        check_plain::<L>(kind);
        check_plain::<R>(kind);
        check_plain::<O>(kind);
        let signature = TypeSignature::Binary {
            lhs: L::descriptor(),
            rhs: R::descriptor(),
            result: O::descriptor(),
        };
        self.insert(
            kind,
            signature,
            OpImpl::Binary(Arc::new(move |lhs, rhs| {
                Box::new(f(take::<L>(lhs), take::<R>(rhs)))
            })),
        );
    }

    pub(crate) fn insert_comparison<T: Operand>(
        &self,
        kind: OpKind,
        f: impl Fn(T, T) -> bool + Send + Sync + 'static,
    ) {
        check_category(kind, OpShape::Predicate);
        check_plain::<T>(kind);
        self.insert(
            kind,
            TypeSignature::homogeneous::<T>(),
            OpImpl::Predicate(Arc::new(move |lhs, rhs| f(take::<T>(lhs), take::<T>(rhs)))),
        );
    }

    pub(crate) fn insert_conversion<A: Operand, B: Operand>(
        &self,
        f: impl Fn(A) -> B + Send + Sync + 'static,
    ) {
        check_plain::<A>(OpKind::Convert);
        check_plain::<B>(OpKind::Convert);
        self.insert(
            OpKind::Convert,
            TypeSignature::conversion::<A, B>(),
            OpImpl::Unary(Arc::new(move |value| Box::new(f(take::<A>(value))))),
        );
    }

    pub(crate) fn insert_zero<T: Operand>(&self, f: impl Fn() -> T + Send + Sync + 'static) {
        check_plain::<T>(OpKind::ZeroValue);
        self.insert(
            OpKind::ZeroValue,
            TypeSignature::unary::<T>(),
            OpImpl::Producer(Arc::new(move || Box::new(f()))),
        );
    }
}

fn check_category(kind: OpKind, expected: OpShape) {
    assert!(
        kind.shape() == expected,
        "operator `{kind}` cannot be registered as a {expected:?} capability"
    );
}

fn check_plain<T: Operand>(kind: OpKind) {
    assert!(
        !T::descriptor().is_optional(),
        "optional types resolve through lifting; register `{kind}` for the inner type instead of `{}`",
        type_name::<T>()
    );
}

/// Register a unary operator implementation for `T`.
///
/// # Panics
///
/// If `kind` is not a unary operator, or `T` is an `Option`.
pub fn register_unary<T: Operand>(kind: OpKind, f: impl Fn(T) -> T + Send + Sync + 'static) {
    CapabilityTable::global().insert_unary(kind, f);
}

/// Register a binary operator implementation with operand types `L` and `R`
/// and result type `O`. Same-type operators register with `L = R = O`.
///
/// Capabilities registered after a signature has already resolved
/// `Unsupported` do not change the cached outcome; register before first
/// use.
///
/// # Panics
///
/// If `kind` is not an arithmetic or bitwise binary operator, or any of the
/// types is an `Option`.
pub fn register_binary<L: Operand, R: Operand, O: Operand>(
    kind: OpKind,
    f: impl Fn(L, R) -> O + Send + Sync + 'static,
) {
    CapabilityTable::global().insert_binary(kind, f);
}

/// Register a comparison implementation for `T`.
///
/// # Panics
///
/// If `kind` is not a comparison operator, or `T` is an `Option`.
pub fn register_comparison<T: Operand>(
    kind: OpKind,
    f: impl Fn(T, T) -> bool + Send + Sync + 'static,
) {
    CapabilityTable::global().insert_comparison(kind, f);
}

/// Register a conversion from `A` to `B`.
///
/// # Panics
///
/// If either type is an `Option`; conversions lift over optionals
/// automatically.
pub fn register_conversion<A: Operand, B: Operand>(f: impl Fn(A) -> B + Send + Sync + 'static) {
    CapabilityTable::global().insert_conversion(f);
}

/// Register the zero value for `T`.
///
/// # Panics
///
/// If `T` is an `Option`; the zero of an optional is always the absent
/// value.
pub fn register_zero<T: Operand>(f: impl Fn() -> T + Send + Sync + 'static) {
    CapabilityTable::global().insert_zero(f);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_misses_unregistered_signature() {
        struct Unregistered;
        impl Operand for Unregistered {
            fn descriptor() -> crate::signature::TypeDesc {
                crate::signature::TypeDesc::plain::<Unregistered>()
            }
        }
        let table = CapabilityTable::global();
        assert!(table
            .lookup(OpKind::Add, &TypeSignature::homogeneous::<Unregistered>())
            .is_none());
    }

    #[test]
    #[should_panic(expected = "cannot be registered")]
    fn test_wrong_category_registration_panics() {
        CapabilityTable::global().insert_unary::<i32>(OpKind::Add, |v| v);
    }

    #[test]
    #[should_panic(expected = "register `+` for the inner type")]
    fn test_optional_registration_panics() {
        CapabilityTable::global().insert_binary::<Option<i32>, Option<i32>, Option<i32>>(
            OpKind::Add,
            |lhs, rhs| lhs.zip(rhs).map(|(l, r)| l + r),
        );
    }
}
