//! Operand identity and resolution signatures.
//!
//! Resolution is keyed by concrete type identity, never by value. A
//! [`TypeDesc`] pins that identity (`TypeId` plus a display name) and, for
//! `Option<T>` operands, carries the monomorphized hooks the lifting
//! adapter needs to test, unwrap, and rewrap values without knowing `T`.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A value type the resolution engine can identify at runtime.
///
/// The bound deliberately carries no operator capabilities. It pins a
/// stable, hashable descriptor for `Self` that the cache uses as part of
/// its key, nothing more; whether an operator exists for the type is
/// decided by probing the capability table at first use.
///
/// Implementations are provided for the primitive numeric types, `bool`,
/// `char`, `String`, the chrono time types, and `Option<T>` over any other
/// operand type. Application types opt in with a one-line impl:
///
/// ```
/// use generic_ops::{Operand, TypeDesc};
///
/// #[derive(Clone, Copy, PartialEq)]
/// struct Meters(f64);
///
/// impl Operand for Meters {
///     fn descriptor() -> TypeDesc {
///         TypeDesc::plain::<Meters>()
///     }
/// }
/// ```
pub trait Operand: Send + Sync + Sized + 'static {
    /// The runtime descriptor for `Self`.
    fn descriptor() -> TypeDesc;
}

/// Runtime descriptor for a concrete operand type.
///
/// Equality and hashing consider only the underlying `TypeId`; the
/// optional-wrapper vtable rides along for the lifting adapter and does not
/// participate in identity.
#[derive(Clone, Copy)]
pub struct TypeDesc {
    id: TypeId,
    name: &'static str,
    lift: Option<LiftVtable>,
}

impl TypeDesc {
    /// The descriptor for a non-optional operand type.
    pub fn plain<T: Send + Sync + 'static>() -> Self {
        TypeDesc {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            lift: None,
        }
    }

    fn optional<T: Operand>() -> Self {
        TypeDesc {
            id: TypeId::of::<Option<T>>(),
            name: type_name::<Option<T>>(),
            lift: Some(LiftVtable {
                inner: T::descriptor,
                is_absent: option_is_absent::<T>,
                unwrap: option_unwrap::<T>,
                rewrap: option_rewrap::<T>,
                absent: option_absent::<T>,
            }),
        }
    }

    /// The descriptor's display name (the full Rust type path).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// True when this type is an `Option<_>` wrapper.
    pub fn is_optional(&self) -> bool {
        self.lift.is_some()
    }

    pub(crate) fn lift(&self) -> Option<&LiftVtable> {
        self.lift.as_ref()
    }

    /// The inner type's descriptor, for optional wrappers.
    pub(crate) fn inner(&self) -> Option<TypeDesc> {
        self.lift.map(|vt| (vt.inner)())
    }
}

impl PartialEq for TypeDesc {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeDesc {}

impl Hash for TypeDesc {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDesc").field("name", &self.name).finish()
    }
}

/// Monomorphized hooks for one `Option<T>` instantiation.
///
/// Values cross these functions as `Box<dyn Any>`; each hook downcasts
/// against the type it was built for and treats a mismatch as a bug in the
/// engine, not a data condition.
#[derive(Clone, Copy)]
pub(crate) struct LiftVtable {
    /// Descriptor of the inner type `T`.
    pub inner: fn() -> TypeDesc,
    /// True when the operand holds no value.
    pub is_absent: fn(&dyn Any) -> bool,
    /// `Some(v) -> v`. Callers must check `is_absent` first.
    pub unwrap: fn(Box<dyn Any>) -> Box<dyn Any>,
    /// `v -> Some(v)`.
    pub rewrap: fn(Box<dyn Any>) -> Box<dyn Any>,
    /// Produces the absent value `None::<T>`.
    pub absent: fn() -> Box<dyn Any>,
}

fn option_is_absent<T: Operand>(value: &dyn Any) -> bool {
    match value.downcast_ref::<Option<T>>() {
        Some(v) => v.is_none(),
        None => panic!(
            "operand does not match its resolved signature: expected `{}`",
            type_name::<Option<T>>()
        ),
    }
}

fn option_unwrap<T: Operand>(value: Box<dyn Any>) -> Box<dyn Any> {
    match value.downcast::<Option<T>>() {
        Ok(v) => match *v {
            Some(inner) => Box::new(inner),
            None => panic!("unwrap of an absent `{}` operand", type_name::<Option<T>>()),
        },
        Err(_) => panic!(
            "operand does not match its resolved signature: expected `{}`",
            type_name::<Option<T>>()
        ),
    }
}

fn option_rewrap<T: Operand>(value: Box<dyn Any>) -> Box<dyn Any> {
    match value.downcast::<T>() {
        Ok(v) => Box::new(Some(*v)),
        Err(_) => panic!(
            "result does not match its resolved signature: expected `{}`",
            type_name::<T>()
        ),
    }
}

fn option_absent<T: Operand>() -> Box<dyn Any> {
    Box::new(None::<T>)
}

macro_rules! impl_operand {
    ($($ty:ty),* $(,)?) => {$(
        impl Operand for $ty {
            fn descriptor() -> TypeDesc {
                TypeDesc::plain::<$ty>()
            }
        }
    )*};
}

impl_operand!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String,
);

impl_operand!(
    chrono::NaiveDate,
    chrono::NaiveDateTime,
    chrono::DateTime<chrono::Utc>,
    chrono::Duration,
);

impl<T: Operand> Operand for Option<T> {
    fn descriptor() -> TypeDesc {
        let inner = T::descriptor();
        assert!(
            !inner.is_optional(),
            "nested optional operand `{}` cannot participate in operator resolution",
            type_name::<Option<T>>()
        );
        TypeDesc::optional::<T>()
    }
}

/// The ordered tuple of concrete types participating in one resolution.
///
/// Two signatures are equal iff all constituent type identities are equal;
/// this is the only equality the cache relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeSignature {
    /// One operand; the result has the same type. Also used by `ZeroValue`,
    /// which consumes no operand but produces this type.
    Unary(TypeDesc),
    /// Two operands and an explicit result type. Comparisons use the
    /// homogeneous form; their boolean result is implied by the kind.
    Binary {
        lhs: TypeDesc,
        rhs: TypeDesc,
        result: TypeDesc,
    },
    /// A source and target type for `Convert`.
    Conversion { from: TypeDesc, to: TypeDesc },
}

impl TypeSignature {
    /// Signature of a unary operator (or zero value) over `T`.
    pub fn unary<T: Operand>() -> Self {
        TypeSignature::Unary(T::descriptor())
    }

    /// Signature of a same-type binary operator over `T`.
    pub fn homogeneous<T: Operand>() -> Self {
        let desc = T::descriptor();
        TypeSignature::Binary {
            lhs: desc,
            rhs: desc,
            result: desc,
        }
    }

    /// Signature of a mixed-type binary operator; the result type is the
    /// left operand's type.
    pub fn mixed<L: Operand, R: Operand>() -> Self {
        TypeSignature::Binary {
            lhs: L::descriptor(),
            rhs: R::descriptor(),
            result: L::descriptor(),
        }
    }

    /// Signature of a conversion from `From` to `To`.
    pub fn conversion<From: Operand, To: Operand>() -> Self {
        TypeSignature::Conversion {
            from: From::descriptor(),
            to: To::descriptor(),
        }
    }
}

impl fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSignature::Unary(operand) => write!(f, "`{}`", operand.name()),
            TypeSignature::Binary { lhs, rhs, result } => {
                if lhs == rhs && rhs == result {
                    write!(f, "`{}`", lhs.name())
                } else {
                    write!(f, "`{}` x `{}` -> `{}`", lhs.name(), rhs.name(), result.name())
                }
            }
            TypeSignature::Conversion { from, to } => {
                write!(f, "`{}` -> `{}`", from.name(), to.name())
            }
        }
    }
}
