//! Runtime operator resolution for generic types.
//!
//! This crate lets calling code apply arithmetic, bitwise, comparison, and
//! conversion operators to values whose concrete type is known only as a
//! type parameter, with no compile-time operator bounds. Whether a type
//! supports an operator is decided at first use by probing a capability
//! table; the outcome (the callable, or a structured failure) is memoized
//! process-wide, so every later use of the same operator and types is a
//! map lookup and a dispatch.
//!
//! # Quick Start
//!
//! ```
//! use generic_ops::{add, convert, multiply, zero};
//!
//! // i32 supports `+`: resolved on first use, cached afterwards.
//! assert_eq!(add(270, 54), Ok(324));
//!
//! // String does not support `*`: the failure is remembered, not retried.
//! assert!(multiply("abc".to_string(), "def".to_string()).is_err());
//!
//! // Operators lift over Option: absence propagates.
//! assert_eq!(add(Some(3), Some(5)), Ok(Some(8)));
//! assert_eq!(add(None::<i32>, Some(5)), Ok(None));
//!
//! // Conversions resolve per (source, target) pair.
//! assert_eq!(convert::<i32, f64>(280), Ok(280.0));
//! assert_eq!(zero::<i32>(), Ok(0));
//! ```
//!
//! # Architecture
//!
//! - `kind`: the closed operator vocabulary
//! - `signature`: operand identity ([`Operand`], [`TypeDesc`]) and
//!   resolution keys ([`TypeSignature`])
//! - `table`: the capability table and the `register_*` extension points
//! - `builtins`: the standard capability set (primitives, `String`, chrono
//!   time types, numeric conversions)
//! - `probe`: capability probing, including the mixed-type coercion
//!   fallback
//! - `lift`: null-propagating lifting over `Option` operands
//! - `cache`: the process-wide memoization table with its
//!   compute-once-under-contention guarantee
//! - `ops`: the public facade and resolved-callable handles
//!
//! # Concurrency
//!
//! All entry points may be called freely from multiple threads. For any
//! (operator, signature) key the prober runs at most once per process;
//! concurrent first callers block until the winner publishes, and every
//! caller observes the same outcome. Resolved callables are pure functions
//! of their operands and may be invoked concurrently without
//! synchronization.

mod builtins;
mod cache;
mod error;
mod kind;
mod lift;
mod ops;
mod probe;
mod signature;
mod table;

pub use cache::resolution_attempts;
pub use error::OpError;
pub use kind::OpKind;
pub use ops::{
    add, add_alternative, binary_fn, bitwise_and, bitwise_not, bitwise_or, bitwise_xor, convert,
    convert_fn, divide, divide_alternative, divide_int, equal, greater_than,
    greater_than_or_equal, less_than, less_than_or_equal, multiply, multiply_alternative, negate,
    not_equal, predicate_fn, subtract, subtract_alternative, unary_fn, zero, BinaryFn, ConvertFn,
    PredicateFn, UnaryFn,
};
pub use signature::{Operand, TypeDesc, TypeSignature};
pub use table::{
    register_binary, register_comparison, register_conversion, register_unary, register_zero,
};
