//! The built-in capability set.
//!
//! Installed once into the global table when it is first touched, in the
//! same spirit as a checker standard library: every built-in type declares
//! exactly the operators its native Rust counterpart defines, so probing a
//! type for an operator it lacks (negating an unsigned integer, bitwise-or
//! on floats, multiplying strings) misses here and resolves `Unsupported`.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::kind::OpKind;
use crate::table::CapabilityTable;

macro_rules! arithmetic {
    ($table:ident: $($ty:ty),* $(,)?) => {$(
        $table.insert_binary::<$ty, $ty, $ty>(OpKind::Add, |lhs, rhs| lhs + rhs);
        $table.insert_binary::<$ty, $ty, $ty>(OpKind::Subtract, |lhs, rhs| lhs - rhs);
        $table.insert_binary::<$ty, $ty, $ty>(OpKind::Multiply, |lhs, rhs| lhs * rhs);
        $table.insert_binary::<$ty, $ty, $ty>(OpKind::Divide, |lhs, rhs| lhs / rhs);
    )*};
}

macro_rules! comparisons {
    ($table:ident: $($ty:ty),* $(,)?) => {$(
        $table.insert_comparison::<$ty>(OpKind::Equal, |lhs, rhs| lhs == rhs);
        $table.insert_comparison::<$ty>(OpKind::NotEqual, |lhs, rhs| lhs != rhs);
        $table.insert_comparison::<$ty>(OpKind::GreaterThan, |lhs, rhs| lhs > rhs);
        $table.insert_comparison::<$ty>(OpKind::LessThan, |lhs, rhs| lhs < rhs);
        $table.insert_comparison::<$ty>(OpKind::GreaterThanOrEqual, |lhs, rhs| lhs >= rhs);
        $table.insert_comparison::<$ty>(OpKind::LessThanOrEqual, |lhs, rhs| lhs <= rhs);
    )*};
}

macro_rules! equality {
    ($table:ident: $($ty:ty),* $(,)?) => {$(
        $table.insert_comparison::<$ty>(OpKind::Equal, |lhs, rhs| lhs == rhs);
        $table.insert_comparison::<$ty>(OpKind::NotEqual, |lhs, rhs| lhs != rhs);
    )*};
}

macro_rules! bitwise {
    ($table:ident: $($ty:ty),* $(,)?) => {$(
        $table.insert_binary::<$ty, $ty, $ty>(OpKind::BitwiseOr, |lhs, rhs| lhs | rhs);
        $table.insert_binary::<$ty, $ty, $ty>(OpKind::BitwiseAnd, |lhs, rhs| lhs & rhs);
        $table.insert_binary::<$ty, $ty, $ty>(OpKind::BitwiseXor, |lhs, rhs| lhs ^ rhs);
        $table.insert_unary::<$ty>(OpKind::BitwiseNot, |value| !value);
    )*};
}

macro_rules! negate {
    ($table:ident: $($ty:ty),* $(,)?) => {$(
        $table.insert_unary::<$ty>(OpKind::Negate, |value| -value);
    )*};
}

macro_rules! zero {
    ($table:ident: $($ty:ty = $zero:expr),* $(,)?) => {$(
        $table.insert_zero::<$ty>(|| $zero);
    )*};
}

// All numeric pairs convert with `as`-cast semantics, identity included.
macro_rules! numeric_casts {
    ($table:ident: $($from:ty),* $(,)?) => {$(
        numeric_casts!(@to $table, $from:
            i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
    )*};
    (@to $table:ident, $from:ty: $($to:ty),*) => {$(
        $table.insert_conversion::<$from, $to>(|value| value as $to);
    )*};
}

pub(crate) fn install(table: &CapabilityTable) {
    arithmetic!(table: i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

    comparisons!(table: i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
    comparisons!(table: char, String);
    equality!(table: bool);

    bitwise!(table: i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool);

    negate!(table: i8, i16, i32, i64, i128, isize, f32, f64);

    zero!(table:
        i8 = 0, i16 = 0, i32 = 0, i64 = 0, i128 = 0, isize = 0,
        u8 = 0, u16 = 0, u32 = 0, u64 = 0, u128 = 0, usize = 0,
        f32 = 0.0, f64 = 0.0,
        bool = false, char = '\0',
        String = String::new(),
    );

    numeric_casts!(table: i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

    install_time(table);
}

// Time arithmetic: a duration shifts a timestamp, durations add among
// themselves. Instants do not add to instants.
fn install_time(table: &CapabilityTable) {
    table.insert_binary::<NaiveDateTime, Duration, NaiveDateTime>(OpKind::Add, |ts, delta| {
        ts + delta
    });
    table.insert_binary::<NaiveDateTime, Duration, NaiveDateTime>(OpKind::Subtract, |ts, delta| {
        ts - delta
    });
    table.insert_binary::<DateTime<Utc>, Duration, DateTime<Utc>>(OpKind::Add, |ts, delta| {
        ts + delta
    });
    table.insert_binary::<DateTime<Utc>, Duration, DateTime<Utc>>(OpKind::Subtract, |ts, delta| {
        ts - delta
    });
    table.insert_binary::<Duration, Duration, Duration>(OpKind::Add, |lhs, rhs| lhs + rhs);
    table.insert_binary::<Duration, Duration, Duration>(OpKind::Subtract, |lhs, rhs| lhs - rhs);
    table.insert_unary::<Duration>(OpKind::Negate, |delta| -delta);
    table.insert_zero::<Duration>(Duration::zero);

    comparisons!(table: NaiveDate, NaiveDateTime, DateTime<Utc>, Duration);
}
