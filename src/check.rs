//! Fatal table checks.
//!
//! A failed check means the caller broke a precondition or the table is
//! corrupted; there is nothing to recover. Checks panic with a message by
//! default. Building with the `strip-asserts` feature turns them into
//! no-ops, leaving the fast path free of branches for trusted input.

/// Panics with the given message unless `cond` holds.
macro_rules! table_assert {
    ($cond:expr, $($arg:tt)+) => {
        if !cfg!(feature = "strip-asserts") && !$cond {
            panic!($($arg)+);
        }
    };
}

/// Unconditional fatal failure.
macro_rules! table_fatal {
    ($($arg:tt)+) => {
        if !cfg!(feature = "strip-asserts") {
            panic!($($arg)+);
        }
    };
}

pub(crate) use table_assert;
pub(crate) use table_fatal;
