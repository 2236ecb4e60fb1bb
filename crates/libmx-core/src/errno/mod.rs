//! Error number definitions.
//!
//! Thread-local errno storage for the C-facing side channel of the math
//! entry points. Only the codes a `<math.h>` function can raise are defined.

use std::cell::Cell;

thread_local! {
    static ERRNO: Cell<i32> = const { Cell::new(0) };
}

/// Argument outside the domain of the function (pole of Γ).
pub const EDOM: i32 = 33;
/// Result not representable (overflow).
pub const ERANGE: i32 = 34;

/// Returns the current thread-local errno value.
///
/// Equivalent to reading C `errno`.
pub fn get_errno() -> i32 {
    ERRNO.get()
}

/// Sets the current thread-local errno value.
///
/// Equivalent to assigning to C `errno`.
pub fn set_errno(value: i32) {
    ERRNO.set(value);
}

/// Address of the calling thread's errno slot.
///
/// Stable for the lifetime of the thread; backs `__errno_location`.
pub fn errno_location() -> *mut i32 {
    ERRNO.with(Cell::as_ptr)
}
