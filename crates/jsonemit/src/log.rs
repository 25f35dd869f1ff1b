//! Logging shim: forwards to `tracing` when the `tracing` feature is on and
//! compiles to nothing otherwise.

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
mod noop {
    // Distinct names so the imports below cannot collide with the built-in
    // `#[warn]` attribute.
    macro_rules! noop_trace {
        ($($arg:tt)*) => {};
    }

    macro_rules! noop_debug {
        ($($arg:tt)*) => {};
    }

    macro_rules! noop_warn {
        ($($arg:tt)*) => {};
    }

    pub(crate) use noop_debug as debug;
    pub(crate) use noop_trace as trace;
    pub(crate) use noop_warn as warn;
}

#[cfg(not(feature = "tracing"))]
pub(crate) use noop::{debug, trace, warn};

#[cfg(test)]
mod tests {
    use super::{debug, trace, warn};
    use crate::SizeHint;

    // Same call shapes as the cursor, so both backends are checked.
    #[test]
    fn macros_accept_structured_fields() {
        let hint = SizeHint::AtLeast(8);
        debug!(window_len = 4, "write session opened");
        trace!(pending = 0, ?hint, "advancing to a new window");
        warn!(requested = 8, limit = 4, "window growth exceeds limit");
        assert_eq!(hint.min_len(), 8);
    }
}
