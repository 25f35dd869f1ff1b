use thiserror::Error;

/// Failure of a single cursor write.
///
/// Running out of window space is not an error; the cursor grows and retries
/// on its own. These are the conditions it cannot recover from.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum WriteError<E> {
    /// The provider could not supply a window. Passed through unchanged.
    #[error("buffer provider error: {0}")]
    Provider(E),
    /// A single atomic write needs a window larger than
    /// [`WriterOptions::max_window_len`](crate::WriterOptions::max_window_len).
    #[error("a {requested}-byte window exceeds the {limit}-byte limit")]
    CapacityExceeded {
        /// Size of the window the cursor would have asked for.
        requested: usize,
        /// The configured ceiling.
        limit: usize,
    },
}
