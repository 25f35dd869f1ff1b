use core::error::Error;

/// Size requested from a [`BufferProvider`] for its next window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeHint {
    /// Whatever size the provider considers a good default.
    Default,
    /// At least this many bytes.
    AtLeast(usize),
}

impl SizeHint {
    /// The minimum length a window must have to satisfy this hint.
    #[must_use]
    pub fn min_len(self) -> usize {
        match self {
            SizeHint::Default => 0,
            SizeHint::AtLeast(n) => n,
        }
    }
}

/// A sink that hands out writable windows and accepts commits.
///
/// The provider is purely reactive: a [`WriteCursor`](crate::WriteCursor)
/// asks it for a window, fills a prefix of it, and reports how much of that
/// prefix is finished output. Exactly one window is live at a time; asking
/// for a new one implicitly retires the previous one.
///
/// # Contract
///
/// - [`request_window`](Self::request_window) returns the length of the new
///   window, which must be at least `hint.min_len()`. It may be larger.
/// - [`window_mut`](Self::window_mut) returns that window, with exactly the
///   length reported by the last `request_window`.
/// - [`commit`](Self::commit) is called at most once per window, with a count
///   no larger than its length. `commit(0)` means the window was not used.
pub trait BufferProvider {
    /// Failure to supply a window (typically an allocation failure).
    type Error: Error;

    /// Prepare a fresh window and return its length.
    ///
    /// # Errors
    ///
    /// Returns the provider's error if no window can be supplied.
    fn request_window(&mut self, hint: SizeHint) -> Result<usize, Self::Error>;

    /// The window most recently prepared by [`request_window`](Self::request_window).
    fn window_mut(&mut self) -> &mut [u8];

    /// Mark the first `count` bytes of the current window as finished output.
    fn commit(&mut self, count: usize);
}
