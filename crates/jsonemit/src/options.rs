/// Configuration for a [`WriteCursor`](crate::WriteCursor) session.
///
/// # Examples
///
/// ```rust
/// use jsonemit::{VecProvider, WriteCursor, WriterOptions};
///
/// let mut out = VecProvider::new();
/// let options = WriterOptions { max_window_len: 4096 };
/// let cursor = WriteCursor::with_options(&mut out, options)?;
/// cursor.finish();
/// # Ok::<(), jsonemit::WriteError<jsonemit::VecProviderError>>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct WriterOptions {
    /// Largest window the cursor will ask for when a single atomic write
    /// (such as one formatted number) does not fit the windows the provider
    /// hands out.
    ///
    /// The cursor doubles its request each time the provider returns a window
    /// too small to make progress in. Once the next request would exceed
    /// this value the write fails with
    /// [`WriteError::CapacityExceeded`](crate::WriteError::CapacityExceeded)
    /// instead of asking again.
    ///
    /// # Default
    ///
    /// `1 MiB`
    pub max_window_len: usize,
}

impl WriterOptions {
    /// Default ceiling for [`WriterOptions::max_window_len`].
    pub const DEFAULT_MAX_WINDOW_LEN: usize = 1 << 20;
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            max_window_len: Self::DEFAULT_MAX_WINDOW_LEN,
        }
    }
}
