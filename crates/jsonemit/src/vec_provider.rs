//! A [`BufferProvider`] backed by a single growable `Vec<u8>`.
//!
//! Committed output occupies the front of the vector; the live window is the
//! zero-filled tail past it. Growth goes through `try_reserve`, so an
//! allocation failure surfaces as [`VecProviderError::Alloc`] instead of
//! aborting.

use alloc::{
    collections::TryReserveError,
    string::{FromUtf8Error, String},
    vec::Vec,
};
use core::{fmt, str::Utf8Error};

use bstr::BStr;
use thiserror::Error;

use crate::provider::{BufferProvider, SizeHint};

/// Failure to hand out a window from a [`VecProvider`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VecProviderError {
    /// The allocator refused to grow the buffer.
    #[error("failed to reserve a {requested}-byte window")]
    Alloc {
        /// Window size that was being reserved.
        requested: usize,
        /// Allocator error.
        #[source]
        source: TryReserveError,
    },
    /// The window would take the buffer past its configured limit.
    #[error("a {requested}-byte window would exceed the {limit}-byte output limit")]
    LimitReached {
        /// Window size that was asked for.
        requested: usize,
        /// Total output limit.
        limit: usize,
    },
}

/// In-memory provider collecting committed output in a `Vec<u8>`.
pub struct VecProvider {
    buf: Vec<u8>,
    committed: usize,
    default_window: usize,
    limit: Option<usize>,
}

impl Default for VecProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl VecProvider {
    /// Window length used for [`SizeHint::Default`] unless configured.
    pub const DEFAULT_WINDOW_LEN: usize = 256;

    /// An empty provider handing out [`Self::DEFAULT_WINDOW_LEN`]-byte windows.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_window_len(Self::DEFAULT_WINDOW_LEN)
    }

    /// An empty provider whose default windows are `len` bytes long.
    #[must_use]
    pub const fn with_window_len(len: usize) -> Self {
        Self {
            buf: Vec::new(),
            committed: 0,
            default_window: len,
            limit: None,
        }
    }

    /// Refuse windows that would let the buffer grow past `limit` bytes.
    ///
    /// A window that would cross the limit is clamped to fit when that still
    /// satisfies the request; otherwise the request fails with
    /// [`VecProviderError::LimitReached`].
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Committed output so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.committed]
    }

    /// Committed output as text.
    ///
    /// # Errors
    ///
    /// Fails if something other than a [`WriteCursor`](crate::WriteCursor)
    /// committed bytes that are not UTF-8, or a session is still open with a
    /// multi-byte character split at the commit point.
    pub fn as_str(&self) -> Result<&str, Utf8Error> {
        core::str::from_utf8(self.as_bytes())
    }

    /// Number of committed bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.committed
    }

    /// Whether nothing has been committed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.committed == 0
    }

    /// Drop all committed output, keeping the allocation.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.committed = 0;
    }

    /// Consume the provider and return the committed bytes.
    #[must_use]
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.buf.truncate(self.committed);
        self.buf
    }

    /// Consume the provider and return the committed output as a `String`.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`Self::as_str`].
    pub fn into_string(self) -> Result<String, FromUtf8Error> {
        String::from_utf8(self.into_bytes())
    }
}

impl BufferProvider for VecProvider {
    type Error = VecProviderError;

    fn request_window(&mut self, hint: SizeHint) -> Result<usize, Self::Error> {
        let requested = match hint {
            SizeHint::Default => self.default_window,
            SizeHint::AtLeast(n) => n.max(self.default_window),
        };
        let len = match self.limit {
            Some(limit) => {
                let room = limit.saturating_sub(self.committed);
                if room < hint.min_len() || room == 0 {
                    return Err(VecProviderError::LimitReached { requested, limit });
                }
                requested.min(room)
            }
            None => requested,
        };

        // Retire the previous window before laying out the next one.
        self.buf.truncate(self.committed);
        self.buf
            .try_reserve(len)
            .map_err(|source| VecProviderError::Alloc {
                requested: len,
                source,
            })?;
        self.buf.resize(self.committed + len, 0);
        Ok(len)
    }

    fn window_mut(&mut self) -> &mut [u8] {
        &mut self.buf[self.committed..]
    }

    fn commit(&mut self, count: usize) {
        let window = self.buf.len() - self.committed;
        assert!(
            count <= window,
            "commit of {count} bytes exceeds the {window}-byte window"
        );
        self.committed += count;
        self.buf.truncate(self.committed);
    }
}

impl fmt::Debug for VecProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VecProvider")
            .field("committed", &BStr::new(self.as_bytes()))
            .field("window", &(self.buf.len() - self.committed))
            .field("default_window", &self.default_window)
            .field("limit", &self.limit)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::{VecProvider, VecProviderError};
    use crate::provider::{BufferProvider, SizeHint};

    #[test]
    fn default_hint_uses_configured_window() {
        let mut p = VecProvider::with_window_len(8);
        assert_eq!(p.request_window(SizeHint::Default), Ok(8));
        assert_eq!(p.window_mut().len(), 8);
    }

    #[test]
    fn explicit_hint_never_shrinks_below_default() {
        let mut p = VecProvider::with_window_len(8);
        assert_eq!(p.request_window(SizeHint::AtLeast(3)), Ok(8));
        assert_eq!(p.request_window(SizeHint::AtLeast(20)), Ok(20));
    }

    #[test]
    fn commit_keeps_prefix_and_discards_rest() {
        let mut p = VecProvider::with_window_len(4);
        p.request_window(SizeHint::Default).unwrap();
        p.window_mut().copy_from_slice(b"abcd");
        p.commit(2);
        assert_eq!(p.as_bytes(), b"ab");

        p.request_window(SizeHint::Default).unwrap();
        p.window_mut()[0] = b'!';
        p.commit(0);
        assert_eq!(p.as_bytes(), b"ab");
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn limit_clamps_then_refuses() {
        let mut p = VecProvider::with_window_len(4).with_limit(6);
        assert_eq!(p.request_window(SizeHint::Default), Ok(4));
        p.window_mut().copy_from_slice(b"abcd");
        p.commit(4);
        assert_eq!(p.request_window(SizeHint::Default), Ok(2));
        assert_eq!(
            p.request_window(SizeHint::AtLeast(3)),
            Err(VecProviderError::LimitReached {
                requested: 4,
                limit: 6
            })
        );
    }

    #[test]
    #[should_panic(expected = "exceeds the 4-byte window")]
    fn over_commit_panics() {
        let mut p = VecProvider::with_window_len(4);
        p.request_window(SizeHint::Default).unwrap();
        p.commit(5);
    }

    #[test]
    fn debug_shows_committed_text() {
        let mut p = VecProvider::with_window_len(4);
        p.request_window(SizeHint::Default).unwrap();
        p.window_mut()[..2].copy_from_slice(b"hi");
        p.commit(2);
        let debug = format!("{p:?}");
        assert!(debug.contains("\"hi\""), "{debug}");
    }
}
