//! The growable write cursor.
//!
//! Overview
//! - A session borrows a [`BufferProvider`] exclusively, starting with one
//!   default-sized window. Writes land at `offset` inside that window.
//! - Text (strings, characters, catalog entries) is copied in the largest
//!   chunks that fit. When the window fills and input remains, the cursor
//!   commits the filled window and continues in a fresh one, so one write may
//!   span any number of windows.
//! - Numbers and other formatted values are atomic: they are formatted into
//!   the space left in the window, and if they do not fit the attempt is
//!   thrown away, the cursor grows, and the value is formatted again from
//!   scratch. Nothing partial is ever committed.
//!
//! Growth (`advance_and_acquire`)
//! - Bytes pending in the window: commit them and ask for a default-sized
//!   window.
//! - Nothing pending: the window was too small for even one atomic write.
//!   Discard it with `commit(0)` and ask for twice the size, up to
//!   [`WriterOptions::max_window_len`].

use core::fmt;

use crate::{
    catalog::{Catalog, CatalogEntry, EscapeCatalog, EscapeEntry},
    error::WriteError,
    log::{debug, trace, warn},
    number::{FormatNumber, WindowWriter},
    options::WriterOptions,
    provider::{BufferProvider, SizeHint},
};

/// Totals reported when a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    /// Bytes committed to the provider over the whole session.
    pub committed: usize,
    /// Number of times the cursor retired a window and asked for another.
    pub growths: usize,
}

/// A write session over a [`BufferProvider`].
///
/// The cursor holds the provider's mutable borrow for the whole session, so
/// nothing else can touch the provider until the cursor is finished or
/// dropped. Finishing consumes the cursor; writing to, or finishing, a
/// session that has already ended does not compile.
///
/// Dropping an unfinished cursor commits whatever is pending, as
/// [`finish`](Self::finish) would.
pub struct WriteCursor<'p, P: BufferProvider + ?Sized> {
    provider: &'p mut P,
    options: WriterOptions,
    /// Length of the live window.
    window_len: usize,
    /// Bytes written into the live window and not yet committed.
    offset: usize,
    /// Last size requested on the doubling path; zero after progress.
    doubled: usize,
    /// Whether the provider currently has a window we have not committed.
    live: bool,
    closed: bool,
    committed: usize,
    growths: usize,
}

impl<'p, P: BufferProvider + ?Sized> WriteCursor<'p, P> {
    /// Start a session with default options.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Provider`] if the provider cannot supply the
    /// initial window.
    pub fn new(provider: &'p mut P) -> Result<Self, WriteError<P::Error>> {
        Self::with_options(provider, WriterOptions::default())
    }

    /// Start a session, requesting an initial window of the provider's
    /// default size.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Provider`] if the provider cannot supply the
    /// initial window.
    pub fn with_options(
        provider: &'p mut P,
        options: WriterOptions,
    ) -> Result<Self, WriteError<P::Error>> {
        let window_len = provider
            .request_window(SizeHint::Default)
            .map_err(WriteError::Provider)?;
        debug!(window_len, "write session opened");
        Ok(Self {
            provider,
            options,
            window_len,
            offset: 0,
            doubled: 0,
            live: true,
            closed: false,
            committed: 0,
            growths: 0,
        })
    }

    /// Bytes written to the current window but not yet committed.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.offset
    }

    /// Length of the current window.
    #[must_use]
    pub fn window_len(&self) -> usize {
        self.window_len
    }

    /// Space left in the current window.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.window_len - self.offset
    }

    /// How many times the cursor has moved to a new window so far.
    #[must_use]
    pub fn growths(&self) -> usize {
        self.growths
    }

    /// The options this session runs with.
    #[must_use]
    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// Write one character.
    ///
    /// # Errors
    ///
    /// Fails only if the cursor needs a new window and cannot get one.
    pub fn write_char(&mut self, c: char) -> Result<(), WriteError<P::Error>> {
        match u8::try_from(c) {
            Ok(byte) if byte.is_ascii() => {
                while self.offset == self.window_len {
                    self.advance_and_acquire()?;
                }
                let offset = self.offset;
                self.provider.window_mut()[offset] = byte;
                self.offset += 1;
                Ok(())
            }
            _ => self.write_bytes(c.encode_utf8(&mut [0; 4]).as_bytes()),
        }
    }

    /// Write a run of characters.
    ///
    /// Characters are encoded in batches and copied like
    /// [`write_str`](Self::write_str), so the run fills each window before
    /// moving on.
    ///
    /// # Errors
    ///
    /// Fails only if the cursor needs a new window and cannot get one.
    pub fn write_chars(&mut self, chars: &[char]) -> Result<(), WriteError<P::Error>> {
        let mut buf = [0u8; 64];
        let mut len = 0;
        for &c in chars {
            if buf.len() - len < c.len_utf8() {
                self.write_bytes(&buf[..len])?;
                len = 0;
            }
            len += c.encode_utf8(&mut buf[len..]).len();
        }
        self.write_bytes(&buf[..len])
    }

    /// Write a string, spanning as many windows as it takes.
    ///
    /// # Errors
    ///
    /// Fails only if the cursor needs a new window and cannot get one. The
    /// windows filled before the failure stay committed.
    pub fn write_str(&mut self, s: &str) -> Result<(), WriteError<P::Error>> {
        self.write_bytes(s.as_bytes())
    }

    /// Write a number in its locale-independent form.
    ///
    /// The value is formatted directly into the window. If it does not fit
    /// it is formatted again in a new window; the output never straddles two
    /// windows.
    ///
    /// ```rust
    /// use jsonemit::{VecProvider, WriteCursor};
    ///
    /// let mut out = VecProvider::with_window_len(2);
    /// let mut cursor = WriteCursor::new(&mut out)?;
    /// cursor.write_number(0.1_f32)?;
    /// cursor.write_char(',')?;
    /// cursor.write_number(-12_345_i64)?;
    /// cursor.finish();
    /// assert_eq!(out.as_str(), Ok("0.1,-12345"));
    /// # Ok::<(), jsonemit::WriteError<jsonemit::VecProviderError>>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::CapacityExceeded`] if the formatted value needs
    /// a window larger than [`WriterOptions::max_window_len`], or
    /// [`WriteError::Provider`] if a window cannot be supplied.
    pub fn write_number<N: FormatNumber>(&mut self, value: N) -> Result<(), WriteError<P::Error>> {
        self.write_fmt(format_args!("{value}"))
    }

    /// Write formatted output atomically, with the same retry discipline as
    /// [`write_number`](Self::write_number). This is what `write!` calls.
    ///
    /// ```rust
    /// use jsonemit::{VecProvider, WriteCursor};
    ///
    /// let mut out = VecProvider::with_window_len(3);
    /// let mut cursor = WriteCursor::new(&mut out)?;
    /// write!(cursor, "{}-{:02}", 2024, 7)?;
    /// cursor.finish();
    /// assert_eq!(out.as_str(), Ok("2024-07"));
    /// # Ok::<(), jsonemit::WriteError<jsonemit::VecProviderError>>(())
    /// ```
    ///
    /// # Errors
    ///
    /// As for [`write_number`](Self::write_number).
    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), WriteError<P::Error>> {
        loop {
            let (offset, end) = (self.offset, self.window_len);
            let written = {
                let mut writer = WindowWriter::new(&mut self.provider.window_mut()[offset..end]);
                fmt::write(&mut writer, args).ok().map(|()| writer.written())
            };
            if let Some(written) = written {
                self.offset += written;
                return Ok(());
            }
            self.advance_and_acquire()?;
        }
    }

    /// Write a typed catalog entry.
    ///
    /// # Errors
    ///
    /// As for [`write_str`](Self::write_str).
    pub fn write_constant<E: CatalogEntry>(
        &mut self,
        entry: E,
    ) -> Result<(), WriteError<P::Error>> {
        self.write_str(entry.text())
    }

    /// Write entry `index` of `catalog`.
    ///
    /// # Errors
    ///
    /// As for [`write_str`](Self::write_str).
    ///
    /// # Panics
    ///
    /// Panics if `catalog` has no entry `index`; nothing is written.
    pub fn write_catalog_entry(
        &mut self,
        catalog: &Catalog,
        index: usize,
    ) -> Result<(), WriteError<P::Error>> {
        self.write_str(catalog.entry(index))
    }

    /// Write a typed escape: the catalog's prefix, then the entry's payload.
    ///
    /// # Errors
    ///
    /// As for [`write_str`](Self::write_str).
    pub fn write_escape<E: EscapeEntry>(&mut self, entry: E) -> Result<(), WriteError<P::Error>> {
        self.write_escape_entry(E::catalog(), entry.index())
    }

    /// Write entry `index` of an escape catalog.
    ///
    /// The prefix and the payload are two separate writes; each one grows
    /// on its own if needed.
    ///
    /// # Errors
    ///
    /// As for [`write_str`](Self::write_str).
    ///
    /// # Panics
    ///
    /// Panics if `catalog` has no entry `index`; nothing is written.
    pub fn write_escape_entry(
        &mut self,
        catalog: &EscapeCatalog,
        index: usize,
    ) -> Result<(), WriteError<P::Error>> {
        let payload = catalog.entry(index);
        self.write_str(catalog.prefix())?;
        self.write_char(payload)
    }

    /// Commit what is pending and end the session.
    ///
    /// The cursor is consumed, so a finished session cannot be written to:
    ///
    /// ```compile_fail
    /// use jsonemit::{VecProvider, WriteCursor};
    ///
    /// let mut out = VecProvider::new();
    /// let mut cursor = WriteCursor::new(&mut out).unwrap();
    /// cursor.finish();
    /// cursor.write_char('x').unwrap();
    /// ```
    ///
    /// nor finished twice:
    ///
    /// ```compile_fail
    /// use jsonemit::{VecProvider, WriteCursor};
    ///
    /// let mut out = VecProvider::new();
    /// let cursor = WriteCursor::new(&mut out).unwrap();
    /// cursor.finish();
    /// cursor.finish();
    /// ```
    pub fn finish(mut self) -> SessionSummary {
        self.close()
    }

    fn close(&mut self) -> SessionSummary {
        let pending = self.offset;
        self.retire(pending);
        self.closed = true;
        let summary = SessionSummary {
            committed: self.committed,
            growths: self.growths,
        };
        debug!(
            committed = summary.committed,
            growths = summary.growths,
            "write session finished"
        );
        summary
    }

    fn write_bytes(&mut self, mut src: &[u8]) -> Result<(), WriteError<P::Error>> {
        while !src.is_empty() {
            let available = self.window_len - self.offset;
            if available == 0 {
                self.advance_and_acquire()?;
                continue;
            }

            let (chunk, rest) = src.split_at(available.min(src.len()));
            let offset = self.offset;
            self.provider.window_mut()[offset..offset + chunk.len()].copy_from_slice(chunk);
            self.offset += chunk.len();
            src = rest;
        }
        Ok(())
    }

    fn advance_and_acquire(&mut self) -> Result<(), WriteError<P::Error>> {
        let pending = self.offset;
        let hint = if pending == 0 {
            // The window could not hold a single atomic write.
            let requested = self.window_len.max(self.doubled).max(1).saturating_mul(2);
            let limit = self.options.max_window_len;
            if requested > limit {
                self.doubled = 0;
                warn!(requested, limit, "window growth exceeds limit");
                return Err(WriteError::CapacityExceeded { requested, limit });
            }
            self.doubled = requested;
            SizeHint::AtLeast(requested)
        } else {
            self.doubled = 0;
            SizeHint::Default
        };

        trace!(pending, ?hint, "advancing to a new window");
        self.retire(pending);
        self.growths += 1;
        self.acquire(hint)
    }

    /// Commit `count` bytes of the live window and forget it.
    fn retire(&mut self, count: usize) {
        if self.live {
            self.provider.commit(count);
            self.committed += count;
            self.live = false;
        }
        self.offset = 0;
        self.window_len = 0;
    }

    fn acquire(&mut self, hint: SizeHint) -> Result<(), WriteError<P::Error>> {
        self.window_len = self
            .provider
            .request_window(hint)
            .map_err(WriteError::Provider)?;
        self.live = true;
        Ok(())
    }
}

impl<P: BufferProvider + ?Sized> Drop for WriteCursor<'_, P> {
    fn drop(&mut self) {
        if !self.closed {
            self.close();
        }
    }
}

impl<P: BufferProvider + ?Sized> fmt::Debug for WriteCursor<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteCursor")
            .field("window_len", &self.window_len)
            .field("offset", &self.offset)
            .field("committed", &self.committed)
            .field("growths", &self.growths)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
