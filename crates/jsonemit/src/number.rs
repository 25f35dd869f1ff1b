//! All-or-nothing formatting into a fixed slice.

use core::fmt;

/// `fmt::Write` over a borrowed slice that refuses, rather than truncates,
/// output that does not fit.
///
/// A failed format leaves garbage past [`written`](Self::written) but the
/// caller never commits it, so nothing partial becomes visible.
pub(crate) struct WindowWriter<'w> {
    buf: &'w mut [u8],
    written: usize,
}

impl<'w> WindowWriter<'w> {
    pub(crate) fn new(buf: &'w mut [u8]) -> Self {
        Self { buf, written: 0 }
    }

    pub(crate) fn written(&self) -> usize {
        self.written
    }
}

impl fmt::Write for WindowWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let rest = &mut self.buf[self.written..];
        if rest.len() < bytes.len() {
            return Err(fmt::Error);
        }
        rest[..bytes.len()].copy_from_slice(bytes);
        self.written += bytes.len();
        Ok(())
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Numbers the cursor writes with locale-independent formatting.
///
/// Floats use Rust's shortest round-trip representation (`0.1`, `-0`,
/// `1e21` spelled out in full), integers their decimal digits, and
/// `rust_decimal::Decimal` (feature `decimal`) its own scale-preserving form
/// (`1.50`).
/// Non-finite floats render as `NaN`, `inf` and `-inf`.
pub trait FormatNumber: fmt::Display + Copy + sealed::Sealed {}

macro_rules! format_number {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}
            impl FormatNumber for $ty {}
        )+
    };
}

format_number!(
    f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize
);

#[cfg(feature = "decimal")]
format_number!(rust_decimal::Decimal);

#[cfg(test)]
mod tests {
    use core::fmt::Write;

    use super::WindowWriter;

    #[test]
    fn exact_fit_succeeds() {
        let mut buf = [0u8; 4];
        let mut w = WindowWriter::new(&mut buf);
        assert!(write!(w, "{}", 1.25_f64).is_ok());
        assert_eq!(w.written(), 4);
        assert_eq!(&buf, b"1.25");
    }

    #[test]
    fn overflow_reports_error() {
        let mut buf = [0u8; 3];
        let mut w = WindowWriter::new(&mut buf);
        assert!(write!(w, "{}", 1.25_f64).is_err());
    }

    #[test]
    fn empty_window_accepts_empty_output() {
        let mut buf = [0u8; 0];
        let mut w = WindowWriter::new(&mut buf);
        assert!(write!(w, "").is_ok());
        assert_eq!(w.written(), 0);
    }
}
