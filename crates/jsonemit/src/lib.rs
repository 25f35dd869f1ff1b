//! Windowed output buffer for streaming JSON serializers.
//!
//! A [`WriteCursor`] borrows a [`BufferProvider`] for one session and writes
//! characters, strings, numbers and catalogued literals straight into the
//! provider's current window. When the window runs out the cursor commits what
//! it wrote and asks for another one; numbers are formatted atomically and
//! retried in a larger window instead of being split.
//!
//! ```rust
//! use jsonemit::{VecProvider, WriteCursor, catalog::Common};
//!
//! let mut out = VecProvider::with_window_len(4);
//! let mut cursor = WriteCursor::new(&mut out)?;
//! cursor.write_constant(Common::OpenObjectQuote)?;
//! cursor.write_str("pi")?;
//! cursor.write_constant(Common::QuoteColon)?;
//! cursor.write_number(3.25_f64)?;
//! cursor.write_constant(Common::CloseObject)?;
//! cursor.finish();
//!
//! assert_eq!(out.as_str(), Ok(r#"{"pi":3.25}"#));
//! # Ok::<(), jsonemit::WriteError<jsonemit::VecProviderError>>(())
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod log;

pub mod catalog;
mod cursor;
mod error;
mod number;
mod options;
mod provider;
mod vec_provider;

#[cfg(test)]
mod tests;

pub use cursor::{SessionSummary, WriteCursor};
pub use error::WriteError;
pub use number::FormatNumber;
pub use options::WriterOptions;
pub use provider::{BufferProvider, SizeHint};
pub use vec_provider::{VecProvider, VecProviderError};
