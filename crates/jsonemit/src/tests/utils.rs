use alloc::{
    format,
    string::String,
    vec,
    vec::Vec,
};

use thiserror::Error;

use crate::{BufferProvider, SizeHint};

/// One interaction between the cursor and a [`ScriptedProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Call {
    Request(SizeHint, usize),
    Commit(usize),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("window request {0} refused")]
pub(crate) struct Refused(pub usize);

/// Provider whose window sizes follow a script, recording every call.
///
/// Fresh windows are filled with `0xFF` so that committing bytes the cursor
/// never wrote produces invalid UTF-8.
pub(crate) struct ScriptedProvider {
    sizes: Vec<usize>,
    honor_hints: bool,
    refuse_from: Option<usize>,
    requests: usize,
    window: Vec<u8>,
    pub(crate) output: Vec<u8>,
    pub(crate) calls: Vec<Call>,
}

impl ScriptedProvider {
    /// Every default window is `len` bytes.
    pub(crate) fn fixed(len: usize) -> Self {
        Self::cycling(vec![len])
    }

    /// Default windows take their sizes from `sizes`, wrapping around.
    pub(crate) fn cycling(sizes: Vec<usize>) -> Self {
        assert!(!sizes.is_empty());
        Self {
            sizes,
            honor_hints: true,
            refuse_from: None,
            requests: 0,
            window: Vec::new(),
            output: Vec::new(),
            calls: Vec::new(),
        }
    }

    /// Hand out the scripted size even when a larger one was requested.
    pub(crate) fn ignoring_hints(mut self) -> Self {
        self.honor_hints = false;
        self
    }

    /// Fail every request from the `n`th (zero-based) onwards.
    pub(crate) fn refusing_from(mut self, n: usize) -> Self {
        self.refuse_from = Some(n);
        self
    }

    pub(crate) fn output_str(&self) -> &str {
        core::str::from_utf8(&self.output).expect("committed output is UTF-8")
    }

    pub(crate) fn requests(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Request(..)))
            .count()
    }

    /// Compact rendering of the call log for snapshots.
    pub(crate) fn log(&self) -> String {
        self.calls
            .iter()
            .map(|call| match call {
                Call::Request(SizeHint::Default, len) => format!("get(default)={len}"),
                Call::Request(SizeHint::AtLeast(n), len) => format!("get({n})={len}"),
                Call::Commit(n) => format!("commit({n})"),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl BufferProvider for ScriptedProvider {
    type Error = Refused;

    fn request_window(&mut self, hint: SizeHint) -> Result<usize, Refused> {
        let index = self.requests;
        self.requests += 1;
        if self.refuse_from.is_some_and(|n| index >= n) {
            return Err(Refused(index));
        }

        let scripted = self.sizes[index % self.sizes.len()];
        let len = if self.honor_hints {
            scripted.max(hint.min_len())
        } else {
            scripted
        };
        self.window = vec![0xFF; len];
        self.calls.push(Call::Request(hint, len));
        Ok(len)
    }

    fn window_mut(&mut self) -> &mut [u8] {
        &mut self.window
    }

    fn commit(&mut self, count: usize) {
        assert!(count <= self.window.len(), "commit past the window");
        self.output.extend_from_slice(&self.window[..count]);
        self.window.clear();
        self.calls.push(Call::Commit(count));
    }
}

/// Quickcheck iteration count, scaled up on CI.
pub(crate) fn quickcheck_tests() -> u64 {
    #[cfg(not(any(miri, feature = "test-fast")))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(any(miri, feature = "test-fast"))]
    let tests = 10;
    tests
}
