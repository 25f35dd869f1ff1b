#![no_main]
use arbitrary::{Arbitrary, Unstructured};
use jsonemit::{
    BufferProvider, SizeHint, WriteCursor, WriteError, WriterOptions,
    catalog::{COMMON, Common, control_escape},
};
use libfuzzer_sys::fuzz_target;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const MAX_WINDOW: usize = 4096;

#[derive(Debug, thiserror::Error)]
#[error("window request refused")]
struct Refused;

/// Hands out windows of random length, honouring only the lower bound of a
/// hint, and occasionally refuses outright.
struct ChaoticProvider {
    rng: SmallRng,
    out: Vec<u8>,
    window: Vec<u8>,
    refuse_one_in: u32,
}

impl BufferProvider for ChaoticProvider {
    type Error = Refused;

    fn request_window(&mut self, hint: SizeHint) -> Result<usize, Refused> {
        if self.refuse_one_in != 0 && self.rng.random_ratio(1, self.refuse_one_in) {
            return Err(Refused);
        }
        let len = self.rng.random_range(hint.min_len()..=hint.min_len().max(16));
        self.window.clear();
        self.window.resize(len, 0xFF);
        Ok(len)
    }

    fn window_mut(&mut self) -> &mut [u8] {
        &mut self.window
    }

    fn commit(&mut self, count: usize) {
        assert!(count <= self.window.len(), "over-commit");
        self.out.extend_from_slice(&self.window[..count]);
        self.window.clear();
    }
}

#[derive(Debug)]
enum Op {
    Char(char),
    Str(String),
    Float(f64),
    Integer(i128),
    Constant(Common),
    ControlEscape(u8),
}

impl<'a> Arbitrary<'a> for Op {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(match u.choose_index(6)? {
            0 => Op::Char(u.arbitrary()?),
            1 => Op::Str(u.arbitrary()?),
            2 => Op::Float(u.arbitrary()?),
            3 => Op::Integer(u.arbitrary()?),
            4 => Op::Constant(*u.choose(Common::ALL)?),
            _ => Op::ControlEscape(u.int_in_range(0..=0x1F)?),
        })
    }
}

impl Op {
    fn expected(&self) -> String {
        match self {
            Op::Char(c) => c.to_string(),
            Op::Str(s) => s.clone(),
            Op::Float(v) => v.to_string(),
            Op::Integer(v) => v.to_string(),
            Op::Constant(c) => COMMON.entry(*c as usize).to_owned(),
            Op::ControlEscape(b) => format!("\\u{b:04x}"),
        }
    }

    fn apply<P: BufferProvider>(
        &self,
        cursor: &mut WriteCursor<'_, P>,
    ) -> Result<(), WriteError<P::Error>> {
        match self {
            Op::Char(c) => cursor.write_char(*c),
            Op::Str(s) => cursor.write_str(s),
            Op::Float(v) => cursor.write_number(*v),
            Op::Integer(v) => cursor.write_number(*v),
            Op::Constant(c) => cursor.write_constant(*c),
            Op::ControlEscape(b) => {
                let (catalog, index) = control_escape(*b).unwrap();
                cursor.write_escape_entry(catalog, index)
            }
        }
    }
}

fn writer(data: &[u8]) {
    let mut u = Unstructured::new(data);
    let Ok(seed) = u.arbitrary::<u64>() else {
        return;
    };
    let Ok(refuse_one_in) = u.int_in_range(0..=64u32) else {
        return;
    };
    let Ok(ops) = u.arbitrary::<Vec<Op>>() else {
        return;
    };

    let mut provider = ChaoticProvider {
        rng: SmallRng::seed_from_u64(seed),
        out: Vec::new(),
        window: Vec::new(),
        refuse_one_in,
    };
    let options = WriterOptions {
        max_window_len: MAX_WINDOW,
    };
    let Ok(mut cursor) = WriteCursor::with_options(&mut provider, options) else {
        return;
    };

    // Every completed write lands in the output; a failed write may leave a
    // prefix of itself behind, never anything else.
    let mut expected = String::new();
    let mut failed = None;
    for op in &ops {
        match op.apply(&mut cursor) {
            Ok(()) => expected.push_str(&op.expected()),
            Err(WriteError::Provider(Refused)) => {
                failed = Some(op.expected());
                break;
            }
            Err(err @ WriteError::CapacityExceeded { .. }) => panic!("{err}"),
        }
    }
    let summary = cursor.finish();

    assert_eq!(summary.committed, provider.out.len());
    let out = String::from_utf8_lossy(&provider.out);
    match failed {
        None => assert_eq!(out, expected),
        Some(partial) => {
            let rest = out
                .strip_prefix(expected.as_str())
                .expect("completed writes were lost");
            assert!(
                partial.as_bytes().starts_with(&provider.out[expected.len()..]),
                "failed write left {rest:?}, not a prefix of {partial:?}"
            );
        }
    }
}

fuzz_target!(|data: &[u8]| writer(data));
