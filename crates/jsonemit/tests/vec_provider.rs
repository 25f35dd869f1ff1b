#![allow(missing_docs)]

use jsonemit::{
    BufferProvider, VecProvider, VecProviderError, WriteCursor, WriteError, WriterOptions,
    catalog::Common,
};

#[test]
fn output_limit_surfaces_as_provider_error() {
    let mut out = VecProvider::with_window_len(4).with_limit(6);
    let mut cursor = WriteCursor::new(&mut out).unwrap();

    let err = cursor.write_str("abcdefgh").unwrap_err();
    assert_eq!(
        err,
        WriteError::Provider(VecProviderError::LimitReached {
            requested: 4,
            limit: 6
        })
    );
    let summary = cursor.finish();

    assert_eq!(summary.committed, 6);
    assert_eq!(out.as_str(), Ok("abcdef"));
}

#[test]
fn error_messages_name_the_sizes() {
    let err: WriteError<VecProviderError> = WriteError::CapacityExceeded {
        requested: 64,
        limit: 32,
    };
    assert_eq!(err.to_string(), "a 64-byte window exceeds the 32-byte limit");

    let err = WriteError::Provider(VecProviderError::LimitReached {
        requested: 8,
        limit: 4,
    });
    assert_eq!(
        err.to_string(),
        "buffer provider error: a 8-byte window would exceed the 4-byte output limit"
    );
}

#[test]
fn sessions_append_and_clear_resets() {
    let mut out = VecProvider::with_window_len(3);

    let mut cursor = WriteCursor::new(&mut out).unwrap();
    cursor.write_constant(Common::OpenArray).unwrap();
    cursor.write_number(1_u8).unwrap();
    cursor.finish();

    let mut cursor = WriteCursor::new(&mut out).unwrap();
    cursor.write_constant(Common::Comma).unwrap();
    cursor.write_number(2_u8).unwrap();
    cursor.write_constant(Common::CloseArray).unwrap();
    cursor.finish();

    assert_eq!(out.as_str(), Ok("[1,2]"));
    assert_eq!(out.len(), 5);

    out.clear();
    assert!(out.is_empty());
    let cursor = WriteCursor::new(&mut out).unwrap();
    let summary = cursor.finish();
    assert_eq!(summary.committed, 0);
    assert_eq!(out.into_bytes(), b"");
}

#[test]
fn works_through_a_trait_object() {
    let mut out = VecProvider::new();
    {
        let provider: &mut dyn BufferProvider<Error = VecProviderError> = &mut out;
        let mut cursor = WriteCursor::new(provider).unwrap();
        cursor.write_str("dyn").unwrap();
        cursor.finish();
    }
    assert_eq!(out.as_str(), Ok("dyn"));
}

#[test]
fn small_default_windows_still_fit_long_numbers() {
    let mut out = VecProvider::with_window_len(1);
    let options = WriterOptions::default();
    let mut cursor = WriteCursor::with_options(&mut out, options).unwrap();
    cursor.write_number(f64::MIN_POSITIVE).unwrap();
    let summary = cursor.finish();

    assert!(summary.growths > 0);
    assert_eq!(out.as_str(), Ok(f64::MIN_POSITIVE.to_string().as_str()));
}
