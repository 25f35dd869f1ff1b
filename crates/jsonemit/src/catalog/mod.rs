//! Static tables of literal fragments a serializer writes over and over.
//!
//! A catalog stores all of its entries back to back in one shared string and
//! addresses each entry with a [`Span`] (offset and length, one byte each).
//! Fixed-width catalogs such as [`DayOfWeek`] omit the spans and compute the
//! offset from the entry index. Escape catalogs ([`EscapeCatalog`]) pair a
//! shared prefix with one payload character per entry.
//!
//! Every table is a `static` built by a `const fn` that checks the layout
//! limits, so an oversized catalog is a compile error rather than a corrupt
//! lookup:
//!
//! ```compile_fail
//! jsonemit::packed_catalog! {
//!     /// Too long to address with one-byte spans.
//!     pub enum Huge in HUGE {
//!         A = "0123456789012345678901234567890123456789012345678901234567890123456789\
//!              0123456789012345678901234567890123456789012345678901234567890123456789012345678901234567890123456789\
//!              0123456789012345678901234567890123456789012345678901234567890123456789\
//!              0123456789012345678901234567890123456789",
//!     }
//! }
//! ```

mod tables;

use core::{fmt, ops::Range};

pub use tables::{
    COMMON, Common, DATE_PARTS, DAYS_OF_WEEK, DateParts, DayOfWeek, ESCAPE_000, ESCAPE_001,
    ESCAPES, Escape000, Escape001, Escapes, FORMATTING, Formatting, MONTHS, Month,
    control_escape,
};

/// Longest shared text a catalog may have.
pub const MAX_TEXT_LEN: usize = 256;

/// Longest single entry a catalog may have.
pub const MAX_ENTRY_LEN: usize = 255;

/// Location of one entry inside its catalog's shared text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    offset: u8,
    len: u8,
}

impl Span {
    /// A span starting at byte `offset` covering `len` bytes.
    #[must_use]
    pub const fn new(offset: u8, len: u8) -> Self {
        Self { offset, len }
    }

    /// Decode the packed form: offset in the high byte, length in the low one.
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        let [offset, len] = bits.to_be_bytes();
        Self { offset, len }
    }

    /// Encode as `offset << 8 | len`.
    #[must_use]
    pub const fn to_bits(self) -> u16 {
        u16::from_be_bytes([self.offset, self.len])
    }

    /// Start of the entry.
    #[must_use]
    pub const fn offset(self) -> usize {
        self.offset as usize
    }

    /// Length of the entry in bytes.
    #[must_use]
    pub const fn len(self) -> usize {
        self.len as usize
    }

    /// Whether the entry is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }

    /// One past the last byte of the entry.
    #[must_use]
    pub const fn end(self) -> usize {
        self.offset() + self.len()
    }

    /// Byte range of the entry.
    #[must_use]
    pub const fn range(self) -> Range<usize> {
        self.offset()..self.end()
    }
}

/// Lay `entries` out back to back and return their spans.
///
/// The shared text is the concatenation of `entries` in order, which is
/// exactly what `concat!` produces for the same literals.
///
/// # Panics
///
/// Panics (at compile time when used in a constant) if an entry is longer
/// than [`MAX_ENTRY_LEN`] or the total exceeds [`MAX_TEXT_LEN`].
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn pack<const N: usize>(entries: [&str; N]) -> [Span; N] {
    let mut spans = [Span::new(0, 0); N];
    let mut offset = 0;
    let mut i = 0;
    while i < N {
        let len = entries[i].len();
        assert!(len <= MAX_ENTRY_LEN, "catalog entry longer than 255 bytes");
        assert!(offset <= u8::MAX as usize, "catalog entry starts past byte 255");
        spans[i] = Span::new(offset as u8, len as u8);
        offset += len;
        i += 1;
    }
    assert!(offset <= MAX_TEXT_LEN, "catalog text longer than 256 bytes");
    spans
}

const fn is_char_boundary(bytes: &[u8], index: usize) -> bool {
    // Continuation bytes are 0b10xx_xxxx.
    index == bytes.len() || (index < bytes.len() && bytes[index] & 0xC0 != 0x80)
}

#[derive(Debug, Clone, Copy)]
enum Layout {
    Packed(&'static [Span]),
    Fixed { width: usize, count: usize },
}

/// An immutable table of literal fragments sharing one backing string.
pub struct Catalog {
    name: &'static str,
    text: &'static str,
    layout: Layout,
}

impl Catalog {
    /// A catalog whose entries are located by explicit spans.
    ///
    /// # Panics
    ///
    /// Panics if `text` is longer than [`MAX_TEXT_LEN`] or a span does not
    /// lie on character boundaries inside `text`.
    #[must_use]
    pub const fn packed(name: &'static str, text: &'static str, spans: &'static [Span]) -> Self {
        assert!(text.len() <= MAX_TEXT_LEN, "catalog text longer than 256 bytes");
        let bytes = text.as_bytes();
        let mut i = 0;
        while i < spans.len() {
            let span = spans[i];
            assert!(span.end() <= text.len(), "catalog span runs past its text");
            assert!(
                is_char_boundary(bytes, span.offset()) && is_char_boundary(bytes, span.end()),
                "catalog span splits a character"
            );
            i += 1;
        }
        Self {
            name,
            text,
            layout: Layout::Packed(spans),
        }
    }

    /// A catalog of `count` ASCII entries, each exactly `width` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `text` is not ASCII, is longer than [`MAX_TEXT_LEN`], or is
    /// not exactly `count * width` bytes.
    #[must_use]
    pub const fn fixed(name: &'static str, text: &'static str, width: usize, count: usize) -> Self {
        assert!(text.len() <= MAX_TEXT_LEN, "catalog text longer than 256 bytes");
        assert!(width > 0 && width <= MAX_ENTRY_LEN, "fixed catalog width out of range");
        assert!(text.len() == width * count, "fixed catalog text does not match its entries");
        assert!(text.is_ascii(), "fixed catalog text must be ASCII");
        Self {
            name,
            text,
            layout: Layout::Fixed { width, count },
        }
    }

    /// Name the catalog was declared with.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The shared backing text.
    #[must_use]
    pub const fn text(&self) -> &'static str {
        self.text
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        match self.layout {
            Layout::Packed(spans) => spans.len(),
            Layout::Fixed { count, .. } => count,
        }
    }

    /// Whether the catalog has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Span of entry `index`, if it exists.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn span(&self, index: usize) -> Option<Span> {
        match self.layout {
            Layout::Packed(spans) => spans.get(index).copied(),
            // Bounds were checked at construction: offset + width <= 256.
            Layout::Fixed { width, count } => {
                (index < count).then(|| Span::new((index * width) as u8, width as u8))
            }
        }
    }

    /// Text of entry `index`, if it exists.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&'static str> {
        let text: &'static str = self.text;
        self.span(index).and_then(|span| text.get(span.range()))
    }

    /// Text of entry `index`.
    ///
    /// # Panics
    ///
    /// Panics if the catalog has no entry `index`.
    #[must_use]
    pub fn entry(&self, index: usize) -> &'static str {
        match self.get(index) {
            Some(text) => text,
            None => panic!(
                "catalog {} has {} entries; index {index} is out of range",
                self.name,
                self.len()
            ),
        }
    }

    /// All entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        (0..self.len()).map(|i| self.entry(i))
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("name", &self.name)
            .field("len", &self.len())
            .field("text", &self.text)
            .finish()
    }
}

/// A catalog of escapes sharing one prefix, each completed by one character.
pub struct EscapeCatalog {
    name: &'static str,
    prefix: &'static str,
    payload: &'static [u8],
}

impl EscapeCatalog {
    /// Entries are `prefix` followed by each character of `payload` in turn.
    ///
    /// # Panics
    ///
    /// Panics if `payload` is not ASCII or has more than [`MAX_TEXT_LEN`]
    /// characters, or `prefix` is longer than [`MAX_ENTRY_LEN`].
    #[must_use]
    pub const fn new(name: &'static str, prefix: &'static str, payload: &'static str) -> Self {
        assert!(prefix.len() <= MAX_ENTRY_LEN, "escape prefix longer than 255 bytes");
        assert!(payload.len() <= MAX_TEXT_LEN, "escape payload longer than 256 bytes");
        assert!(payload.is_ascii(), "escape payload must be ASCII");
        Self {
            name,
            prefix,
            payload: payload.as_bytes(),
        }
    }

    /// Name the catalog was declared with.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Text written before every payload character.
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.payload.len()
    }

    /// Whether the catalog has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Payload character of entry `index`, if it exists.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<char> {
        self.payload.get(index).map(|&b| char::from(b))
    }

    /// Payload character of entry `index`.
    ///
    /// # Panics
    ///
    /// Panics if the catalog has no entry `index`.
    #[must_use]
    pub fn entry(&self, index: usize) -> char {
        match self.get(index) {
            Some(c) => c,
            None => panic!(
                "escape catalog {} has {} entries; index {index} is out of range",
                self.name,
                self.len()
            ),
        }
    }
}

impl fmt::Debug for EscapeCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EscapeCatalog")
            .field("name", &self.name)
            .field("prefix", &self.prefix)
            .field("payload", &bstr::BStr::new(self.payload))
            .finish()
    }
}

/// A typed handle to one entry of a [`Catalog`].
pub trait CatalogEntry: Copy {
    /// The table this entry belongs to.
    fn catalog() -> &'static Catalog;

    /// Position of the entry in its table.
    fn index(self) -> usize;

    /// The entry's text.
    fn text(self) -> &'static str {
        Self::catalog().entry(self.index())
    }
}

/// A typed handle to one entry of an [`EscapeCatalog`].
pub trait EscapeEntry: Copy {
    /// The table this entry belongs to.
    fn catalog() -> &'static EscapeCatalog;

    /// Position of the entry in its table.
    fn index(self) -> usize;

    /// The character written after the shared prefix.
    fn payload(self) -> char {
        Self::catalog().entry(self.index())
    }
}

/// Declare a variable-length catalog: a `#[repr(u8)]` enum of entries, the
/// backing `static` [`Catalog`], and the [`CatalogEntry`] impl tying them
/// together.
///
/// ```rust
/// use jsonemit::catalog::CatalogEntry;
///
/// jsonemit::packed_catalog! {
///     /// Yes or no.
///     pub enum Answer in ANSWERS {
///         Yes = "yes",
///         No = "no",
///     }
/// }
///
/// assert_eq!(ANSWERS.text(), "yesno");
/// assert_eq!(Answer::No.text(), "no");
/// ```
#[macro_export]
macro_rules! packed_catalog {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident in $table:ident {
            $( $variant:ident = $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        $vis enum $name {
            $(
                #[doc = concat!("`", stringify!($text), "`")]
                $variant,
            )+
        }

        #[doc = concat!("Backing table for [`", stringify!($name), "`].")]
        $vis static $table: $crate::catalog::Catalog = {
            const SPANS: &[$crate::catalog::Span] = &$crate::catalog::pack([$($text),+]);
            $crate::catalog::Catalog::packed(stringify!($name), concat!($($text),+), SPANS)
        };

        impl $name {
            /// Every entry in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The entry at `index`, if there is one.
            #[must_use]
            pub fn from_index(index: usize) -> ::core::option::Option<Self> {
                Self::ALL.get(index).copied()
            }
        }

        impl $crate::catalog::CatalogEntry for $name {
            fn catalog() -> &'static $crate::catalog::Catalog {
                &$table
            }

            fn index(self) -> usize {
                self as usize
            }
        }
    };
}

/// Declare a fixed-width catalog: every entry is `width` ASCII bytes and the
/// backing text is their concatenation.
///
/// ```rust
/// use jsonemit::catalog::CatalogEntry;
///
/// jsonemit::fixed_catalog! {
///     /// Compass points.
///     pub enum Compass in COMPASS (width = 1, text = "NESW") {
///         North, East, South, West,
///     }
/// }
///
/// assert_eq!(Compass::South.text(), "S");
/// ```
#[macro_export]
macro_rules! fixed_catalog {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident in $table:ident (width = $width:literal, text = $text:literal) {
            $( $variant:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        $vis enum $name {
            $(
                #[doc = stringify!($variant)]
                $variant,
            )+
        }

        #[doc = concat!("Backing table for [`", stringify!($name), "`].")]
        $vis static $table: $crate::catalog::Catalog = $crate::catalog::Catalog::fixed(
            stringify!($name),
            $text,
            $width,
            [$(stringify!($variant)),+].len(),
        );

        impl $name {
            /// Every entry in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The entry at `index`, if there is one.
            #[must_use]
            pub fn from_index(index: usize) -> ::core::option::Option<Self> {
                Self::ALL.get(index).copied()
            }
        }

        impl $crate::catalog::CatalogEntry for $name {
            fn catalog() -> &'static $crate::catalog::Catalog {
                &$table
            }

            fn index(self) -> usize {
                self as usize
            }
        }
    };
}

/// Declare an escape catalog: a shared prefix and one payload character per
/// entry.
///
/// ```rust
/// use jsonemit::catalog::EscapeEntry;
///
/// jsonemit::escape_catalog! {
///     /// Percent-encoded digits.
///     pub enum Percent3 in PERCENT_3 (prefix = "%3") {
///         Zero = '0',
///         One = '1',
///     }
/// }
///
/// assert_eq!(PERCENT_3.prefix(), "%3");
/// assert_eq!(Percent3::One.payload(), '1');
/// ```
#[macro_export]
macro_rules! escape_catalog {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident in $table:ident (prefix = $prefix:literal) {
            $( $variant:ident = $payload:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        $vis enum $name {
            $(
                #[doc = concat!("`", $prefix, $payload, "`")]
                $variant,
            )+
        }

        #[doc = concat!("Backing table for [`", stringify!($name), "`].")]
        $vis static $table: $crate::catalog::EscapeCatalog =
            $crate::catalog::EscapeCatalog::new(stringify!($name), $prefix, concat!($($payload),+));

        impl $name {
            /// Every entry in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The entry at `index`, if there is one.
            #[must_use]
            pub fn from_index(index: usize) -> ::core::option::Option<Self> {
                Self::ALL.get(index).copied()
            }
        }

        impl $crate::catalog::EscapeEntry for $name {
            fn catalog() -> &'static $crate::catalog::EscapeCatalog {
                &$table
            }

            fn index(self) -> usize {
                self as usize
            }
        }
    };
}
