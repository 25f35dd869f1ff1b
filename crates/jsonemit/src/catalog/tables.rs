//! The built-in catalogs.

use super::EscapeCatalog;
use crate::{escape_catalog, fixed_catalog, packed_catalog};

packed_catalog! {
    /// Structural JSON punctuation, keywords and the joins between them.
    pub enum Common in COMMON {
        Quote = "\"",
        Comma = ",",
        Colon = ":",
        OpenObject = "{",
        CloseObject = "}",
        OpenArray = "[",
        CloseArray = "]",
        Null = "null",
        True = "true",
        False = "false",
        QuoteColon = "\":",
        QuoteComma = "\",",
        CommaQuote = ",\"",
        OpenObjectQuote = "{\"",
        QuoteColonQuote = "\":\"",
        QuoteCloseObject = "\"}",
        EmptyObject = "{}",
        EmptyArray = "[]",
        EmptyString = "\"\"",
    }
}

packed_catalog! {
    /// Whitespace used when pretty-printing.
    pub enum Formatting in FORMATTING {
        NewLine = "\n",
        Space = " ",
        ColonSpace = ": ",
        CommaNewLine = ",\n",
        OpenObjectNewLine = "{\n",
        OpenArrayNewLine = "[\n",
        Indent = "  ",
    }
}

packed_catalog! {
    /// Two-character JSON escapes, plus the JavaScript line terminators.
    pub enum Escapes in ESCAPES {
        Quote = "\\\"",
        Backslash = "\\\\",
        Slash = "\\/",
        Backspace = "\\b",
        FormFeed = "\\f",
        NewLine = "\\n",
        CarriageReturn = "\\r",
        Tab = "\\t",
        LineSeparator = "\\u2028",
        ParagraphSeparator = "\\u2029",
    }
}

packed_catalog! {
    /// Pieces of the date formats: Microsoft `"\/Date(...)\/"`, ISO 8601 and
    /// RFC 1123.
    pub enum DateParts in DATE_PARTS {
        MsDateStart = "\"\\/Date(",
        MsDateEnd = ")\\/\"",
        TimeDesignator = "T",
        Zulu = "Z",
        Gmt = " GMT",
        CommaSpace = ", ",
        Hyphen = "-",
        Colon = ":",
        Dot = ".",
        Plus = "+",
    }
}

fixed_catalog! {
    /// Three-letter English day names, Sunday first.
    pub enum DayOfWeek in DAYS_OF_WEEK (width = 3, text = "SunMonTueWedThuFriSat") {
        Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday,
    }
}

fixed_catalog! {
    /// Three-letter English month names.
    pub enum Month in MONTHS (width = 3, text = "JanFebMarAprMayJunJulAugSepOctNovDec") {
        January, February, March, April, May, June,
        July, August, September, October, November, December,
    }
}

escape_catalog! {
    /// `\u0000` to `\u000f`, named after the control character they encode.
    pub enum Escape000 in ESCAPE_000 (prefix = "\\u000") {
        Nul = '0', Soh = '1', Stx = '2', Etx = '3',
        Eot = '4', Enq = '5', Ack = '6', Bel = '7',
        Bs = '8', Ht = '9', Lf = 'a', Vt = 'b',
        Ff = 'c', Cr = 'd', So = 'e', Si = 'f',
    }
}

escape_catalog! {
    /// `\u0010` to `\u001f`, named after the control character they encode.
    pub enum Escape001 in ESCAPE_001 (prefix = "\\u001") {
        Dle = '0', Dc1 = '1', Dc2 = '2', Dc3 = '3',
        Dc4 = '4', Nak = '5', Syn = '6', Etb = '7',
        Can = '8', Em = '9', Sub = 'a', Esc = 'b',
        Fs = 'c', Gs = 'd', Rs = 'e', Us = 'f',
    }
}

/// The escape catalog and entry spelling control byte `byte` as `\u00XX`.
///
/// Returns `None` for bytes that are not C0 control characters.
#[must_use]
pub fn control_escape(byte: u8) -> Option<(&'static EscapeCatalog, usize)> {
    match byte {
        0x00..=0x0F => Some((&ESCAPE_000, usize::from(byte))),
        0x10..=0x1F => Some((&ESCAPE_001, usize::from(byte - 0x10))),
        _ => None,
    }
}
