use core::iter::Peekable;
use core::str::CharIndices;

use u8char::u8char;

/// A single input symbol as seen by the scanners.
///
/// Most codes are plain characters, but a host may also deliver a
/// carriage return and line feed pair as one code, pad tabs out to the
/// next tab stop with virtual spaces, and must finish every attempt with
/// [`Code::Eof`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code {
    Char(char),
    CarriageReturnLineFeed,
    VirtualSpace,
    Eof,
}

impl Code {
    /// Space, tab, or virtual space.
    #[inline(always)]
    pub const fn is_space(self) -> bool {
        matches!(self, Code::Char(' ' | '\t') | Code::VirtualSpace)
    }

    #[inline(always)]
    pub const fn is_line_ending(self) -> bool {
        matches!(
            self,
            Code::Char('\n' | '\r') | Code::CarriageReturnLineFeed
        )
    }

    #[inline(always)]
    pub const fn is_line_ending_or_space(self) -> bool {
        self.is_space() || self.is_line_ending()
    }

    #[inline(always)]
    pub const fn is_ascii_alpha(self) -> bool {
        matches!(self, Code::Char(c) if c.is_ascii_alphabetic())
    }

    #[inline(always)]
    pub const fn is_ascii_alphanumeric(self) -> bool {
        matches!(self, Code::Char(c) if c.is_ascii_alphanumeric())
    }

    #[inline(always)]
    pub const fn is_char(self, want: char) -> bool {
        matches!(self, Code::Char(c) if c == want)
    }

    /// The source text this code stands for.
    ///
    /// Virtual spaces and the end of input have no source text of their own.
    pub fn as_str(self, buf: &mut [u8; 4]) -> &str {
        match self {
            Code::Char(c) => c.encode_utf8(buf),
            Code::CarriageReturnLineFeed => "\r\n",
            Code::VirtualSpace | Code::Eof => "",
        }
    }

    /// Number of bytes this code occupies in its source text.
    #[inline(always)]
    pub const fn len_utf8(self) -> usize {
        match self {
            Code::Char(c) => c.len_utf8(),
            Code::CarriageReturnLineFeed => 2,
            Code::VirtualSpace | Code::Eof => 0,
        }
    }
}

impl From<char> for Code {
    #[inline(always)]
    fn from(c: char) -> Self {
        Code::Char(c)
    }
}

impl From<u8char> for Code {
    #[inline(always)]
    fn from(c: u8char) -> Self {
        Code::Char(c.to_char())
    }
}

/// Splits a string into codes, each paired with its byte offset.
///
/// A `"\r\n"` pair becomes a single [`Code::CarriageReturnLineFeed`].
/// The end of input is not included; callers that want to finish an
/// attempt feed [`Code::Eof`] themselves.
pub fn codes(input: &str) -> Codes<'_> {
    Codes {
        chars: input.char_indices().peekable(),
    }
}

/// Iterator returned by [`codes`].
#[derive(Debug, Clone)]
pub struct Codes<'a> {
    chars: Peekable<CharIndices<'a>>,
}

impl Iterator for Codes<'_> {
    type Item = (usize, Code);

    fn next(&mut self) -> Option<Self::Item> {
        let (offset, c) = self.chars.next()?;
        if c == '\r' && matches!(self.chars.peek(), Some((_, '\n'))) {
            self.chars.next();
            return Some((offset, Code::CarriageReturnLineFeed));
        }
        Some((offset, Code::Char(c)))
    }
}
