use core::iter::once;

use smallvec::SmallVec;
use u8char::u8char;

use crate::{codes, Code, Effects};

/// Whether line breaks may appear inside a construct.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EolPolicy {
    /// Line endings count as whitespace.
    #[default]
    Allow,
    /// Any line ending inside the construct makes it fail to match.
    Disallow,
}

impl EolPolicy {
    #[inline(always)]
    pub const fn allows_eol(self) -> bool {
        matches!(self, EolPolicy::Allow)
    }
}

/// Where a scanner is after the most recent code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The code was consumed and the scanner wants the next one.
    Pending,
    /// The construct is complete. The code that completed it was consumed,
    /// so the host resumes with the code after the closing delimiter.
    Matched,
    /// The construct doesn't match. The code was not consumed.
    Rejected,
}

/// Failure to match a construct, as reported by [`Scanner::scan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no match at byte offset {offset} ({code:?})")]
pub struct Rejected {
    /// Byte offset of the code at which the mismatch was detected.
    pub offset: usize,
    pub code: Code,
}

/// A character-driven recognizer for a single construct.
///
/// A scanner is created for one attempt at one input position. The host
/// feeds codes one at a time until the result is no longer
/// [`Status::Pending`]; feeding a scanner after that has no effect.
pub trait Scanner<T> {
    /// Processes one code, reporting token boundaries to `effects`.
    fn feed<E: Effects<T>>(&mut self, code: Code, effects: &mut E) -> Status;

    /// The status returned by the most recent [`Scanner::feed`].
    fn status(&self) -> Status;

    /// Processes a character decoded by [`u8char::stream::U8CharStream`].
    ///
    /// A carriage return and line feed fed this way count as two separate
    /// line endings; hosts that care should pair them into
    /// [`Code::CarriageReturnLineFeed`] and call [`Scanner::feed`].
    #[inline(always)]
    fn feed_u8char<E: Effects<T>>(&mut self, c: u8char, effects: &mut E) -> Status {
        self.feed(Code::from(c), effects)
    }

    /// Feeds all of `input` followed by [`Code::Eof`] until the scanner
    /// finishes.
    ///
    /// The construct must start at the beginning of `input` but may end
    /// anywhere in it. On success, returns the number of bytes it occupies.
    ///
    /// A scanner that has already finished consumes nothing more, so it
    /// rejects at the start of `input`.
    fn scan<E: Effects<T>>(&mut self, input: &str, effects: &mut E) -> Result<usize, Rejected> {
        if self.status() != Status::Pending {
            let code = codes(input).next().map_or(Code::Eof, |(_, code)| code);
            return Err(Rejected { offset: 0, code });
        }
        let end = once((input.len(), Code::Eof));
        for (offset, code) in codes(input).chain(end) {
            match self.feed(code, effects) {
                Status::Pending => {}
                Status::Matched => return Ok(offset + code.len_utf8()),
                Status::Rejected => return Err(Rejected { offset, code }),
            }
        }
        // Every state decides on Eof, so this only happens if the scanner
        // stays pending on Eof.
        Err(Rejected {
            offset: input.len(),
            code: Code::Eof,
        })
    }
}

/// Result of a single state function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow<S> {
    /// The code was consumed; continue in the given state with the next one.
    Next(S),
    /// Hand the same code to another state.
    Retry(S),
    Ok,
    Nok,
}

/// Effects bookkeeping shared by the scanners: the stack of open tokens
/// and the number of codes consumed so far.
#[derive(Debug, Clone)]
pub(crate) struct Track<T> {
    open: SmallVec<[T; 8]>,
    position: usize,
}

impl<T: Copy> Track<T> {
    pub(crate) fn new() -> Self {
        Self {
            open: SmallVec::new(),
            position: 0,
        }
    }

    #[inline(always)]
    pub(crate) fn enter<E: Effects<T>>(&mut self, effects: &mut E, tag: T) {
        self.open.push(tag);
        effects.enter(tag);
    }

    #[inline(always)]
    pub(crate) fn exit<E: Effects<T>>(&mut self, effects: &mut E, tag: T) {
        debug_assert!(!self.open.is_empty(), "exit without matching enter");
        self.open.pop();
        effects.exit(tag);
    }

    #[inline(always)]
    pub(crate) fn consume<E: Effects<T>>(&mut self, effects: &mut E, code: Code) {
        self.position += 1;
        effects.consume(code);
    }

    /// Exits every token that's still open, innermost first.
    pub(crate) fn unwind<E: Effects<T>>(&mut self, effects: &mut E) {
        while let Some(tag) = self.open.pop() {
            effects.exit(tag);
        }
    }

    /// Number of codes consumed since the scanner started.
    #[inline(always)]
    pub(crate) const fn position(&self) -> usize {
        self.position
    }

    #[inline(always)]
    pub(crate) fn depth(&self) -> usize {
        self.open.len()
    }
}
