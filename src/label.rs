use alloc::vec::Vec;

use crate::scanner::{Flow, Track};
use crate::{Code, Effects, EolPolicy, Scanner, Status};

/// Deepest bracket nesting allowed inside a label.
pub const MAX_BALANCE: usize = 32;

/// Most escaped characters allowed inside a label.
pub const MAX_ESCAPES: usize = 999;

/// Tags emitted by a [`LabelScanner`].
///
/// `[a\nb]` produces:
///
/// ```plaintext
/// label
///   marker        [
///   string
///     chunk       a\n
///     chunk       b
///   marker        ]
/// ```
///
/// An empty label (`[]`) has no `string` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelTypes<T> {
    pub label: T,
    pub marker: T,
    pub string: T,
    /// One line of text within `string`.
    pub chunk: T,
}

/// The span of one per-line chunk of label text, counted in codes
/// consumed by the scanner (the opening `[` is code 0).
///
/// Chunks are kept in source order, so a chunk's predecessor is simply
/// the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub start: usize,
    pub end: usize,
}

/// Recognizes a label such as `[text]`, including balanced nested
/// brackets and escapes.
pub struct LabelScanner<T> {
    types: LabelTypes<T>,
    eol: EolPolicy,
    state: State,
    status: Status,
    balance: usize,
    size: usize,
    chunks: Vec<Chunk>,
    track: Track<T>,
}

impl<T: Copy> LabelScanner<T> {
    pub fn new(types: LabelTypes<T>, eol: EolPolicy) -> Self {
        Self {
            types,
            eol,
            state: State::Start,
            status: Status::Pending,
            balance: 0,
            size: 0,
            chunks: Vec::new(),
            track: Track::new(),
        }
    }

    /// The chunks of text seen so far, in order.
    ///
    /// The last chunk's end is provisional until the chunk is closed.
    #[inline(always)]
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    #[inline(always)]
    pub fn into_chunks(self) -> Vec<Chunk> {
        self.chunks
    }

    /// Current depth of unescaped brackets.
    #[inline(always)]
    pub const fn balance(&self) -> usize {
        self.balance
    }

    /// Number of codes consumed so far.
    #[inline(always)]
    pub const fn position(&self) -> usize {
        self.track.position()
    }

    fn step<E: Effects<T>>(&mut self, state: State, code: Code, effects: &mut E) -> Flow<State> {
        match state {
            State::Start => self.start(code, effects),
            State::AfterStart => self.after_start(code, effects),
            State::LineStart => self.line_start(code, effects),
            State::Data => self.data(code, effects),
            State::DataEscape => self.data_escape(code, effects),
            State::AtClosingBrace => self.at_closing_brace(code, effects),
        }
    }

    fn start<E: Effects<T>>(&mut self, code: Code, effects: &mut E) -> Flow<State> {
        if !code.is_char('[') {
            return Flow::Nok;
        }
        self.track.enter(effects, self.types.label);
        self.track.enter(effects, self.types.marker);
        self.track.consume(effects, code);
        self.track.exit(effects, self.types.marker);
        Flow::Next(State::AfterStart)
    }

    fn after_start<E: Effects<T>>(&mut self, code: Code, effects: &mut E) -> Flow<State> {
        if code.is_char(']') {
            self.track.enter(effects, self.types.marker);
            self.track.consume(effects, code);
            self.track.exit(effects, self.types.marker);
            self.track.exit(effects, self.types.label);
            return Flow::Ok;
        }
        self.track.enter(effects, self.types.string);
        Flow::Retry(State::LineStart)
    }

    fn line_start<E: Effects<T>>(&mut self, code: Code, effects: &mut E) -> Flow<State> {
        if code.is_char(']') && self.balance == 0 {
            return Flow::Retry(State::AtClosingBrace);
        }
        let position = self.track.position();
        self.chunks.push(Chunk {
            start: position,
            end: position,
        });
        self.track.enter(effects, self.types.chunk);
        Flow::Retry(State::Data)
    }

    fn data<E: Effects<T>>(&mut self, code: Code, effects: &mut E) -> Flow<State> {
        if code == Code::Eof || self.size > MAX_ESCAPES {
            return Flow::Nok;
        }
        if code.is_char('[') {
            self.balance += 1;
            if self.balance > MAX_BALANCE {
                return Flow::Nok;
            }
        }
        if code.is_char(']') {
            if self.balance == 0 {
                self.close_chunk(effects);
                return Flow::Retry(State::AtClosingBrace);
            }
            self.balance -= 1;
        }
        if code.is_line_ending() {
            if !self.eol.allows_eol() {
                return Flow::Nok;
            }
            self.consume(code, effects);
            self.close_chunk(effects);
            return Flow::Next(State::LineStart);
        }
        self.consume(code, effects);
        if code.is_char('\\') {
            Flow::Next(State::DataEscape)
        } else {
            Flow::Next(State::Data)
        }
    }

    fn data_escape<E: Effects<T>>(&mut self, code: Code, effects: &mut E) -> Flow<State> {
        if matches!(code, Code::Char('[' | '\\' | ']')) {
            self.consume(code, effects);
            self.size += 1;
            return Flow::Next(State::Data);
        }
        Flow::Retry(State::Data)
    }

    fn at_closing_brace<E: Effects<T>>(&mut self, code: Code, effects: &mut E) -> Flow<State> {
        self.track.exit(effects, self.types.string);
        self.track.enter(effects, self.types.marker);
        self.track.consume(effects, code);
        self.track.exit(effects, self.types.marker);
        self.track.exit(effects, self.types.label);
        Flow::Ok
    }

    /// Consumes a code of chunk text.
    fn consume<E: Effects<T>>(&mut self, code: Code, effects: &mut E) {
        self.track.consume(effects, code);
        if let Some(chunk) = self.chunks.last_mut() {
            chunk.end = self.track.position();
        }
    }

    fn close_chunk<E: Effects<T>>(&mut self, effects: &mut E) {
        self.track.exit(effects, self.types.chunk);
    }
}

impl<T: Copy> Scanner<T> for LabelScanner<T> {
    fn feed<E: Effects<T>>(&mut self, code: Code, effects: &mut E) -> Status {
        if self.status != Status::Pending {
            return self.status;
        }
        let mut state = self.state;
        loop {
            tracing::trace!(?state, ?code, balance = self.balance, "label");
            match self.step(state, code, effects) {
                Flow::Next(next) => {
                    self.state = next;
                    return Status::Pending;
                }
                Flow::Retry(next) => state = next,
                Flow::Ok => {
                    tracing::debug!(chunks = self.chunks.len(), "label matched");
                    self.status = Status::Matched;
                    return self.status;
                }
                Flow::Nok => {
                    tracing::debug!(?state, ?code, balance = self.balance, "label rejected");
                    self.track.unwind(effects);
                    self.status = Status::Rejected;
                    return self.status;
                }
            }
        }
    }

    #[inline(always)]
    fn status(&self) -> Status {
        self.status
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    AfterStart,
    LineStart,
    Data,
    DataEscape,
    AtClosingBrace,
}
