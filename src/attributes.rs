use crate::scanner::{Flow, Track};
use crate::whitespace::{Fold, FoldStep, SpaceTypes};
use crate::{Code, Effects, EolPolicy, Scanner, Status};

/// Tags emitted by an [`AttributeListScanner`].
///
/// For `{#a .b key="v"}` the tokens nest as follows:
///
/// ```plaintext
/// attributes
///   marker                    {
///   attribute
///     id
///       id_marker             #
///       id_value              a
///   (whitespace tokens)
///   attribute
///     class
///       class_marker          .
///       class_value           b
///   attribute
///     name                    key
///     initializer             =
///     value_literal
///       value_marker          "
///       value
///         value_data          v
///       value_marker          "
///   marker                    }
/// ```
///
/// An unquoted value is a `value` token containing one `value_data` token,
/// directly inside the attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeListTypes<T> {
    pub attributes: T,
    pub marker: T,
    pub attribute: T,
    pub id: T,
    pub id_marker: T,
    pub id_value: T,
    pub class: T,
    pub class_marker: T,
    pub class_value: T,
    pub name: T,
    pub initializer: T,
    pub value_literal: T,
    pub value: T,
    pub value_marker: T,
    pub value_data: T,
    pub space: SpaceTypes<T>,
}

/// The two abbreviated attribute forms, `#id` and `.class`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutKind {
    Id,
    Class,
}

impl ShortcutKind {
    /// Returns the tags for the shortcut itself, its marker, and its value.
    #[inline(always)]
    pub fn tags<T: Copy>(self, types: &AttributeListTypes<T>) -> (T, T, T) {
        match self {
            ShortcutKind::Id => (types.id, types.id_marker, types.id_value),
            ShortcutKind::Class => (types.class, types.class_marker, types.class_value),
        }
    }
}

/// Recognizes an attribute list such as `{#id .class key="value" flag}`.
pub struct AttributeListScanner<T> {
    types: AttributeListTypes<T>,
    eol: EolPolicy,
    state: State,
    status: Status,
    kind: ShortcutKind,
    marker: Option<char>,
    fold: Fold<T>,
    resume: State,
    track: Track<T>,
}

impl<T: Copy> AttributeListScanner<T> {
    pub fn new(types: AttributeListTypes<T>, eol: EolPolicy) -> Self {
        Self {
            types,
            eol,
            state: State::Start,
            status: Status::Pending,
            kind: ShortcutKind::Id,
            marker: None,
            fold: Fold::new(eol.allows_eol()),
            resume: State::Between,
            track: Track::new(),
        }
    }

    /// The quote character of the quoted value currently being scanned.
    #[inline(always)]
    pub const fn marker(&self) -> Option<char> {
        self.marker
    }

    /// Number of codes consumed so far.
    #[inline(always)]
    pub const fn position(&self) -> usize {
        self.track.position()
    }

    fn step<E: Effects<T>>(&mut self, state: State, code: Code, effects: &mut E) -> Flow<State> {
        match state {
            State::Start => self.start(code, effects),
            State::Between => self.between(code, effects),
            State::ShortcutStartAfter => self.shortcut_start_after(code, effects),
            State::Shortcut => self.shortcut(code, effects),
            State::Name => self.name(code, effects),
            State::NameAfter => self.name_after(code, effects),
            State::ValueBefore => self.value_before(code, effects),
            State::ValueUnquoted => self.value_unquoted(code, effects),
            State::ValueQuotedStart => self.value_quoted_start(code, effects),
            State::ValueQuotedBetween => self.value_quoted_between(code, effects),
            State::ValueQuoted => self.value_quoted(code, effects),
            State::ValueQuotedAfter => self.value_quoted_after(code),
            State::End => self.end(code, effects),
            State::Whitespace => {
                match self
                    .fold
                    .step(code, &self.types.space, &mut self.track, effects)
                {
                    FoldStep::Consumed => Flow::Next(State::Whitespace),
                    FoldStep::Done => Flow::Retry(self.resume),
                }
            }
        }
    }

    /// Starts folding whitespace if `code` is whitespace under the
    /// current line ending policy, returning to `resume` afterwards.
    fn fold_into(&mut self, code: Code, resume: State) -> Option<Flow<State>> {
        let folds = match self.eol {
            EolPolicy::Allow => code.is_line_ending_or_space(),
            EolPolicy::Disallow => code.is_space(),
        };
        if !folds {
            return None;
        }
        self.fold = Fold::new(self.eol.allows_eol());
        self.resume = resume;
        Some(Flow::Retry(State::Whitespace))
    }

    fn start<E: Effects<T>>(&mut self, code: Code, effects: &mut E) -> Flow<State> {
        if !code.is_char('{') {
            return Flow::Nok;
        }
        self.track.enter(effects, self.types.attributes);
        self.track.enter(effects, self.types.marker);
        self.track.consume(effects, code);
        self.track.exit(effects, self.types.marker);
        Flow::Next(State::Between)
    }

    fn between<E: Effects<T>>(&mut self, code: Code, effects: &mut E) -> Flow<State> {
        match code {
            Code::Char('#') => return self.shortcut_start(ShortcutKind::Id, code, effects),
            Code::Char('.') => return self.shortcut_start(ShortcutKind::Class, code, effects),
            Code::Char(':' | '_') => {}
            _ if code.is_ascii_alpha() => {}
            _ => {
                return self
                    .fold_into(code, State::Between)
                    .unwrap_or(Flow::Retry(State::End));
            }
        }
        self.track.enter(effects, self.types.attribute);
        self.track.enter(effects, self.types.name);
        self.track.consume(effects, code);
        Flow::Next(State::Name)
    }

    fn shortcut_start<E: Effects<T>>(
        &mut self,
        kind: ShortcutKind,
        code: Code,
        effects: &mut E,
    ) -> Flow<State> {
        self.kind = kind;
        let (tag, marker, _) = kind.tags(&self.types);
        self.track.enter(effects, self.types.attribute);
        self.track.enter(effects, tag);
        self.track.enter(effects, marker);
        self.track.consume(effects, code);
        self.track.exit(effects, marker);
        Flow::Next(State::ShortcutStartAfter)
    }

    fn shortcut_start_after<E: Effects<T>>(&mut self, code: Code, effects: &mut E) -> Flow<State> {
        match code {
            Code::Eof | Code::Char('"' | '#' | '\'' | '.' | '<' | '=' | '>' | '`' | '}') => {
                return Flow::Nok;
            }
            _ if code.is_line_ending_or_space() => return Flow::Nok,
            _ => {}
        }
        let (_, _, value) = self.kind.tags(&self.types);
        self.track.enter(effects, value);
        self.track.consume(effects, code);
        Flow::Next(State::Shortcut)
    }

    fn shortcut<E: Effects<T>>(&mut self, code: Code, effects: &mut E) -> Flow<State> {
        match code {
            Code::Eof | Code::Char('"' | '\'' | '<' | '=' | '>' | '`') => Flow::Nok,
            Code::Char('#' | '.' | '}') => self.shortcut_end(effects),
            _ if code.is_line_ending_or_space() => self.shortcut_end(effects),
            _ => {
                self.track.consume(effects, code);
                Flow::Next(State::Shortcut)
            }
        }
    }

    fn shortcut_end<E: Effects<T>>(&mut self, effects: &mut E) -> Flow<State> {
        let (tag, _, value) = self.kind.tags(&self.types);
        self.track.exit(effects, value);
        self.track.exit(effects, tag);
        self.track.exit(effects, self.types.attribute);
        Flow::Retry(State::Between)
    }

    fn name<E: Effects<T>>(&mut self, code: Code, effects: &mut E) -> Flow<State> {
        if matches!(code, Code::Char('-' | '.' | ':' | '_')) || code.is_ascii_alphanumeric() {
            self.track.consume(effects, code);
            return Flow::Next(State::Name);
        }
        self.track.exit(effects, self.types.name);
        self.fold_into(code, State::NameAfter)
            .unwrap_or(Flow::Retry(State::NameAfter))
    }

    fn name_after<E: Effects<T>>(&mut self, code: Code, effects: &mut E) -> Flow<State> {
        if code.is_char('=') {
            self.track.enter(effects, self.types.initializer);
            self.track.consume(effects, code);
            self.track.exit(effects, self.types.initializer);
            return Flow::Next(State::ValueBefore);
        }
        // Attribute without a value.
        self.track.exit(effects, self.types.attribute);
        Flow::Retry(State::Between)
    }

    fn value_before<E: Effects<T>>(&mut self, code: Code, effects: &mut E) -> Flow<State> {
        match code {
            Code::Eof | Code::Char('<' | '=' | '>' | '`' | '}') => return Flow::Nok,
            _ if !self.eol.allows_eol() && code.is_line_ending() => return Flow::Nok,
            Code::Char(quote @ ('"' | '\'')) => {
                self.track.enter(effects, self.types.value_literal);
                self.track.enter(effects, self.types.value_marker);
                self.track.consume(effects, code);
                self.track.exit(effects, self.types.value_marker);
                self.marker = Some(quote);
                return Flow::Next(State::ValueQuotedStart);
            }
            _ => {}
        }
        if let Some(flow) = self.fold_into(code, State::ValueBefore) {
            return flow;
        }
        self.track.enter(effects, self.types.value);
        self.track.enter(effects, self.types.value_data);
        self.track.consume(effects, code);
        self.marker = None;
        Flow::Next(State::ValueUnquoted)
    }

    fn value_unquoted<E: Effects<T>>(&mut self, code: Code, effects: &mut E) -> Flow<State> {
        match code {
            Code::Eof | Code::Char('"' | '\'' | '<' | '=' | '>' | '`') => Flow::Nok,
            _ if code.is_char('}') || code.is_line_ending_or_space() => {
                self.track.exit(effects, self.types.value_data);
                self.track.exit(effects, self.types.value);
                self.track.exit(effects, self.types.attribute);
                Flow::Retry(State::Between)
            }
            _ => {
                self.track.consume(effects, code);
                Flow::Next(State::ValueUnquoted)
            }
        }
    }

    #[inline(always)]
    fn is_marker(&self, code: Code) -> bool {
        matches!((self.marker, code), (Some(m), Code::Char(c)) if m == c)
    }

    fn value_quoted_start<E: Effects<T>>(&mut self, code: Code, effects: &mut E) -> Flow<State> {
        if self.is_marker(code) {
            self.track.enter(effects, self.types.value_marker);
            self.track.consume(effects, code);
            self.track.exit(effects, self.types.value_marker);
            self.track.exit(effects, self.types.value_literal);
            self.track.exit(effects, self.types.attribute);
            self.marker = None;
            return Flow::Next(State::ValueQuotedAfter);
        }
        self.track.enter(effects, self.types.value);
        Flow::Retry(State::ValueQuotedBetween)
    }

    fn value_quoted_between<E: Effects<T>>(&mut self, code: Code, effects: &mut E) -> Flow<State> {
        if self.is_marker(code) {
            self.track.exit(effects, self.types.value);
            return Flow::Retry(State::ValueQuotedStart);
        }
        if code == Code::Eof {
            return Flow::Nok;
        }
        // A line ending inside quotes is folded like whitespace between
        // attributes, not kept as value data.
        if code.is_line_ending() {
            if !self.eol.allows_eol() {
                return Flow::Nok;
            }
            self.fold = Fold::new(true);
            self.resume = State::ValueQuotedBetween;
            return Flow::Retry(State::Whitespace);
        }
        self.track.enter(effects, self.types.value_data);
        self.track.consume(effects, code);
        Flow::Next(State::ValueQuoted)
    }

    fn value_quoted<E: Effects<T>>(&mut self, code: Code, effects: &mut E) -> Flow<State> {
        if self.is_marker(code) || code == Code::Eof || code.is_line_ending() {
            self.track.exit(effects, self.types.value_data);
            return Flow::Retry(State::ValueQuotedBetween);
        }
        self.track.consume(effects, code);
        Flow::Next(State::ValueQuoted)
    }

    fn value_quoted_after(&mut self, code: Code) -> Flow<State> {
        if code.is_char('}') || code.is_line_ending_or_space() {
            Flow::Retry(State::Between)
        } else {
            Flow::Retry(State::End)
        }
    }

    fn end<E: Effects<T>>(&mut self, code: Code, effects: &mut E) -> Flow<State> {
        if !code.is_char('}') {
            return Flow::Nok;
        }
        self.track.enter(effects, self.types.marker);
        self.track.consume(effects, code);
        self.track.exit(effects, self.types.marker);
        self.track.exit(effects, self.types.attributes);
        Flow::Ok
    }
}

impl<T: Copy> Scanner<T> for AttributeListScanner<T> {
    fn feed<E: Effects<T>>(&mut self, code: Code, effects: &mut E) -> Status {
        if self.status != Status::Pending {
            return self.status;
        }
        let mut state = self.state;
        loop {
            tracing::trace!(?state, ?code, depth = self.track.depth(), "attribute list");
            match self.step(state, code, effects) {
                Flow::Next(next) => {
                    self.state = next;
                    return Status::Pending;
                }
                Flow::Retry(next) => state = next,
                Flow::Ok => {
                    tracing::debug!(position = self.track.position(), "attribute list matched");
                    self.status = Status::Matched;
                    return self.status;
                }
                Flow::Nok => {
                    tracing::debug!(?state, ?code, "attribute list rejected");
                    self.track.unwind(effects);
                    self.marker = None;
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
    Between,
    ShortcutStartAfter,
    Shortcut,
    Name,
    NameAfter,
    ValueBefore,
    ValueUnquoted,
    ValueQuotedStart,
    ValueQuotedBetween,
    ValueQuoted,
    ValueQuotedAfter,
    End,
    Whitespace,
}
