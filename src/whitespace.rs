use crate::scanner::Track;
use crate::{Code, Effects};

/// Tags for the tokens that whitespace between other tokens is folded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpaceTypes<T> {
    /// A run of spaces where line endings are not allowed.
    pub whitespace: T,
    pub line_ending: T,
    /// A run of spaces following a line ending.
    pub line_prefix: T,
    /// A run of spaces before any line ending.
    pub line_suffix: T,
}

/// Sub-machine that folds a run of spaces and (optionally) line endings
/// into their own tokens, then hands control back.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Fold<T> {
    eol: bool,
    seen_eol: bool,
    open: Option<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FoldStep {
    Consumed,
    Done,
}

impl<T: Copy> Fold<T> {
    pub(crate) const fn new(eol: bool) -> Self {
        Self {
            eol,
            seen_eol: false,
            open: None,
        }
    }

    pub(crate) fn step<E: Effects<T>>(
        &mut self,
        code: Code,
        types: &SpaceTypes<T>,
        track: &mut Track<T>,
        effects: &mut E,
    ) -> FoldStep {
        if let Some(tag) = self.open {
            if code.is_space() {
                track.consume(effects, code);
                return FoldStep::Consumed;
            }
            track.exit(effects, tag);
            self.open = None;
        }

        if self.eol && code.is_line_ending() {
            track.enter(effects, types.line_ending);
            track.consume(effects, code);
            track.exit(effects, types.line_ending);
            self.seen_eol = true;
            return FoldStep::Consumed;
        }

        if code.is_space() {
            let tag = match (self.eol, self.seen_eol) {
                (false, _) => types.whitespace,
                (true, true) => types.line_prefix,
                (true, false) => types.line_suffix,
            };
            track.enter(effects, tag);
            track.consume(effects, code);
            self.open = Some(tag);
            return FoldStep::Consumed;
        }

        FoldStep::Done
    }
}
