use alloc::string::String;
use alloc::vec::Vec;

use crate::{Code, Rejected, Scanner};

/// Trait for hosts that receive token boundaries from a scanner.
///
/// Tokens nest: every [`Effects::enter`] is eventually followed by one
/// [`Effects::exit`] with the same tag, and the most recently entered
/// token always exits first.
///
/// All of the provided method implementations perform no action at all.
pub trait Effects<T> {
    /// Opens a token of the given kind at the current cursor position.
    #[inline(always)]
    fn enter(&mut self, tag: T) {
        let _ = tag;
        // Silently ignored by default.
    }

    /// Closes the innermost open token, which always has the given kind.
    #[inline(always)]
    fn exit(&mut self, tag: T) {
        let _ = tag;
        // Silently ignored by default.
    }

    /// Advances the cursor past `code`, attaching it to the innermost
    /// open token.
    #[inline(always)]
    fn consume(&mut self, code: Code) {
        let _ = code;
        // Silently ignored by default.
    }
}

/// Represents effects delivered to a callback through [`effects_fn`] or
/// recorded by an [`EventLog`].
///
/// Each variant corresponds to a method of [`Effects`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<T> {
    Enter(T),
    Exit(T),
    Consume(Code),
}

/// Returns an [`Effects`] that calls the given function for each
/// effect produced by a scanner.
pub fn effects_fn<T>(f: impl FnMut(Event<T>)) -> impl Effects<T> {
    EffectsFn { f }
}

struct EffectsFn<F> {
    f: F,
}

impl<T, F: FnMut(Event<T>)> Effects<T> for EffectsFn<F> {
    #[inline(always)]
    fn enter(&mut self, tag: T) {
        (self.f)(Event::Enter(tag));
    }

    #[inline(always)]
    fn exit(&mut self, tag: T) {
        (self.f)(Event::Exit(tag));
    }

    #[inline(always)]
    fn consume(&mut self, code: Code) {
        (self.f)(Event::Consume(code));
    }
}

/// An [`Effects`] implementation that records every event in order.
///
/// The scanners don't undo anything they emitted before a rejection, so
/// a host that tries several constructs at the same position typically
/// takes a [`EventLog::mark`] first and calls [`EventLog::rollback`] when
/// the attempt fails. [`EventLog::attempt`] does both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLog<T> {
    events: Vec<Event<T>>,
}

impl<T> EventLog<T> {
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    #[inline(always)]
    pub fn events(&self) -> &[Event<T>] {
        &self.events
    }

    #[inline(always)]
    pub fn into_events(self) -> Vec<Event<T>> {
        self.events
    }

    /// Returns a position that [`EventLog::rollback`] can later return to.
    #[inline(always)]
    pub fn mark(&self) -> usize {
        self.events.len()
    }

    /// Discards everything recorded since `mark` was taken.
    pub fn rollback(&mut self, mark: usize) {
        self.events.truncate(mark);
    }

    /// Reassembles the source text of all consumed codes.
    pub fn text(&self) -> String {
        let mut buf = [0; 4];
        let mut ret = String::new();
        for event in &self.events {
            if let Event::Consume(code) = event {
                ret.push_str(code.as_str(&mut buf));
            }
        }
        ret
    }

    /// Runs `scanner` over `input`, keeping its events only if it matches.
    ///
    /// Returns the number of bytes of `input` the construct occupies.
    pub fn attempt<S: Scanner<T>>(
        &mut self,
        scanner: &mut S,
        input: &str,
    ) -> Result<usize, Rejected> {
        let mark = self.mark();
        let result = scanner.scan(input, self);
        if result.is_err() {
            self.rollback(mark);
        }
        result
    }
}

impl<T> Default for EventLog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Effects<T> for EventLog<T> {
    #[inline(always)]
    fn enter(&mut self, tag: T) {
        self.events.push(Event::Enter(tag));
    }

    #[inline(always)]
    fn exit(&mut self, tag: T) {
        self.events.push(Event::Exit(tag));
    }

    #[inline(always)]
    fn consume(&mut self, code: Code) {
        self.events.push(Event::Consume(code));
    }
}
