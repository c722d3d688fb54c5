//! Character-driven scanners for two inline markup constructs.
//!
//! This library recognizes brace-delimited attribute lists such as
//! `{#id .class key="value" flag}` and bracketed labels such as `[text]`,
//! one code point at a time, reporting nested token boundaries to a
//! caller-provided implementation of [`Effects`].
//!
//! It is meant to sit underneath a larger tokenizer. The host decides where
//! one of these constructs may begin, creates a scanner there, and feeds it
//! codes until it reports [`Status::Matched`] or [`Status::Rejected`]. A
//! rejection is not an error as such: it just means the host should try
//! something else at the same position, so any tokens the host recorded
//! during the attempt ought to be discarded. [`EventLog::attempt`] does
//! exactly that for the common case where the whole input is in memory.
//!
//! The scanners are generic over the host's token tag type. Hosts that
//! don't have one can use [`TokenType`] and the `Default` tag sets.
//!
//! ```rust
//! # use markscan::{AttributeListScanner, AttributeListTypes, EolPolicy, EventLog, TokenType};
//! let mut log = EventLog::new();
//! let mut scanner =
//!     AttributeListScanner::new(AttributeListTypes::<TokenType>::default(), EolPolicy::Allow);
//! let len = log.attempt(&mut scanner, "{#main .wide} trailing").unwrap();
//! assert_eq!(len, 13);
//! assert_eq!(log.text(), "{#main .wide}");
//! ```
#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

mod attributes;
mod code;
mod effects;
mod label;
mod scanner;
mod types;
mod whitespace;

pub use attributes::{AttributeListScanner, AttributeListTypes, ShortcutKind};
pub use code::{codes, Code, Codes};
pub use effects::{effects_fn, Effects, Event, EventLog};
pub use label::{Chunk, LabelScanner, LabelTypes, MAX_BALANCE, MAX_ESCAPES};
pub use scanner::{EolPolicy, Rejected, Scanner, Status};
pub use types::TokenType;
pub use whitespace::SpaceTypes;

#[cfg(test)]
mod tests;
