use super::*;

use pretty_assertions::assert_eq;
use std::format;
use std::vec::Vec;

mod properties;

macro_rules! enter {
    ($t:ident) => {
        Event::Enter(TokenType::$t)
    };
}

macro_rules! exit {
    ($t:ident) => {
        Event::Exit(TokenType::$t)
    };
}

macro_rules! consume {
    ($c:literal) => {
        Event::Consume(Code::Char($c))
    };
}

pub(crate) use {consume, enter, exit};

/// Scans an attribute list at the start of `input`, keeping the events
/// of a failed attempt too.
fn scan_attributes(input: &str, eol: EolPolicy) -> (Result<usize, Rejected>, EventLog<TokenType>) {
    let mut log = EventLog::new();
    let mut scanner = AttributeListScanner::new(AttributeListTypes::<TokenType>::default(), eol);
    let result = scanner.scan(input, &mut log);
    (result, log)
}

fn scan_label(
    input: &str,
    eol: EolPolicy,
) -> (Result<usize, Rejected>, EventLog<TokenType>, Vec<Chunk>) {
    let mut log = EventLog::new();
    let mut scanner = LabelScanner::new(LabelTypes::<TokenType>::default(), eol);
    let result = scanner.scan(input, &mut log);
    (result, log, scanner.into_chunks())
}

/// True if every exit closes the innermost open token and nothing is left
/// open at the end.
fn is_balanced(events: &[Event<TokenType>]) -> bool {
    let mut open = Vec::new();
    for event in events {
        match event {
            Event::Enter(tag) => open.push(*tag),
            Event::Exit(tag) => {
                if open.pop() != Some(*tag) {
                    return false;
                }
            }
            Event::Consume(_) => {}
        }
    }
    open.is_empty()
}

#[test]
fn effects_fn_delivers_events() {
    let mut events = Vec::new();
    {
        let mut effects = effects_fn(|event: Event<TokenType>| events.push(event));
        let mut scanner = LabelScanner::new(LabelTypes::<TokenType>::default(), EolPolicy::Allow);
        assert_eq!(scanner.scan("[]", &mut effects), Ok(2));
    }
    assert_eq!(
        events,
        &[
            enter!(Label),
            enter!(LabelMarker),
            consume!('['),
            exit!(LabelMarker),
            enter!(LabelMarker),
            consume!(']'),
            exit!(LabelMarker),
            exit!(Label),
        ]
    );
}

#[test]
fn attempt_discards_rejected_events() {
    let mut log = EventLog::new();
    let mut label = LabelScanner::new(LabelTypes::<TokenType>::default(), EolPolicy::Allow);
    assert_eq!(log.attempt(&mut label, "[a]"), Ok(3));
    let kept = log.events().len();

    let mut attrs =
        AttributeListScanner::new(AttributeListTypes::<TokenType>::default(), EolPolicy::Allow);
    assert_eq!(
        log.attempt(&mut attrs, "{a=}"),
        Err(Rejected {
            offset: 3,
            code: Code::Char('}'),
        })
    );
    assert_eq!(log.events().len(), kept);
    assert_eq!(log.text(), "[a]");
}

#[test]
fn finished_scanner_ignores_more_input() {
    let mut log = EventLog::new();
    let mut scanner = LabelScanner::new(LabelTypes::<TokenType>::default(), EolPolicy::Allow);
    assert_eq!(scanner.scan("[x]", &mut log), Ok(3));
    let before = log.events().len();
    assert_eq!(scanner.feed(Code::Char('y'), &mut log), Status::Matched);
    assert_eq!(scanner.status(), Status::Matched);
    assert_eq!(log.events().len(), before);
}

#[test]
fn finished_scanner_rejects_another_scan() {
    let mut log = EventLog::new();
    let mut scanner =
        AttributeListScanner::new(AttributeListTypes::<TokenType>::default(), EolPolicy::Allow);
    assert_eq!(log.attempt(&mut scanner, "{a}"), Ok(3));
    let before = log.events().len();
    assert_eq!(
        log.attempt(&mut scanner, "{b}"),
        Err(Rejected {
            offset: 0,
            code: Code::Char('{'),
        })
    );
    assert_eq!(scanner.scan("", &mut log).map_err(|e| e.code), Err(Code::Eof));
    assert_eq!(scanner.status(), Status::Matched);
    assert_eq!(log.events().len(), before);
    assert_eq!(log.text(), "{a}");
}

#[test]
fn through_u8char_stream() {
    // Hosts reading raw UTF-8 bytes can decode them with
    // `u8char::stream::U8CharStream` and feed the results directly.
    let mut log = EventLog::new();
    let mut scanner = LabelScanner::new(LabelTypes::<TokenType>::default(), EolPolicy::Allow);
    let mut stream = ::u8char::stream::U8CharStream::new();
    let mut status = Status::Pending;
    for c in stream.more(b"[a\xe2\x9d\x9e]") {
        status = scanner.feed_u8char(c, &mut log);
    }
    for c in stream.end() {
        status = scanner.feed_u8char(c, &mut log);
    }
    assert_eq!(status, Status::Matched);
    assert_eq!(log.text(), "[a\u{275e}]");
}

#[test]
fn codes_pair_crlf() {
    let got: Vec<_> = codes("a\r\nb\rc").collect();
    assert_eq!(
        got,
        &[
            (0, Code::Char('a')),
            (1, Code::CarriageReturnLineFeed),
            (3, Code::Char('b')),
            (4, Code::Char('\r')),
            (5, Code::Char('c')),
        ]
    );
}

#[test]
fn rejected_display() {
    let err = Rejected {
        offset: 4,
        code: Code::Eof,
    };
    assert_eq!(format!("{err}"), "no match at byte offset 4 (Eof)");
}
